//! Engagement score
//!
//! score = (likes * 2 + comments * 3 + shares * 5 + views * 0.1) / age_hours
//!
//! Recency is applied as a divisor, so an old post with a lot of engagement can
//! still outrank a young post with little.

use chrono::{DateTime, Utc};

use crate::item::{ContentItem, EngagementCounts};

/// Lower bound on content age used as the score divisor
pub const MIN_AGE_HOURS: f64 = 1.0;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Per-interaction weights of the engagement score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngagementWeights {
    pub like: f64,
    pub comment: f64,
    pub share: f64,
    pub view: f64,
}

impl EngagementWeights {
    pub const FEED: EngagementWeights = EngagementWeights {
        like: 2.0,
        comment: 3.0,
        share: 5.0,
        view: 0.1,
    };

    /// Weighted interaction total, before recency decay
    pub fn weighted_total(&self, counts: &EngagementCounts) -> f64 {
        counts.like_count as f64 * self.like
            + counts.comment_count as f64 * self.comment
            + counts.share_count as f64 * self.share
            + counts.view_count as f64 * self.view
    }
}

/// Age of a post in fractional hours, never below [`MIN_AGE_HOURS`]
///
/// Posts dated after `now` (clock skew between writers) clamp to the floor too.
pub fn age_hours(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let elapsed_ms = now.signed_duration_since(created_at).num_milliseconds() as f64;
    (elapsed_ms / MILLIS_PER_HOUR).max(MIN_AGE_HOURS)
}

/// Engagement score of `item` as seen at `now`
pub fn engagement_score(item: &ContentItem, now: DateTime<Utc>) -> f64 {
    EngagementWeights::FEED.weighted_total(&item.counts) / age_hours(item.created_at, now)
}
