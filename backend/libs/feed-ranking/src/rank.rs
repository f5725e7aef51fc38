use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::item::ContentItem;
use crate::mode::FeedMode;
use crate::score::engagement_score;

/// Content item decorated with its engagement score at ranking time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedItem {
    #[serde(flatten)]
    pub item: ContentItem,
    pub engagement_score: f64,
}

/// Order a snapshot for display, attaching each item's engagement score
///
/// The output is a permutation of `items`. Both orderings use a stable sort,
/// so items that tie (same score, or same timestamp in chronological mode)
/// keep the order in which they were fetched.
pub fn score_feed(items: Vec<ContentItem>, mode: FeedMode, now: DateTime<Utc>) -> Vec<RankedItem> {
    let mut ranked: Vec<RankedItem> = items
        .into_iter()
        .map(|item| {
            let engagement_score = engagement_score(&item, now);
            RankedItem {
                item,
                engagement_score,
            }
        })
        .collect();

    match mode {
        FeedMode::EngagementRanked => {
            ranked.sort_by(|a, b| b.engagement_score.total_cmp(&a.engagement_score));
        }
        FeedMode::Chronological => {
            ranked.sort_by(|a, b| b.item.created_at.cmp(&a.item.created_at));
        }
    }

    debug!(mode = %mode, count = ranked.len(), "Feed ranked");

    ranked
}

/// Order a snapshot for display
pub fn rank_feed(items: Vec<ContentItem>, mode: FeedMode, now: DateTime<Utc>) -> Vec<ContentItem> {
    score_feed(items, mode, now)
        .into_iter()
        .map(|ranked| ranked.item)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ContentKind, EngagementCounts};
    use chrono::Duration;
    use uuid::Uuid;

    fn create_test_item(now: DateTime<Utc>, age: Duration, likes: u64) -> ContentItem {
        ContentItem::new(Uuid::new_v4(), Uuid::new_v4(), ContentKind::Video, now - age)
            .with_counts(EngagementCounts {
                like_count: likes,
                ..Default::default()
            })
    }

    #[test]
    fn test_empty_feed() {
        let now = Utc::now();
        assert!(rank_feed(vec![], FeedMode::EngagementRanked, now).is_empty());
        assert!(rank_feed(vec![], FeedMode::Chronological, now).is_empty());
    }

    #[test]
    fn test_score_ties_keep_fetch_order() {
        let now = Utc::now();
        // All three score 0 regardless of age
        let items = vec![
            create_test_item(now, Duration::hours(5), 0),
            create_test_item(now, Duration::hours(1), 0),
            create_test_item(now, Duration::hours(9), 0),
        ];
        let ids: Vec<Uuid> = items.iter().map(|i| i.id).collect();

        let ranked = rank_feed(items, FeedMode::EngagementRanked, now);

        assert_eq!(ranked.iter().map(|i| i.id).collect::<Vec<_>>(), ids);
    }

    #[test]
    fn test_timestamp_ties_keep_fetch_order() {
        let now = Utc::now();
        let items = vec![
            create_test_item(now, Duration::hours(2), 1),
            create_test_item(now, Duration::hours(2), 50),
        ];
        let ids: Vec<Uuid> = items.iter().map(|i| i.id).collect();

        let ranked = rank_feed(items, FeedMode::Chronological, now);

        assert_eq!(ranked.iter().map(|i| i.id).collect::<Vec<_>>(), ids);
    }

    #[test]
    fn test_old_viral_post_beats_young_quiet_post() {
        let now = Utc::now();
        let old_viral = create_test_item(now, Duration::hours(72), 1000);
        let young_quiet = create_test_item(now, Duration::hours(1), 5);
        let old_id = old_viral.id;

        let ranked = rank_feed(vec![young_quiet, old_viral], FeedMode::EngagementRanked, now);

        assert_eq!(ranked[0].id, old_id);
    }

    #[test]
    fn test_score_feed_reports_scores() {
        let now = Utc::now();
        let ranked = score_feed(
            vec![create_test_item(now, Duration::hours(4), 8)],
            FeedMode::Chronological,
            now,
        );
        assert!((ranked[0].engagement_score - 4.0).abs() < 1e-9);
    }
}
