//! Feed ranking for the VMS social feed
//!
//! Pure ordering of an already-fetched content snapshot. Fetching, audience
//! lookups and counter persistence live in `feed-service`; this crate only
//! decides the order in which a snapshot is shown.

pub mod audience;
pub mod item;
pub mod mode;
pub mod rank;
pub mod score;

pub use audience::Audience;
pub use item::{ContentItem, ContentKind, EngagementAction, EngagementCounts};
pub use mode::{FeedMode, FeedModeParseError};
pub use rank::{rank_feed, score_feed, RankedItem};
pub use score::{age_hours, engagement_score, EngagementWeights, MIN_AGE_HOURS};
