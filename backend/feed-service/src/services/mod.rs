pub mod content;
pub mod feed;
pub mod follow;

pub use content::ContentService;
pub use feed::FeedService;
pub use follow::FollowService;
