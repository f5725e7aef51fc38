//! Storage seams for feed content and the follow graph
//!
//! Both traits have a PostgreSQL implementation and an in-memory one used for
//! local runs and tests.

pub mod content_repo;
pub mod follow_repo;
pub mod memory;

use async_trait::async_trait;
use feed_ranking::{ContentItem, EngagementAction};
use std::collections::HashSet;
use uuid::Uuid;

use crate::error::Result;
use crate::models::NewContent;

pub use content_repo::PgContentRepository;
pub use follow_repo::PgFollowRepository;
pub use memory::InMemoryStore;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Newest-first candidates, optionally restricted to the given authors
    async fn fetch_candidates(
        &self,
        authors: Option<Vec<Uuid>>,
        limit: i64,
    ) -> Result<Vec<ContentItem>>;

    async fn get(&self, id: Uuid) -> Result<ContentItem>;

    async fn insert(&self, content: NewContent) -> Result<ContentItem>;

    /// Apply one interaction and return the updated item; counters never drop below zero
    async fn apply_engagement(&self, id: Uuid, action: EngagementAction) -> Result<ContentItem>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowGraph: Send + Sync {
    async fn following(&self, viewer_id: Uuid) -> Result<HashSet<Uuid>>;

    /// Idempotent; returns true if a new edge was created
    async fn follow(&self, viewer_id: Uuid, author_id: Uuid) -> Result<bool>;

    /// Idempotent; returns true if an edge was removed
    async fn unfollow(&self, viewer_id: Uuid, author_id: Uuid) -> Result<bool>;
}
