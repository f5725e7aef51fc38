//! Feed assembly
//!
//! fetch -> audience filter -> rank. The snapshot fetched for a request is
//! owned by that request alone; ranking runs on it synchronously once the
//! fetch completes.

use chrono::{DateTime, Utc};
use feed_ranking::{score_feed, Audience, FeedMode, RankedItem};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::{ContentStore, FollowGraph};
use crate::error::{AppError, Result};
use crate::metrics;

pub struct FeedService {
    store: Arc<dyn ContentStore>,
    graph: Arc<dyn FollowGraph>,
    max_candidates: i64,
}

impl FeedService {
    pub fn new(
        store: Arc<dyn ContentStore>,
        graph: Arc<dyn FollowGraph>,
        max_candidates: i64,
    ) -> Self {
        Self {
            store,
            graph,
            max_candidates,
        }
    }

    pub async fn get_feed(
        &self,
        viewer_id: Option<Uuid>,
        mode: FeedMode,
    ) -> Result<Vec<RankedItem>> {
        self.get_feed_at(viewer_id, mode, Utc::now()).await
    }

    /// Build the feed as seen at `now`
    pub async fn get_feed_at(
        &self,
        viewer_id: Option<Uuid>,
        mode: FeedMode,
        now: DateTime<Utc>,
    ) -> Result<Vec<RankedItem>> {
        let audience = self.resolve_audience(viewer_id, mode).await?;

        if matches!(&audience, Audience::FollowedAuthors(authors) if authors.is_empty()) {
            debug!(viewer_id = ?viewer_id, "Viewer follows nobody, following feed is empty");
            metrics::record_candidates(mode.as_str(), 0);
            return Ok(Vec::new());
        }

        let candidates = self
            .store
            .fetch_candidates(audience.author_ids(), self.max_candidates)
            .await?;
        let candidates = audience.filter(candidates);
        metrics::record_candidates(mode.as_str(), candidates.len());

        let started = Instant::now();
        let ranked = score_feed(candidates, mode, now);
        metrics::record_rank_duration(mode.as_str(), started.elapsed());

        info!(
            viewer_id = ?viewer_id,
            mode = %mode,
            count = ranked.len(),
            "Feed generated"
        );

        Ok(ranked)
    }

    async fn resolve_audience(&self, viewer_id: Option<Uuid>, mode: FeedMode) -> Result<Audience> {
        if !mode.is_following_only() {
            return Ok(Audience::Everyone);
        }

        let viewer_id = viewer_id.ok_or_else(|| {
            AppError::Unauthorized("The following feed requires a signed-in viewer".into())
        })?;
        let authors = self.graph.following(viewer_id).await?;
        Ok(Audience::FollowedAuthors(authors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MockContentStore, MockFollowGraph};
    use chrono::Duration;
    use feed_ranking::{ContentItem, ContentKind, EngagementCounts};
    use std::collections::HashSet;

    fn post(author: Uuid, created_at: DateTime<Utc>, likes: u64) -> ContentItem {
        ContentItem::new(Uuid::new_v4(), author, ContentKind::Video, created_at).with_counts(
            EngagementCounts {
                like_count: likes,
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn test_for_you_skips_follow_graph() {
        let now = Utc::now();
        let quiet = post(Uuid::new_v4(), now - Duration::hours(1), 1);
        let loud = post(Uuid::new_v4(), now - Duration::hours(2), 100);
        let expected = vec![loud.id, quiet.id];
        let fetched = vec![quiet, loud];

        let mut store = MockContentStore::new();
        store
            .expect_fetch_candidates()
            .withf(|authors, limit| authors.is_none() && *limit == 50)
            .times(1)
            .returning(move |_, _| Ok(fetched.clone()));
        let mut graph = MockFollowGraph::new();
        graph.expect_following().never();

        let service = FeedService::new(Arc::new(store), Arc::new(graph), 50);
        let ranked = service
            .get_feed_at(None, FeedMode::EngagementRanked, now)
            .await
            .unwrap();

        assert_eq!(
            ranked.iter().map(|r| r.item.id).collect::<Vec<_>>(),
            expected
        );
    }

    #[tokio::test]
    async fn test_following_requires_viewer() {
        let service = FeedService::new(
            Arc::new(MockContentStore::new()),
            Arc::new(MockFollowGraph::new()),
            50,
        );

        let result = service.get_feed(None, FeedMode::Chronological).await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_following_nobody_skips_fetch() {
        let mut store = MockContentStore::new();
        store.expect_fetch_candidates().never();
        let mut graph = MockFollowGraph::new();
        graph
            .expect_following()
            .times(1)
            .returning(|_| Ok(HashSet::new()));

        let service = FeedService::new(Arc::new(store), Arc::new(graph), 50);
        let ranked = service
            .get_feed(Some(Uuid::new_v4()), FeedMode::Chronological)
            .await
            .unwrap();

        assert!(ranked.is_empty());
    }

    #[tokio::test]
    async fn test_following_filters_unfollowed_authors() {
        let now = Utc::now();
        let followed = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let older = post(followed, now - Duration::hours(3), 0);
        let newer = post(followed, now - Duration::hours(1), 0);
        let foreign = post(stranger, now - Duration::minutes(5), 0);
        let expected = vec![newer.id, older.id];
        // Store ignores the author hint; the audience filter still applies
        let fetched = vec![older, foreign, newer];

        let mut store = MockContentStore::new();
        store
            .expect_fetch_candidates()
            .withf(move |authors, _| authors.as_deref() == Some(&[followed][..]))
            .returning(move |_, _| Ok(fetched.clone()));
        let mut graph = MockFollowGraph::new();
        graph
            .expect_following()
            .returning(move |_| Ok(HashSet::from([followed])));

        let service = FeedService::new(Arc::new(store), Arc::new(graph), 50);
        let ranked = service
            .get_feed_at(Some(Uuid::new_v4()), FeedMode::Chronological, now)
            .await
            .unwrap();

        assert_eq!(
            ranked.iter().map(|r| r.item.id).collect::<Vec<_>>(),
            expected
        );
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut store = MockContentStore::new();
        store
            .expect_fetch_candidates()
            .returning(|_, _| Err(AppError::Database("connection reset".into())));

        let service = FeedService::new(Arc::new(store), Arc::new(MockFollowGraph::new()), 50);
        let result = service.get_feed(None, FeedMode::EngagementRanked).await;

        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
