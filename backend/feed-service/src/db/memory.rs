//! In-memory content and follow store
//!
//! Backs local runs (optionally seeded from a JSON file of content rows) and
//! the HTTP integration tests.

use async_trait::async_trait;
use chrono::Utc;
use feed_ranking::{ContentItem, EngagementAction};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use super::{ContentStore, FollowGraph};
use crate::error::{AppError, Result};
use crate::models::{rows_into_items, ContentRow, NewContent};

#[derive(Default)]
pub struct InMemoryStore {
    content: RwLock<Vec<ContentItem>>,
    follows: RwLock<HashMap<Uuid, HashSet<Uuid>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<ContentItem>) -> Self {
        Self {
            content: RwLock::new(items),
            follows: RwLock::default(),
        }
    }

    /// Build a store from raw rows, rejecting malformed ones
    pub fn from_rows(rows: Vec<ContentRow>) -> Result<Self> {
        Ok(Self::with_items(rows_into_items(rows)?))
    }

    /// Load a JSON array of content rows
    pub async fn from_seed_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::Internal(format!("failed to read seed file {}: {}", path.display(), e))
        })?;
        let rows: Vec<ContentRow> = serde_json::from_str(&raw)?;
        let store = Self::from_rows(rows)?;

        info!(
            path = %path.display(),
            items = store.content.read().await.len(),
            "Seeded in-memory content store"
        );

        Ok(store)
    }
}

#[async_trait]
impl ContentStore for InMemoryStore {
    async fn fetch_candidates(
        &self,
        authors: Option<Vec<Uuid>>,
        limit: i64,
    ) -> Result<Vec<ContentItem>> {
        let authors: Option<HashSet<Uuid>> = authors.map(|ids| ids.into_iter().collect());
        let content = self.content.read().await;

        let mut candidates: Vec<ContentItem> = content
            .iter()
            .filter(|item| {
                authors
                    .as_ref()
                    .map_or(true, |ids| ids.contains(&item.author_id))
            })
            .cloned()
            .collect();

        candidates.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        candidates.truncate(limit.max(0) as usize);

        Ok(candidates)
    }

    async fn get(&self, id: Uuid) -> Result<ContentItem> {
        self.content
            .read()
            .await
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("content {}", id)))
    }

    async fn insert(&self, content: NewContent) -> Result<ContentItem> {
        let mut item =
            ContentItem::new(Uuid::new_v4(), content.author_id, content.kind, Utc::now());
        item.caption = content.caption;
        item.media_url = content.media_url;

        self.content.write().await.push(item.clone());
        Ok(item)
    }

    async fn apply_engagement(&self, id: Uuid, action: EngagementAction) -> Result<ContentItem> {
        let mut content = self.content.write().await;
        let item = content
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| AppError::NotFound(format!("content {}", id)))?;

        item.apply(action);
        Ok(item.clone())
    }
}

#[async_trait]
impl FollowGraph for InMemoryStore {
    async fn following(&self, viewer_id: Uuid) -> Result<HashSet<Uuid>> {
        Ok(self
            .follows
            .read()
            .await
            .get(&viewer_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn follow(&self, viewer_id: Uuid, author_id: Uuid) -> Result<bool> {
        Ok(self
            .follows
            .write()
            .await
            .entry(viewer_id)
            .or_default()
            .insert(author_id))
    }

    async fn unfollow(&self, viewer_id: Uuid, author_id: Uuid) -> Result<bool> {
        Ok(self
            .follows
            .write()
            .await
            .get_mut(&viewer_id)
            .map(|authors| authors.remove(&author_id))
            .unwrap_or(false))
    }
}
