use feed_ranking::{ContentItem, EngagementAction};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::ContentStore;
use crate::error::{AppError, Result};
use crate::metrics;
use crate::models::NewContent;

const MAX_CAPTION_CHARS: usize = 2200;

/// Post submission and engagement counters
#[derive(Clone)]
pub struct ContentService {
    store: Arc<dyn ContentStore>,
}

impl ContentService {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, content: NewContent) -> Result<ContentItem> {
        if let Some(caption) = &content.caption {
            if caption.chars().count() > MAX_CAPTION_CHARS {
                return Err(AppError::BadRequest(format!(
                    "Caption exceeds {} characters",
                    MAX_CAPTION_CHARS
                )));
            }
        }

        let item = self.store.insert(content).await?;
        info!(
            content_id = %item.id,
            author_id = %item.author_id,
            kind = %item.kind,
            "Content created"
        );
        Ok(item)
    }

    pub async fn get(&self, id: Uuid) -> Result<ContentItem> {
        self.store.get(id).await
    }

    pub async fn record_engagement(
        &self,
        id: Uuid,
        action: EngagementAction,
    ) -> Result<ContentItem> {
        let item = self.store.apply_engagement(id, action).await?;
        metrics::record_engagement(action.as_str());

        debug!(
            content_id = %id,
            action = %action,
            like_count = item.counts.like_count,
            "Engagement recorded"
        );

        Ok(item)
    }
}
