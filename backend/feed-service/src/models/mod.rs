use chrono::{DateTime, Utc};
use feed_ranking::{
    ContentItem, ContentKind, EngagementAction, EngagementCounts, FeedMode, RankedItem,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Content row as it comes back from the backing store
///
/// Counters and kind may be absent or out of range in stored data; they are
/// normalised in [`ContentRow::into_item`] so ranking only ever sees
/// well-formed items.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContentRow {
    pub id: Uuid,
    pub author_id: Uuid,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub like_count: Option<i64>,
    #[serde(default)]
    pub comment_count: Option<i64>,
    #[serde(default)]
    pub share_count: Option<i64>,
    #[serde(default)]
    pub view_count: Option<i64>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub media_url: Option<String>,
}

impl ContentRow {
    pub fn into_item(self) -> Result<ContentItem> {
        let created_at = self.created_at.ok_or_else(|| {
            AppError::DataIntegrity(format!("content {} has no created_at", self.id))
        })?;

        let kind = match self.kind.as_deref() {
            None => ContentKind::default(),
            Some(raw) => ContentKind::parse(raw).ok_or_else(|| {
                AppError::DataIntegrity(format!("content {} has unknown kind '{}'", self.id, raw))
            })?,
        };

        let counts = EngagementCounts::from_signed(
            self.like_count.unwrap_or(0),
            self.comment_count.unwrap_or(0),
            self.share_count.unwrap_or(0),
            self.view_count.unwrap_or(0),
        );

        Ok(ContentItem {
            id: self.id,
            author_id: self.author_id,
            kind,
            created_at,
            counts,
            caption: self.caption,
            media_url: self.media_url,
        })
    }
}

/// Convert a batch of rows, failing on the first malformed one
pub fn rows_into_items(rows: Vec<ContentRow>) -> Result<Vec<ContentItem>> {
    rows.into_iter().map(ContentRow::into_item).collect()
}

/// Post submission
#[derive(Debug, Clone, PartialEq)]
pub struct NewContent {
    pub author_id: Uuid,
    pub kind: ContentKind,
    pub caption: Option<String>,
    pub media_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeedQueryParams {
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedResponse {
    pub mode: FeedMode,
    pub items: Vec<RankedItem>,
    pub total_count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateContentRequest {
    #[serde(default)]
    pub kind: ContentKind,
    pub caption: Option<String>,
    pub media_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngagementRequest {
    pub action: EngagementAction,
}

#[derive(Debug, Clone, Serialize)]
pub struct EngagementResponse {
    pub id: Uuid,
    pub action: EngagementAction,
    #[serde(flatten)]
    pub counts: EngagementCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct FollowResponse {
    pub follower_id: Uuid,
    pub author_id: Uuid,
    pub following: bool,
}
