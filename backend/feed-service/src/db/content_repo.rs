/// Content Repository
///
/// PostgreSQL access to `content_items`.
use async_trait::async_trait;
use feed_ranking::{ContentItem, EngagementAction};
use sqlx::PgPool;
use tracing::error;
use uuid::Uuid;

use super::ContentStore;
use crate::error::{AppError, Result};
use crate::models::{rows_into_items, ContentRow, NewContent};

const CONTENT_COLUMNS: &str = "id, author_id, kind, created_at, like_count, comment_count, \
                               share_count, view_count, caption, media_url";

#[derive(Clone)]
pub struct PgContentRepository {
    pool: PgPool,
}

impl PgContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn counter_update(action: EngagementAction) -> &'static str {
        match action {
            EngagementAction::Like => "like_count = like_count + 1",
            EngagementAction::Unlike => "like_count = GREATEST(like_count - 1, 0)",
            EngagementAction::Comment => "comment_count = comment_count + 1",
            EngagementAction::Share => "share_count = share_count + 1",
            EngagementAction::View => "view_count = view_count + 1",
        }
    }
}

#[async_trait]
impl ContentStore for PgContentRepository {
    async fn fetch_candidates(
        &self,
        authors: Option<Vec<Uuid>>,
        limit: i64,
    ) -> Result<Vec<ContentItem>> {
        let query = format!(
            r#"
            SELECT {CONTENT_COLUMNS}
            FROM content_items
            WHERE ($1::uuid[] IS NULL OR author_id = ANY($1))
            ORDER BY created_at DESC, id
            LIMIT $2
            "#
        );

        let rows = sqlx::query_as::<_, ContentRow>(&query)
            .bind(authors)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to fetch feed candidates: {}", e);
                AppError::from(e)
            })?;

        rows_into_items(rows)
    }

    async fn get(&self, id: Uuid) -> Result<ContentItem> {
        let query = format!("SELECT {CONTENT_COLUMNS} FROM content_items WHERE id = $1");

        sqlx::query_as::<_, ContentRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("content {}", id)))?
            .into_item()
    }

    async fn insert(&self, content: NewContent) -> Result<ContentItem> {
        let query = format!(
            r#"
            INSERT INTO content_items (id, author_id, kind, caption, media_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CONTENT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ContentRow>(&query)
            .bind(Uuid::new_v4())
            .bind(content.author_id)
            .bind(content.kind.as_str())
            .bind(content.caption)
            .bind(content.media_url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to insert content: {}", e);
                AppError::from(e)
            })?;

        row.into_item()
    }

    async fn apply_engagement(&self, id: Uuid, action: EngagementAction) -> Result<ContentItem> {
        let query = format!(
            "UPDATE content_items SET {} WHERE id = $1 RETURNING {CONTENT_COLUMNS}",
            Self::counter_update(action)
        );

        sqlx::query_as::<_, ContentRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("content {}", id)))?
            .into_item()
    }
}
