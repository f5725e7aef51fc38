use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashSet;
use uuid::Uuid;

use super::FollowGraph;
use crate::error::Result;

/// PostgreSQL-backed follow edges (`follows` table)
#[derive(Clone)]
pub struct PgFollowRepository {
    pool: PgPool,
}

impl PgFollowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowGraph for PgFollowRepository {
    async fn following(&self, viewer_id: Uuid) -> Result<HashSet<Uuid>> {
        let authors: Vec<Uuid> = sqlx::query_scalar(
            r#"
            SELECT author_id
            FROM follows
            WHERE follower_id = $1
            "#,
        )
        .bind(viewer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(authors.into_iter().collect())
    }

    async fn follow(&self, viewer_id: Uuid, author_id: Uuid) -> Result<bool> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO follows (follower_id, author_id, created_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (follower_id, author_id) DO NOTHING
            "#,
        )
        .bind(viewer_id)
        .bind(author_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(inserted > 0)
    }

    async fn unfollow(&self, viewer_id: Uuid, author_id: Uuid) -> Result<bool> {
        let affected = sqlx::query(
            r#"
            DELETE FROM follows
            WHERE follower_id = $1 AND author_id = $2
            "#,
        )
        .bind(viewer_id)
        .bind(author_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }
}
