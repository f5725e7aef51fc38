use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::db::FollowGraph;
use crate::error::{AppError, Result};

#[derive(Clone)]
pub struct FollowService {
    graph: Arc<dyn FollowGraph>,
}

impl FollowService {
    pub fn new(graph: Arc<dyn FollowGraph>) -> Self {
        Self { graph }
    }

    /// Idempotent follow; returns true if a new edge was created
    pub async fn follow(&self, viewer_id: Uuid, author_id: Uuid) -> Result<bool> {
        if viewer_id == author_id {
            return Err(AppError::BadRequest("Cannot follow yourself".into()));
        }

        let created = self.graph.follow(viewer_id, author_id).await?;
        if created {
            info!(viewer_id = %viewer_id, author_id = %author_id, "Follow created");
        }
        Ok(created)
    }

    /// Idempotent unfollow; returns true if an edge was removed
    pub async fn unfollow(&self, viewer_id: Uuid, author_id: Uuid) -> Result<bool> {
        let removed = self.graph.unfollow(viewer_id, author_id).await?;
        if removed {
            info!(viewer_id = %viewer_id, author_id = %author_id, "Follow removed");
        }
        Ok(removed)
    }
}
