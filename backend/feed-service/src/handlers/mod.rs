pub mod content;
pub mod feed;
pub mod follow;

use actix_web::{web, HttpRequest};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::services::{ContentService, FeedService, FollowService};

pub use content::{create_content, get_content, record_engagement};
pub use feed::get_feed;
pub use follow::{follow_author, unfollow_author};

/// Viewer identity forwarded by the gateway after authentication
pub const USER_ID_HEADER: &str = "x-user-id";

pub struct AppState {
    pub feed: FeedService,
    pub content: ContentService,
    pub follow: FollowService,
}

/// Register every API route; shared by the binary and the integration tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(|| async { "OK" }))
        .route("/api/v1/health/live", web::get().to(|| async { "OK" }))
        .route("/api/v1/health/ready", web::get().to(|| async { "OK" }))
        .route("/metrics", web::get().to(crate::metrics::serve_metrics))
        .service(
            web::scope("/api/v1")
                .service(get_feed)
                .service(create_content)
                .service(get_content)
                .service(record_engagement)
                .service(follow_author)
                .service(unfollow_author),
        );
}

/// Viewer id if the request carries one; a malformed header is rejected
pub(crate) fn viewer_id(req: &HttpRequest) -> Result<Option<Uuid>> {
    let Some(header_value) = req.headers().get(USER_ID_HEADER) else {
        return Ok(None);
    };

    let value = header_value
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid x-user-id header".into()))?;

    Uuid::parse_str(value)
        .map(Some)
        .map_err(|_| AppError::Unauthorized("Invalid x-user-id header value".into()))
}

pub(crate) fn require_viewer_id(req: &HttpRequest) -> Result<Uuid> {
    viewer_id(req)?.ok_or_else(|| AppError::Unauthorized("Missing x-user-id header".into()))
}

pub(crate) fn parse_uuid(raw: &str, what: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid {} ID", what)))
}
