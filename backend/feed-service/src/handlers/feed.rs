use actix_web::{get, web, HttpRequest, HttpResponse};
use feed_ranking::FeedMode;
use tracing::{debug, warn};

use super::{viewer_id, AppState};
use crate::error::Result;
use crate::metrics;
use crate::models::{FeedQueryParams, FeedResponse};

/// `GET /api/v1/feed?mode=for_you|following`
#[get("/feed")]
pub async fn get_feed(
    query: web::Query<FeedQueryParams>,
    http_req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mode = match query.mode.as_deref() {
        Some(raw) => raw.parse::<FeedMode>().map_err(|e| {
            metrics::record_feed_request("invalid", "bad_request");
            e
        })?,
        None => FeedMode::default(),
    };
    let viewer_id = viewer_id(&http_req).map_err(|e| {
        metrics::record_feed_request(mode.as_str(), "unauthorized");
        e
    })?;

    debug!("Getting feed: viewer={:?} mode={}", viewer_id, mode);

    match state.feed.get_feed(viewer_id, mode).await {
        Ok(items) => {
            metrics::record_feed_request(mode.as_str(), "ok");
            Ok(HttpResponse::Ok().json(FeedResponse {
                mode,
                total_count: items.len(),
                items,
            }))
        }
        Err(e) => {
            warn!(viewer_id = ?viewer_id, mode = %mode, error = %e, "Feed request failed");
            metrics::record_feed_request(mode.as_str(), "error");
            Err(e)
        }
    }
}
