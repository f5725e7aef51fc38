use actix_web::{get, post, web, HttpRequest, HttpResponse};

use super::{parse_uuid, require_viewer_id, AppState};
use crate::error::Result;
use crate::models::{CreateContentRequest, EngagementRequest, EngagementResponse, NewContent};

/// Submit a new post authored by the viewer
#[post("/content")]
pub async fn create_content(
    http_req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<CreateContentRequest>,
) -> Result<HttpResponse> {
    let author_id = require_viewer_id(&http_req)?;
    let payload = payload.into_inner();

    let item = state
        .content
        .create(NewContent {
            author_id,
            kind: payload.kind,
            caption: payload.caption,
            media_url: payload.media_url,
        })
        .await?;

    Ok(HttpResponse::Created().json(item))
}

#[get("/content/{content_id}")]
pub async fn get_content(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let content_id = parse_uuid(&path, "content")?;
    let item = state.content.get(content_id).await?;
    Ok(HttpResponse::Ok().json(item))
}

/// Like, unlike, comment, share or view a post
#[post("/content/{content_id}/engagement")]
pub async fn record_engagement(
    path: web::Path<String>,
    state: web::Data<AppState>,
    payload: web::Json<EngagementRequest>,
) -> Result<HttpResponse> {
    let content_id = parse_uuid(&path, "content")?;
    let action = payload.action;

    let item = state.content.record_engagement(content_id, action).await?;

    Ok(HttpResponse::Ok().json(EngagementResponse {
        id: item.id,
        action,
        counts: item.counts,
    }))
}
