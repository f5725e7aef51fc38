use actix_web::{delete, put, web, HttpRequest, HttpResponse};

use super::{parse_uuid, require_viewer_id, AppState};
use crate::error::Result;
use crate::models::FollowResponse;

#[put("/following/{author_id}")]
pub async fn follow_author(
    http_req: HttpRequest,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let follower_id = require_viewer_id(&http_req)?;
    let author_id = parse_uuid(&path, "author")?;

    state.follow.follow(follower_id, author_id).await?;

    Ok(HttpResponse::Ok().json(FollowResponse {
        follower_id,
        author_id,
        following: true,
    }))
}

#[delete("/following/{author_id}")]
pub async fn unfollow_author(
    http_req: HttpRequest,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let follower_id = require_viewer_id(&http_req)?;
    let author_id = parse_uuid(&path, "author")?;

    state.follow.unfollow(follower_id, author_id).await?;

    Ok(HttpResponse::Ok().json(FollowResponse {
        follower_id,
        author_id,
        following: false,
    }))
}
