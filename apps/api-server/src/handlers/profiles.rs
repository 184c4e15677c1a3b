//! User profile page and profile editing.

use actix_web::{HttpResponse, web};

use blogicum_core::domain::ProfileUpdate;
use blogicum_shared::ApiResponse;
use blogicum_shared::dto::{PageQuery, ProfileForm};

use super::{page_request, redirect_to};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/profile/{username}
///
/// The owner sees hidden and scheduled posts too.
pub async fn profile(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = page_request(&query)?;
    let feed = state
        .blog
        .profile_feed(&path, viewer.user_id(), page)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(feed)))
}

/// POST /api/edit_profile
pub async fn edit_profile(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ProfileForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    let update = ProfileUpdate {
        username: form.username,
        email: form.email,
        first_name: form.first_name,
        last_name: form.last_name,
    };

    let outcome = state.blog.update_profile(identity.user_id, update).await?;
    Ok(redirect_to(outcome))
}
