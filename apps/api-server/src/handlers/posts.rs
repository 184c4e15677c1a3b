//! Post feeds, post detail and post mutations.

use actix_web::{HttpResponse, web};

use blogicum_core::domain::PostDraft;
use blogicum_shared::ApiResponse;
use blogicum_shared::dto::{PageQuery, PostForm};

use super::{page_request, redirect_to};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn draft(form: PostForm) -> PostDraft {
    PostDraft {
        title: form.title,
        text: form.text,
        pub_date: form.pub_date,
        location_id: form.location_id,
        category_id: form.category_id,
        image: form.image,
        is_published: form.is_published,
    }
}

/// GET /api/
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = page_request(&query)?;
    let posts = state.blog.home_feed(page).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/category/{slug}
pub async fn category_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = page_request(&query)?;
    let feed = state.blog.category_feed(&path, page).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(feed)))
}

/// GET /api/posts/{post_id}
pub async fn post_detail(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let detail = state
        .blog
        .post_detail(path.into_inner(), viewer.user_id())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(detail)))
}

/// POST /api/posts/create
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .blog
        .create_post(identity.user_id, draft(body.into_inner()))
        .await?;
    Ok(redirect_to(outcome))
}

/// POST /api/posts/{post_id}/edit
pub async fn edit_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .blog
        .update_post(identity.user_id, path.into_inner(), draft(body.into_inner()))
        .await?;
    Ok(redirect_to(outcome))
}

/// POST /api/posts/{post_id}/delete
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .blog
        .delete_post(identity.user_id, path.into_inner())
        .await?;
    Ok(redirect_to(outcome))
}
