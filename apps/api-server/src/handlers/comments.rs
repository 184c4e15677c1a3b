//! Comment mutations. Comments are read through the post detail view.

use actix_web::{HttpResponse, web};

use blogicum_core::domain::CommentDraft;
use blogicum_shared::dto::CommentForm;

use super::redirect_to;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/posts/{post_id}/comment
pub async fn add_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    body: web::Json<CommentForm>,
) -> AppResult<HttpResponse> {
    let draft = CommentDraft {
        text: body.into_inner().text,
    };
    let outcome = state
        .blog
        .create_comment(identity.user_id, path.into_inner(), draft)
        .await?;
    Ok(redirect_to(outcome))
}

/// POST /api/posts/{post_id}/edit_comment/{comment_id}
pub async fn edit_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(i64, i64)>,
    body: web::Json<CommentForm>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let draft = CommentDraft {
        text: body.into_inner().text,
    };
    let outcome = state
        .blog
        .update_comment(identity.user_id, post_id, comment_id, draft)
        .await?;
    Ok(redirect_to(outcome))
}

/// POST /api/posts/{post_id}/delete_comment/{comment_id}
pub async fn delete_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(i64, i64)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let outcome = state
        .blog
        .delete_comment(identity.user_id, post_id, comment_id)
        .await?;
    Ok(redirect_to(outcome))
}
