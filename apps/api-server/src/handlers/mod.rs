//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod health;
mod posts;
mod profiles;

#[cfg(test)]
mod tests;

use actix_web::{HttpResponse, http::header, web};

use blogicum_core::pagination::PageRequest;
use blogicum_core::{Mutation, Redirect};
use blogicum_shared::dto::PageQuery;
use blogicum_shared::response::RedirectBody;

use crate::middleware::error::AppResult;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/", web::get().to(posts::index))
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            .route("/category/{slug}", web::get().to(posts::category_posts))
            .route("/profile/{username}", web::get().to(profiles::profile))
            .route("/edit_profile", web::post().to(profiles::edit_profile))
            // Literal segment first so it is not captured as a post id.
            .route("/posts/create", web::post().to(posts::create_post))
            .route("/posts/{post_id}", web::get().to(posts::post_detail))
            .route("/posts/{post_id}/edit", web::post().to(posts::edit_post))
            .route("/posts/{post_id}/delete", web::post().to(posts::delete_post))
            .route(
                "/posts/{post_id}/comment",
                web::post().to(comments::add_comment),
            )
            .route(
                "/posts/{post_id}/edit_comment/{comment_id}",
                web::post().to(comments::edit_comment),
            )
            .route(
                "/posts/{post_id}/delete_comment/{comment_id}",
                web::post().to(comments::delete_comment),
            ),
    );
}

/// Path a redirect target lives at.
pub(crate) fn redirect_path(redirect: &Redirect) -> String {
    match redirect {
        Redirect::PostDetail { post_id } => format!("/api/posts/{post_id}"),
        Redirect::Profile { username } => format!("/api/profile/{username}"),
    }
}

/// `302 Found` for both applied and denied mutations.
pub(crate) fn redirect_to(outcome: Mutation) -> HttpResponse {
    let location = redirect_path(outcome.redirect());
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.clone()))
        .json(RedirectBody {
            location,
            applied: outcome.is_applied(),
        })
}

pub(crate) fn page_request(query: &PageQuery) -> AppResult<PageRequest> {
    match query.page {
        Some(number) => Ok(PageRequest::new(number)?),
        None => Ok(PageRequest::first()),
    }
}
