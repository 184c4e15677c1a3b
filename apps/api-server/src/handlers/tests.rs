use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::{Duration, Utc};
use serde_json::{Value, json};

use blogicum_core::domain::{CategoryDraft, PostDraft, User};
use blogicum_core::ports::{
    BaseRepository, CategoryRepository, PasswordService, PostRepository, TokenService,
    UserRepository,
};
use blogicum_infra::{Argon2PasswordService, InMemoryDatabase, JwtConfig, JwtTokenService};

use super::configure_routes;
use crate::state::AppState;

struct Fixture {
    db: Arc<InMemoryDatabase>,
    state: AppState,
    tokens: Arc<dyn TokenService>,
    passwords: Arc<dyn PasswordService>,
}

impl Fixture {
    fn new() -> Self {
        let db = Arc::new(InMemoryDatabase::new());
        Self {
            state: AppState::with_store(db.clone()),
            db,
            tokens: Arc::new(JwtTokenService::new(JwtConfig::default())),
            passwords: Arc::new(Argon2PasswordService::new()),
        }
    }

    async fn user(&self, username: &str) -> (User, String) {
        let user = User::new(
            username.to_string(),
            format!("{username}@example.com"),
            "unused".to_string(),
        );
        let user = UserRepository::create(self.db.as_ref(), user).await.unwrap();
        let token = self.tokens.generate_token(user.id).unwrap();
        (user, format!("Bearer {token}"))
    }

    async fn post(&self, author: &User, title: &str, is_published: bool) -> i64 {
        let draft = PostDraft {
            title: title.to_string(),
            text: format!("{title} text"),
            pub_date: Utc::now() - Duration::hours(1),
            location_id: None,
            category_id: None,
            image: None,
            is_published,
        };
        PostRepository::create(self.db.as_ref(), author.id, draft)
            .await
            .unwrap()
            .id
    }
}

macro_rules! init_app {
    ($fx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($fx.state.clone()))
                .app_data(web::Data::new($fx.tokens.clone()))
                .app_data(web::Data::new($fx.passwords.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

fn post_form(title: &str) -> Value {
    json!({
        "title": title,
        "text": format!("{title} text"),
        "pub_date": (Utc::now() - Duration::hours(1)).to_rfc3339(),
    })
}

fn location(resp: &actix_web::dev::ServiceResponse) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

#[actix_web::test]
async fn test_index_lists_published_posts() {
    let fx = Fixture::new();
    let (anna, _) = fx.user("anna").await;
    fx.post(&anna, "Visible", true).await;
    fx.post(&anna, "Hidden", false).await;
    let app = init_app!(fx);

    let req = test::TestRequest::get().uri("/api/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["total_items"], 1);
    assert_eq!(body["data"]["items"][0]["post"]["title"], "Visible");
    assert_eq!(body["data"]["items"][0]["author_username"], "anna");
}

#[actix_web::test]
async fn test_page_beyond_last_is_not_found() {
    let fx = Fixture::new();
    let app = init_app!(fx);

    let req = test::TestRequest::get().uri("/api/?page=5").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/api/?page=1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_feed_page_carries_navigation_flags() {
    let fx = Fixture::new();
    let (anna, _) = fx.user("anna").await;
    for n in 0..11 {
        fx.post(&anna, &format!("Post {n}"), true).await;
    }
    let app = init_app!(fx);

    let req = test::TestRequest::get().uri("/api/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["num_pages"], 2);
    assert_eq!(body["data"]["has_next"], true);
    assert_eq!(body["data"]["has_previous"], false);

    let req = test::TestRequest::get().uri("/api/?page=2").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["has_next"], false);
    assert_eq!(body["data"]["has_previous"], true);
}

#[actix_web::test]
async fn test_page_with_overflowing_offset_is_not_found() {
    let fx = Fixture::new();
    let app = init_app!(fx);

    let req = test::TestRequest::get()
        .uri("/api/?page=18446744073709551615")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_hidden_post_detail_only_for_author() {
    let fx = Fixture::new();
    let (anna, anna_auth) = fx.user("anna").await;
    let (_, boris_auth) = fx.user("boris").await;
    let post_id = fx.post(&anna, "Draft", false).await;
    let app = init_app!(fx);
    let uri = format!("/api/posts/{post_id}");

    let req = test::TestRequest::get().uri(&uri).to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, boris_auth))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, anna_auth))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["post"]["post"]["title"], "Draft");
    assert_eq!(body["data"]["comment_form"]["text"], "");
}

#[actix_web::test]
async fn test_missing_category_is_not_found() {
    let fx = Fixture::new();
    CategoryRepository::create(
        fx.db.as_ref(),
        CategoryDraft {
            title: "Hidden".to_string(),
            description: "Not yet".to_string(),
            slug: "hidden".to_string(),
            is_published: false,
        },
    )
    .await
    .unwrap();
    let app = init_app!(fx);

    for uri in ["/api/category/nowhere", "/api/category/hidden"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}

#[actix_web::test]
async fn test_create_post_redirects_to_profile() {
    let fx = Fixture::new();
    let (_, anna_auth) = fx.user("anna").await;
    let app = init_app!(fx);

    let req = test::TestRequest::post()
        .uri("/api/posts/create")
        .insert_header((header::AUTHORIZATION, anna_auth))
        .set_json(post_form("Fresh"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/api/profile/anna");
}

#[actix_web::test]
async fn test_mutation_without_token_is_unauthorized() {
    let fx = Fixture::new();
    let (anna, _) = fx.user("anna").await;
    let post_id = fx.post(&anna, "Keep", true).await;
    let app = init_app!(fx);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{post_id}/delete"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_non_author_edit_redirects_without_change() {
    let fx = Fixture::new();
    let (anna, _) = fx.user("anna").await;
    let (_, boris_auth) = fx.user("boris").await;
    let post_id = fx.post(&anna, "Original", true).await;
    let app = init_app!(fx);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{post_id}/edit"))
        .insert_header((header::AUTHORIZATION, boris_auth))
        .set_json(post_form("Vandalised"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/api/posts/{post_id}"));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["applied"], false);

    let stored = BaseRepository::<blogicum_core::domain::Post, i64>::find_by_id(
        fx.db.as_ref(),
        post_id,
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(stored.title, "Original");
}

#[actix_web::test]
async fn test_comment_flow_and_foreign_delete() {
    let fx = Fixture::new();
    let (anna, anna_auth) = fx.user("anna").await;
    let (_, boris_auth) = fx.user("boris").await;
    let post_id = fx.post(&anna, "Talk", true).await;
    let app = init_app!(fx);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{post_id}/comment"))
        .insert_header((header::AUTHORIZATION, boris_auth))
        .set_json(json!({ "text": "Hello" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/api/posts/{post_id}"));

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{post_id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["post"]["comment_count"], 1);
    let comment_id = body["data"]["comments"][0]["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{post_id}/delete_comment/{comment_id}"))
        .insert_header((header::AUTHORIZATION, anna_auth))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["applied"], false);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comment", post_id + 100))
        .insert_header((header::AUTHORIZATION, "Bearer garbage"))
        .set_json(json!({ "text": "Hello" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn test_profile_shows_drafts_to_owner_only() {
    let fx = Fixture::new();
    let (anna, anna_auth) = fx.user("anna").await;
    fx.post(&anna, "Public", true).await;
    fx.post(&anna, "Private", false).await;
    let app = init_app!(fx);

    let req = test::TestRequest::get().uri("/api/profile/anna").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["is_owner"], false);
    assert_eq!(body["data"]["posts"]["total_items"], 1);

    let req = test::TestRequest::get()
        .uri("/api/profile/anna")
        .insert_header((header::AUTHORIZATION, anna_auth))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["is_owner"], true);
    assert_eq!(body["data"]["posts"]["total_items"], 2);

    let req = test::TestRequest::get().uri("/api/profile/ghost").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_edit_profile_redirects_to_new_username() {
    let fx = Fixture::new();
    let (_, anna_auth) = fx.user("anna").await;
    let app = init_app!(fx);

    let req = test::TestRequest::post()
        .uri("/api/edit_profile")
        .insert_header((header::AUTHORIZATION, anna_auth))
        .set_json(json!({ "username": "anna_k", "email": "anna@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/api/profile/anna_k");
}

#[actix_web::test]
async fn test_register_login_and_me() {
    let fx = Fixture::new();
    let app = init_app!(fx);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "username": "carla",
            "email": "carla@example.com",
            "password": "long-enough-secret",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "carla", "password": "wrong-password" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "carla", "password": "long-enough-secret" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let token = body["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["username"], "carla");
    assert_eq!(body["email"], "carla@example.com");
}

#[actix_web::test]
async fn test_register_rejects_username_with_path_characters() {
    let fx = Fixture::new();
    let app = init_app!(fx);

    for username in ["a/b", "a?b", "a b"] {
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "username": username,
                "email": "someone@example.com",
                "password": "long-enough-secret",
            }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }
    assert!(fx.db.find_by_username("a/b").await.unwrap().is_none());
}
