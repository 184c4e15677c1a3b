//! Authentication handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use blogicum_core::domain::{User, validate_username};
use blogicum_core::ports::{BaseRepository, PasswordService, TokenService, UserRepository};
use blogicum_infra::auth::MIN_PASSWORD_LEN;
use blogicum_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn issue_token(token_service: &dyn TokenService, user: &User) -> AppResult<AuthResponse> {
    let token = token_service.generate_token(user.id)?;

    Ok(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds().max(0) as u64,
    })
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    validate_username(&req.username)?;
    if !req.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    if state.users().find_by_username(&req.username).await?.is_some() {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }
    if state.users().find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = password_service.hash(&req.password)?;
    let user = state
        .users()
        .create(User::new(req.username, req.email, password_hash))
        .await?;
    tracing::info!(user_id = %user.id, "User registered");

    Ok(HttpResponse::Created().json(issue_token(token_service.get_ref().as_ref(), &user)?))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users()
        .find_by_username(&req.username)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !password_service.verify(&req.password, &user.password_hash)? {
        return Err(AppError::Unauthorized);
    }

    Ok(HttpResponse::Ok().json(issue_token(token_service.get_ref().as_ref(), &user)?))
}

/// GET /api/auth/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users()
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(UserResponse {
        id: user.id.to_string(),
        username: user.username,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        date_joined: user.created_at.to_rfc3339(),
    }))
}
