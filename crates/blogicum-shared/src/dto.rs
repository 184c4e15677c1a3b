//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// The caller's own account, as returned by `/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub date_joined: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

fn published_by_default() -> bool {
    true
}

/// Body of the create and edit post forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    #[serde(default)]
    pub location_id: Option<i64>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "published_by_default")]
    pub is_published: bool,
}

/// Body of the add and edit comment forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentForm {
    pub text: String,
}

/// Body of the edit profile form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileForm {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// `?page=N` on paginated listings. Pages are 1-based.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_form_defaults() {
        let form: PostForm = serde_json::from_str(
            r#"{"title":"Dawn","text":"Body","pub_date":"2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();

        assert!(form.is_published);
        assert_eq!(form.category_id, None);
        assert_eq!(form.location_id, None);
        assert_eq!(form.image, None);
    }

    #[test]
    fn test_profile_form_names_are_optional() {
        let form: ProfileForm =
            serde_json::from_str(r#"{"username":"anna","email":"anna@example.com"}"#).unwrap();

        assert!(form.first_name.is_empty());
        assert!(form.last_name.is_empty());
    }
}
