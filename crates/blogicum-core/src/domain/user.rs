use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Longest username accepted at registration or profile edit.
pub const MAX_USERNAME_LEN: usize = 150;

/// Usernames appear verbatim in profile paths, so only ASCII letters,
/// digits and `@ . + - _` are accepted.
pub fn validate_username(username: &str) -> Result<(), DomainError> {
    let ok = !username.is_empty()
        && username.len() <= MAX_USERNAME_LEN
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "@.+-_".contains(c));
    if !ok {
        return Err(DomainError::Validation(
            "username may contain letters, digits and @/./+/-/_ only".to_string(),
        ));
    }
    Ok(())
}

/// User entity - an author and commenter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            first_name: String::new(),
            last_name: String::new(),
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn public_profile(&self) -> PublicProfile {
        PublicProfile {
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            date_joined: self.created_at,
        }
    }
}

/// What any visitor may see about a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicProfile {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub date_joined: DateTime<Utc>,
}

/// Fields a user may change on their own profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_username(&self.username)?;
        if !self.email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_charset() {
        assert!(validate_username("anna.k+blog@home-1_").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("a/b").is_err());
        assert!(validate_username("a?b").is_err());
        assert!(validate_username("анна").is_err());
        assert!(validate_username(&"a".repeat(MAX_USERNAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_profile_update_rejects_path_characters() {
        let update = ProfileUpdate {
            username: "anna#1".to_string(),
            email: "anna@example.com".to_string(),
            first_name: String::new(),
            last_name: String::new(),
        };
        assert!(matches!(update.validate(), Err(DomainError::Validation(_))));
    }
}
