use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{MAX_TITLE_LEN, Publication};
use crate::error::DomainError;

/// Post entity - a blog publication owned by its author.
///
/// `pub_date` may lie in the future; such a post is scheduled and stays
/// hidden from the public until the instant passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author_id: Uuid,
    pub location_id: Option<i64>,
    pub category_id: Option<i64>,
    pub image: Option<String>,
    #[serde(flatten)]
    pub publication: Publication,
}

impl Post {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }
}

/// Editable fields of a post, as submitted by its author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub location_id: Option<i64>,
    pub category_id: Option<i64>,
    pub image: Option<String>,
    pub is_published: bool,
}

impl PostDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() || self.title.chars().count() > MAX_TITLE_LEN {
            return Err(DomainError::Validation(format!(
                "post title must be 1..={MAX_TITLE_LEN} characters"
            )));
        }
        if self.text.trim().is_empty() {
            return Err(DomainError::Validation(
                "post text must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PostDraft {
        PostDraft {
            title: "First light".to_string(),
            text: "Morning over the bay".to_string(),
            pub_date: Utc::now(),
            location_id: None,
            category_id: None,
            image: None,
            is_published: true,
        }
    }

    #[test]
    fn test_draft_rejects_blank_title() {
        let mut d = draft();
        d.title = "   ".to_string();
        assert!(matches!(d.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_draft_rejects_overlong_title() {
        let mut d = draft();
        d.title = "x".repeat(MAX_TITLE_LEN + 1);
        assert!(d.validate().is_err());

        d.title = "x".repeat(MAX_TITLE_LEN);
        assert!(d.validate().is_ok());
    }

}
