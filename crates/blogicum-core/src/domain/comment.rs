use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Comment entity - a reader's remark on a post.
///
/// Comments carry no publication flag of their own; whoever can see the
/// post can see its comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub post_id: i64,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Comment form contents. The default value is the blank entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDraft {
    pub text: String,
}

impl CommentDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.text.trim().is_empty() {
            return Err(DomainError::Validation(
                "comment text must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// A comment as listed under its post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentEntry {
    #[serde(flatten)]
    pub comment: Comment,
    pub author_username: String,
}
