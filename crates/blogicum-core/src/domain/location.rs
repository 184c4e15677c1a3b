use serde::{Deserialize, Serialize};

use super::{MAX_TITLE_LEN, Publication};
use crate::error::DomainError;

/// Location entity - an optional place attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub publication: Publication,
}

/// Input for creating a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationDraft {
    pub name: String,
    pub is_published: bool,
}

impl LocationDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() || self.name.chars().count() > MAX_TITLE_LEN {
            return Err(DomainError::Validation(format!(
                "location name must be 1..={MAX_TITLE_LEN} characters"
            )));
        }
        Ok(())
    }
}
