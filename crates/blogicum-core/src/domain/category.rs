use serde::{Deserialize, Serialize};

use super::{MAX_TITLE_LEN, Publication};
use crate::error::DomainError;

/// Category entity - a thematic grouping of posts addressed by slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub slug: String,
    #[serde(flatten)]
    pub publication: Publication,
}

impl Category {
    pub fn is_published(&self) -> bool {
        self.publication.is_published
    }
}

/// Input for creating a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
}

impl CategoryDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() || self.title.chars().count() > MAX_TITLE_LEN {
            return Err(DomainError::Validation(format!(
                "category title must be 1..={MAX_TITLE_LEN} characters"
            )));
        }
        if self.description.trim().is_empty() {
            return Err(DomainError::Validation(
                "category description must not be empty".to_string(),
            ));
        }
        let slug_ok = !self.slug.is_empty()
            && self
                .slug
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !slug_ok {
            return Err(DomainError::Validation(
                "slug may only contain latin letters, digits, hyphens and underscores".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(slug: &str) -> CategoryDraft {
        CategoryDraft {
            title: "Travel".to_string(),
            description: "Trips and routes".to_string(),
            slug: slug.to_string(),
            is_published: true,
        }
    }

    #[test]
    fn test_slug_accepts_latin_digits_hyphen_underscore() {
        assert!(draft("travel_2024-summer").validate().is_ok());
    }

    #[test]
    fn test_slug_rejects_other_characters() {
        assert!(draft("путешествия").validate().is_err());
        assert!(draft("with space").validate().is_err());
        assert!(draft("").validate().is_err());
    }
}
