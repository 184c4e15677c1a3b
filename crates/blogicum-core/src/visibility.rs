//! Which posts a viewer is allowed to see.
//!
//! There are two modes. [`Visibility::Owner`] applies no filtering and is
//! granted only to the author of the record being looked at. Everyone else,
//! anonymous visitors included, gets [`Visibility::Public`]: the post must be
//! published, its `pub_date` must have passed, and its category (when set)
//! must be published too.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Category, Post};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public { now: DateTime<Utc> },
    Owner,
}

impl Visibility {
    /// Public mode evaluated at the current instant.
    pub fn public() -> Self {
        Self::Public { now: Utc::now() }
    }

    /// Owner mode only when the viewer is the owner.
    pub fn for_viewer(viewer: Option<Uuid>, owner: Uuid) -> Self {
        match viewer {
            Some(id) if id == owner => Self::Owner,
            _ => Self::public(),
        }
    }

    pub fn is_owner(&self) -> bool {
        matches!(self, Self::Owner)
    }

    /// `category` must be the post's category when `post.category_id` is set.
    pub fn admits(&self, post: &Post, category: Option<&Category>) -> bool {
        match self {
            Self::Owner => true,
            Self::Public { now } => {
                post.publication.is_published
                    && post.pub_date <= *now
                    && category.is_none_or(Category::is_published)
            }
        }
    }
}

/// Scope of a post listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostQuery {
    pub visibility: Visibility,
    pub author_id: Option<Uuid>,
    pub category_id: Option<i64>,
}

impl PostQuery {
    pub fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            author_id: None,
            category_id: None,
        }
    }

    pub fn by_author(mut self, author_id: Uuid) -> Self {
        self.author_id = Some(author_id);
        self
    }

    pub fn in_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Visibility plus the author/category scope.
    pub fn matches(&self, post: &Post, category: Option<&Category>) -> bool {
        self.author_id.is_none_or(|a| post.author_id == a)
            && self.category_id.is_none_or(|c| post.category_id == Some(c))
            && self.visibility.admits(post, category)
    }
}
