//! Read models assembled by the listing and detail queries.

use serde::{Deserialize, Serialize};

use super::{Category, Location, Post};

/// Category as shown next to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub title: String,
    pub slug: String,
}

impl From<&Category> for CategoryRef {
    fn from(category: &Category) -> Self {
        Self {
            title: category.title.clone(),
            slug: category.slug.clone(),
        }
    }
}

/// Location as shown next to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRef {
    pub name: String,
}

impl LocationRef {
    /// Unpublished locations are not shown at all.
    pub fn visible(location: &Location) -> Option<Self> {
        location.publication.is_published.then(|| Self {
            name: location.name.clone(),
        })
    }
}

/// A post together with its related names and the number of comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub post: Post,
    pub author_username: String,
    pub category: Option<CategoryRef>,
    pub location: Option<LocationRef>,
    pub comment_count: u64,
}
