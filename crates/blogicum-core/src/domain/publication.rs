use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publication state shared by categories, locations and posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Publication {
    /// A published record created now.
    pub fn new() -> Self {
        Self::with_flag(true)
    }

    pub fn with_flag(is_published: bool) -> Self {
        Self {
            is_published,
            created_at: Utc::now(),
        }
    }
}

impl Default for Publication {
    fn default() -> Self {
        Self::new()
    }
}
