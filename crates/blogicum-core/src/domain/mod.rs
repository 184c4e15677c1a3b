//! Domain entities - the core business objects.

mod category;
mod comment;
mod location;
mod post;
mod publication;
mod summary;
mod user;

pub use category::{Category, CategoryDraft};
pub use comment::{Comment, CommentDraft, CommentEntry};
pub use location::{Location, LocationDraft};
pub use post::{Post, PostDraft};
pub use publication::Publication;
pub use summary::{CategoryRef, LocationRef, PostSummary};
pub use user::{MAX_USERNAME_LEN, ProfileUpdate, PublicProfile, User, validate_username};

/// Maximum length of short text fields (titles and names).
pub const MAX_TITLE_LEN: usize = 256;
