use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    Category, CategoryDraft, Comment, CommentEntry, Location, LocationDraft, Post, PostDraft,
    PostSummary, ProfileUpdate, User,
};
use crate::error::RepoError;
use crate::pagination::{Page, PageRequest};
use crate::visibility::{PostQuery, Visibility};

/// Generic repository trait defining lookup and removal by primary key.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn create(&self, user: User) -> Result<User, RepoError>;

    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<User, RepoError>;
}

/// Category repository. Deleting a category detaches its posts.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, i64> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;

    async fn create(&self, draft: CategoryDraft) -> Result<Category, RepoError>;
}

/// Location repository. Deleting a location detaches its posts.
#[async_trait]
pub trait LocationRepository: BaseRepository<Location, i64> {
    async fn create(&self, draft: LocationDraft) -> Result<Location, RepoError>;
}

/// Post repository.
///
/// `find_by_id` is unfiltered; the `*_visible` / `list` methods apply a
/// [`Visibility`] and attach comment counts.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    async fn find_visible(
        &self,
        id: i64,
        visibility: Visibility,
    ) -> Result<Option<PostSummary>, RepoError>;

    /// Matching posts, newest `pub_date` first.
    async fn list(
        &self,
        query: PostQuery,
        page: PageRequest,
    ) -> Result<Page<PostSummary>, RepoError>;

    async fn create(&self, author_id: Uuid, draft: PostDraft) -> Result<Post, RepoError>;

    async fn update(&self, id: i64, draft: PostDraft) -> Result<Post, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, i64> {
    /// Comments on a post, oldest first.
    async fn list_for_post(&self, post_id: i64) -> Result<Vec<CommentEntry>, RepoError>;

    async fn create(
        &self,
        post_id: i64,
        author_id: Uuid,
        text: String,
    ) -> Result<Comment, RepoError>;

    async fn update(&self, id: i64, text: String) -> Result<Comment, RepoError>;
}
