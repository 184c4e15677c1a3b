use serde::Serialize;
use uuid::Uuid;

use super::BlogService;
use crate::domain::{Category, CommentDraft, CommentEntry, PostSummary, PublicProfile};
use crate::error::DomainError;
use crate::ports::BaseRepository;
use crate::pagination::{Page, PageRequest};
use crate::visibility::{PostQuery, Visibility};

/// Posts of one published category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryFeed {
    pub category: Category,
    pub posts: Page<PostSummary>,
}

/// Posts of one user, as seen by the current viewer.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileFeed {
    pub profile: PublicProfile,
    pub is_owner: bool,
    pub posts: Page<PostSummary>,
}

/// A single post with its discussion.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub post: PostSummary,
    pub comments: Vec<CommentEntry>,
    pub comment_form: CommentDraft,
}

fn in_range<T>(page: Page<T>) -> Result<Page<T>, DomainError> {
    if page.is_out_of_range() {
        return Err(DomainError::not_found("page", page.number));
    }
    Ok(page)
}

impl BlogService {
    /// Publicly visible posts, newest first.
    pub async fn home_feed(&self, page: PageRequest) -> Result<Page<PostSummary>, DomainError> {
        let posts = self
            .posts
            .list(PostQuery::new(Visibility::public()), page)
            .await?;
        in_range(posts)
    }

    /// Publicly visible posts of a published category.
    pub async fn category_feed(
        &self,
        slug: &str,
        page: PageRequest,
    ) -> Result<CategoryFeed, DomainError> {
        let category = self
            .categories
            .find_by_slug(slug)
            .await?
            .filter(Category::is_published)
            .ok_or_else(|| DomainError::not_found("category", slug))?;

        let query = PostQuery::new(Visibility::public()).in_category(category.id);
        let posts = in_range(self.posts.list(query, page).await?)?;

        Ok(CategoryFeed { category, posts })
    }

    /// All posts for the profile owner, public ones for everybody else.
    pub async fn profile_feed(
        &self,
        username: &str,
        viewer: Option<Uuid>,
        page: PageRequest,
    ) -> Result<ProfileFeed, DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found("user", username))?;

        let visibility = Visibility::for_viewer(viewer, user.id);
        let query = PostQuery::new(visibility).by_author(user.id);
        let posts = in_range(self.posts.list(query, page).await?)?;

        Ok(ProfileFeed {
            profile: user.public_profile(),
            is_owner: visibility.is_owner(),
            posts,
        })
    }

    /// A post, its comments oldest first and a blank comment form.
    ///
    /// Hidden and scheduled posts resolve only for their author.
    pub async fn post_detail(
        &self,
        post_id: i64,
        viewer: Option<Uuid>,
    ) -> Result<PostDetail, DomainError> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))?;

        let visibility = Visibility::for_viewer(viewer, post.author_id);
        let post = self
            .posts
            .find_visible(post_id, visibility)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))?;

        let comments = self.comments.list_for_post(post_id).await?;

        Ok(PostDetail {
            post,
            comments,
            comment_form: CommentDraft::default(),
        })
    }
}
