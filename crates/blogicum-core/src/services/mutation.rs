use uuid::Uuid;

use super::BlogService;
use crate::domain::{Comment, CommentDraft, Post, PostDraft, ProfileUpdate};
use crate::error::DomainError;
use crate::ports::BaseRepository;

/// Where the client is sent after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    PostDetail { post_id: i64 },
    Profile { username: String },
}

/// Result of a mutation attempt.
///
/// A non-owner's attempt is `Denied` but still only carries a redirect;
/// callers must not turn it into an error response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Applied(Redirect),
    Denied(Redirect),
}

impl Mutation {
    pub fn redirect(&self) -> &Redirect {
        match self {
            Mutation::Applied(r) | Mutation::Denied(r) => r,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Mutation::Applied(_))
    }
}

impl BlogService {
    pub async fn create_post(&self, actor: Uuid, draft: PostDraft) -> Result<Mutation, DomainError> {
        self.check_references(&draft).await?;

        let post = self.posts.create(actor, draft).await?;
        tracing::debug!(post_id = post.id, user_id = %actor, "Post created");

        Ok(Mutation::Applied(self.profile_redirect(actor).await?))
    }

    pub async fn update_post(
        &self,
        actor: Uuid,
        post_id: i64,
        draft: PostDraft,
    ) -> Result<Mutation, DomainError> {
        let post = self.existing_post(post_id).await?;
        let redirect = Redirect::PostDetail { post_id };
        if !post.is_owned_by(actor) {
            tracing::info!(post_id, user_id = %actor, "Post update denied: not the author");
            return Ok(Mutation::Denied(redirect));
        }

        self.check_references(&draft).await?;
        self.posts.update(post_id, draft).await?;
        tracing::debug!(post_id, user_id = %actor, "Post updated");

        Ok(Mutation::Applied(redirect))
    }

    pub async fn delete_post(&self, actor: Uuid, post_id: i64) -> Result<Mutation, DomainError> {
        let post = self.existing_post(post_id).await?;
        if !post.is_owned_by(actor) {
            tracing::info!(post_id, user_id = %actor, "Post deletion denied: not the author");
            return Ok(Mutation::Denied(Redirect::PostDetail { post_id }));
        }

        self.posts.delete(post_id).await?;
        tracing::debug!(post_id, user_id = %actor, "Post deleted");

        Ok(Mutation::Applied(self.profile_redirect(actor).await?))
    }

    /// Always edits the actor's own profile.
    pub async fn update_profile(
        &self,
        actor: Uuid,
        update: ProfileUpdate,
    ) -> Result<Mutation, DomainError> {
        update.validate()?;

        let user = self.users.update_profile(actor, update).await?;
        tracing::debug!(user_id = %actor, "Profile updated");

        Ok(Mutation::Applied(Redirect::Profile {
            username: user.username,
        }))
    }

    pub async fn create_comment(
        &self,
        actor: Uuid,
        post_id: i64,
        draft: CommentDraft,
    ) -> Result<Mutation, DomainError> {
        self.existing_post(post_id).await?;
        draft.validate()?;

        let comment = self.comments.create(post_id, actor, draft.text).await?;
        tracing::debug!(post_id, comment_id = comment.id, user_id = %actor, "Comment added");

        Ok(Mutation::Applied(Redirect::PostDetail { post_id }))
    }

    pub async fn update_comment(
        &self,
        actor: Uuid,
        post_id: i64,
        comment_id: i64,
        draft: CommentDraft,
    ) -> Result<Mutation, DomainError> {
        let comment = self.comment_under(post_id, comment_id).await?;
        let redirect = Redirect::PostDetail { post_id };
        if comment.author_id != actor {
            tracing::info!(comment_id, user_id = %actor, "Comment update denied: not the author");
            return Ok(Mutation::Denied(redirect));
        }

        draft.validate()?;
        self.comments.update(comment_id, draft.text).await?;

        Ok(Mutation::Applied(redirect))
    }

    pub async fn delete_comment(
        &self,
        actor: Uuid,
        post_id: i64,
        comment_id: i64,
    ) -> Result<Mutation, DomainError> {
        let comment = self.comment_under(post_id, comment_id).await?;
        let redirect = Redirect::PostDetail { post_id };
        if comment.author_id != actor {
            tracing::info!(comment_id, user_id = %actor, "Comment deletion denied: not the author");
            return Ok(Mutation::Denied(redirect));
        }

        self.comments.delete(comment_id).await?;

        Ok(Mutation::Applied(redirect))
    }

    /// Unfiltered lookup; ownership is checked by the caller.
    async fn existing_post(&self, post_id: i64) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))
    }

    async fn comment_under(&self, post_id: i64, comment_id: i64) -> Result<Comment, DomainError> {
        self.comments
            .find_by_id(comment_id)
            .await?
            .filter(|c| c.post_id == post_id)
            .ok_or_else(|| DomainError::not_found("comment", comment_id))
    }

    async fn profile_redirect(&self, actor: Uuid) -> Result<Redirect, DomainError> {
        let user = self
            .users
            .find_by_id(actor)
            .await?
            .ok_or_else(|| DomainError::not_found("user", actor))?;
        Ok(Redirect::Profile {
            username: user.username,
        })
    }

    async fn check_references(&self, draft: &PostDraft) -> Result<(), DomainError> {
        draft.validate()?;
        if let Some(id) = draft.category_id {
            if self.categories.find_by_id(id).await?.is_none() {
                return Err(DomainError::Validation(format!("unknown category {id}")));
            }
        }
        if let Some(id) = draft.location_id {
            if self.locations.find_by_id(id).await?.is_none() {
                return Err(DomainError::Validation(format!("unknown location {id}")));
            }
        }
        Ok(())
    }
}
