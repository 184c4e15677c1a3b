//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use blogicum_core::domain::{
    Category, CategoryDraft, Comment, CommentEntry, Location, LocationDraft, Post, PostDraft,
    PostSummary, ProfileUpdate, User,
};
use blogicum_core::error::RepoError;
use blogicum_core::pagination::{Page, PageRequest};
use blogicum_core::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PostRepository, UserRepository,
};
use blogicum_core::visibility::{PostQuery, Visibility};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::location::{self, Entity as LocationEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};
use super::query::{summarize, visible_posts};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL location repository.
pub type PostgresLocationRepository = PostgresBaseRepository<LocationEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// Mask an email address for logging to avoid PII in logs.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let masked_local = match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{first}***"),
                _ => "***".to_string(),
            };
            format!("{masked_local}@{domain}")
        }
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, user: User) -> Result<User, RepoError> {
        let active: user::ActiveModel = user.into();
        let model = active.insert(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<User, RepoError> {
        let mut active = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?
            .into_active_model();

        active.username = Set(update.username);
        active.email = Set(update.email);
        active.first_name = Set(update.first_name);
        active.last_name = Set(update.last_name);
        active.updated_at = Set(Utc::now().into());

        let model = active.update(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, draft: CategoryDraft) -> Result<Category, RepoError> {
        let active = category::ActiveModel {
            id: NotSet,
            title: Set(draft.title),
            description: Set(draft.description),
            slug: Set(draft.slug),
            is_published: Set(draft.is_published),
            created_at: Set(Utc::now().into()),
        };
        let model = active.insert(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }
}

#[async_trait]
impl LocationRepository for PostgresLocationRepository {
    async fn create(&self, draft: LocationDraft) -> Result<Location, RepoError> {
        let active = location::ActiveModel {
            id: NotSet,
            name: Set(draft.name),
            is_published: Set(draft.is_published),
            created_at: Set(Utc::now().into()),
        };
        let model = active.insert(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_visible(
        &self,
        id: i64,
        visibility: Visibility,
    ) -> Result<Option<PostSummary>, RepoError> {
        let model = visible_posts(&PostQuery::new(visibility))
            .filter(post::Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        match model {
            Some(model) => Ok(summarize(&self.db, vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list(
        &self,
        query: PostQuery,
        page: PageRequest,
    ) -> Result<Page<PostSummary>, RepoError> {
        let paginator = visible_posts(&query)
            .order_by_desc(post::Column::PubDate)
            .order_by_desc(post::Column::Id)
            .paginate(&self.db, page.size);

        let total = paginator.num_items().await.map_err(map_db_err)?;
        let models = paginator
            .fetch_page(page.number.saturating_sub(1))
            .await
            .map_err(map_db_err)?;

        tracing::debug!(
            page = page.number,
            total,
            fetched = models.len(),
            "Listed posts"
        );

        let items = summarize(&self.db, models).await?;
        Ok(Page::new(items, page, total))
    }

    async fn create(&self, author_id: Uuid, draft: PostDraft) -> Result<Post, RepoError> {
        let active = post::ActiveModel {
            id: NotSet,
            title: Set(draft.title),
            text: Set(draft.text),
            pub_date: Set(draft.pub_date.into()),
            author_id: Set(author_id),
            location_id: Set(draft.location_id),
            category_id: Set(draft.category_id),
            image: Set(draft.image),
            is_published: Set(draft.is_published),
            created_at: Set(Utc::now().into()),
        };
        let model = active.insert(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, id: i64, draft: PostDraft) -> Result<Post, RepoError> {
        let mut active = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?
            .into_active_model();

        active.title = Set(draft.title);
        active.text = Set(draft.text);
        active.pub_date = Set(draft.pub_date.into());
        active.location_id = Set(draft.location_id);
        active.category_id = Set(draft.category_id);
        active.image = Set(draft.image);
        active.is_published = Set(draft.is_published);

        let model = active.update(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn list_for_post(&self, post_id: i64) -> Result<Vec<CommentEntry>, RepoError> {
        let rows = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .find_also_related(UserEntity)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .map(|(comment, author)| CommentEntry {
                comment: comment.into(),
                author_username: author.map(|u| u.username).unwrap_or_default(),
            })
            .collect())
    }

    async fn create(
        &self,
        post_id: i64,
        author_id: Uuid,
        text: String,
    ) -> Result<Comment, RepoError> {
        let active = comment::ActiveModel {
            id: NotSet,
            text: Set(text),
            post_id: Set(post_id),
            author_id: Set(author_id),
            created_at: Set(Utc::now().into()),
        };
        let model = active.insert(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, id: i64, text: String) -> Result<Comment, RepoError> {
        let mut active = CommentEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?
            .into_active_model();

        active.text = Set(text);

        let model = active.update(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }
}

#[cfg(test)]
mod tests {
    use super::mask_email;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("writer@example.com"), "w***@example.com");
        assert_eq!(mask_email("a@example.com"), "***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
