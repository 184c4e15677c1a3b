//! In-memory blog store - used when no database is configured and in tests.
//!
//! Enforces the same uniqueness constraints and delete rules as the SQL
//! schema: deleting a user or a post cascades, deleting a category or a
//! location only detaches the posts that referenced it.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use blogicum_core::domain::{
    Category, CategoryDraft, CategoryRef, Comment, CommentEntry, Location, LocationDraft,
    LocationRef, Post, PostDraft, PostSummary, ProfileUpdate, Publication, User,
};
use blogicum_core::error::RepoError;
use blogicum_core::pagination::{Page, PageRequest};
use blogicum_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, LocationRepository, PostRepository,
    UserRepository,
};
use blogicum_core::visibility::{PostQuery, Visibility};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    categories: BTreeMap<i64, Category>,
    locations: BTreeMap<i64, Location>,
    posts: BTreeMap<i64, Post>,
    comments: BTreeMap<i64, Comment>,
    last_id: i64,
}

fn duplicate(field: &str) -> RepoError {
    RepoError::Constraint(format!("Entity already exists: {field} must be unique"))
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn category_of(&self, post: &Post) -> Option<&Category> {
        post.category_id.and_then(|id| self.categories.get(&id))
    }

    fn summarize(&self, post: &Post) -> PostSummary {
        PostSummary {
            post: post.clone(),
            author_username: self
                .users
                .get(&post.author_id)
                .map(|u| u.username.clone())
                .unwrap_or_default(),
            category: self.category_of(post).map(CategoryRef::from),
            location: post
                .location_id
                .and_then(|id| self.locations.get(&id))
                .and_then(LocationRef::visible),
            comment_count: self
                .comments
                .values()
                .filter(|c| c.post_id == post.id)
                .count() as u64,
        }
    }

    fn check_user_unique(&self, id: Uuid, username: &str, email: &str) -> Result<(), RepoError> {
        for other in self.users.values().filter(|u| u.id != id) {
            if other.username == username {
                return Err(duplicate("users.username"));
            }
            if other.email == email {
                return Err(duplicate("users.email"));
            }
        }
        Ok(())
    }

    fn check_post_unique(&self, id: Option<i64>, draft: &PostDraft) -> Result<(), RepoError> {
        for other in self.posts.values().filter(|p| Some(p.id) != id) {
            if other.title == draft.title {
                return Err(duplicate("posts.title"));
            }
            if other.text == draft.text {
                return Err(duplicate("posts.text"));
            }
        }
        Ok(())
    }

    fn check_post_references(&self, draft: &PostDraft) -> Result<(), RepoError> {
        if draft
            .category_id
            .is_some_and(|id| !self.categories.contains_key(&id))
        {
            return Err(RepoError::Constraint("Unknown reference: posts.category_id".into()));
        }
        if draft
            .location_id
            .is_some_and(|id| !self.locations.contains_key(&id))
        {
            return Err(RepoError::Constraint("Unknown reference: posts.location_id".into()));
        }
        Ok(())
    }

    fn remove_post(&mut self, id: i64) -> Option<Post> {
        let post = self.posts.remove(&id)?;
        self.comments.retain(|_, c| c.post_id != id);
        Some(post)
    }
}

/// In-memory implementation of every blog repository.
///
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryDatabase {
    tables: RwLock<Tables>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.users.remove(&id).ok_or(RepoError::NotFound)?;

        let owned: Vec<i64> = tables
            .posts
            .values()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        for post_id in owned {
            tables.remove_post(post_id);
        }
        tables.comments.retain(|_, c| c.author_id != id);

        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryDatabase {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.users.contains_key(&user.id) {
            return Err(duplicate("users.id"));
        }
        tables.check_user_unique(user.id, &user.username, &user.email)?;

        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&id) {
            return Err(RepoError::NotFound);
        }
        tables.check_user_unique(id, &update.username, &update.email)?;

        let user = tables.users.get_mut(&id).ok_or(RepoError::NotFound)?;
        user.username = update.username;
        user.email = update.email;
        user.first_name = update.first_name;
        user.last_name = update.last_name;
        user.updated_at = Utc::now();

        Ok(user.clone())
    }
}

#[async_trait]
impl BaseRepository<Category, i64> for InMemoryDatabase {
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, RepoError> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.categories.remove(&id).ok_or(RepoError::NotFound)?;
        for post in tables.posts.values_mut() {
            if post.category_id == Some(id) {
                post.category_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryDatabase {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.values().find(|c| c.slug == slug).cloned())
    }

    async fn create(&self, draft: CategoryDraft) -> Result<Category, RepoError> {
        let mut tables = self.tables.write().await;
        for other in tables.categories.values() {
            if other.title == draft.title {
                return Err(duplicate("categories.title"));
            }
            if other.description == draft.description {
                return Err(duplicate("categories.description"));
            }
            if other.slug == draft.slug {
                return Err(duplicate("categories.slug"));
            }
        }

        let category = Category {
            id: tables.next_id(),
            title: draft.title,
            description: draft.description,
            slug: draft.slug,
            publication: Publication::with_flag(draft.is_published),
        };
        tables.categories.insert(category.id, category.clone());
        Ok(category)
    }
}

#[async_trait]
impl BaseRepository<Location, i64> for InMemoryDatabase {
    async fn find_by_id(&self, id: i64) -> Result<Option<Location>, RepoError> {
        Ok(self.tables.read().await.locations.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.locations.remove(&id).ok_or(RepoError::NotFound)?;
        for post in tables.posts.values_mut() {
            if post.location_id == Some(id) {
                post.location_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl LocationRepository for InMemoryDatabase {
    async fn create(&self, draft: LocationDraft) -> Result<Location, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.locations.values().any(|l| l.name == draft.name) {
            return Err(duplicate("locations.name"));
        }

        let location = Location {
            id: tables.next_id(),
            name: draft.name,
            publication: Publication::with_flag(draft.is_published),
        };
        tables.locations.insert(location.id, location.clone());
        Ok(location)
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryDatabase {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.remove_post(id).ok_or(RepoError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryDatabase {
    async fn find_visible(
        &self,
        id: i64,
        visibility: Visibility,
    ) -> Result<Option<PostSummary>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .get(&id)
            .filter(|p| visibility.admits(p, tables.category_of(p)))
            .map(|p| tables.summarize(p)))
    }

    async fn list(
        &self,
        query: PostQuery,
        page: PageRequest,
    ) -> Result<Page<PostSummary>, RepoError> {
        let tables = self.tables.read().await;
        let mut matching: Vec<&Post> = tables
            .posts
            .values()
            .filter(|p| query.matches(p, tables.category_of(p)))
            .collect();
        matching.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size as usize)
            .map(|p| tables.summarize(p))
            .collect();

        Ok(Page::new(items, page, total))
    }

    async fn create(&self, author_id: Uuid, draft: PostDraft) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&author_id) {
            return Err(RepoError::Constraint("Unknown reference: posts.author_id".into()));
        }
        tables.check_post_unique(None, &draft)?;
        tables.check_post_references(&draft)?;

        let post = Post {
            id: tables.next_id(),
            title: draft.title,
            text: draft.text,
            pub_date: draft.pub_date,
            author_id,
            location_id: draft.location_id,
            category_id: draft.category_id,
            image: draft.image,
            publication: Publication::with_flag(draft.is_published),
        };
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, id: i64, draft: PostDraft) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&id) {
            return Err(RepoError::NotFound);
        }
        tables.check_post_unique(Some(id), &draft)?;
        tables.check_post_references(&draft)?;

        let post = tables.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.title = draft.title;
        post.text = draft.text;
        post.pub_date = draft.pub_date;
        post.location_id = draft.location_id;
        post.category_id = draft.category_id;
        post.image = draft.image;
        post.publication.is_published = draft.is_published;

        Ok(post.clone())
    }
}

#[async_trait]
impl BaseRepository<Comment, i64> for InMemoryDatabase {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, RepoError> {
        Ok(self.tables.read().await.comments.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.comments.remove(&id).ok_or(RepoError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryDatabase {
    async fn list_for_post(&self, post_id: i64) -> Result<Vec<CommentEntry>, RepoError> {
        let tables = self.tables.read().await;
        let mut entries: Vec<CommentEntry> = tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .map(|c| CommentEntry {
                comment: c.clone(),
                author_username: tables
                    .users
                    .get(&c.author_id)
                    .map(|u| u.username.clone())
                    .unwrap_or_default(),
            })
            .collect();
        entries.sort_by(|a, b| {
            a.comment
                .created_at
                .cmp(&b.comment.created_at)
                .then(a.comment.id.cmp(&b.comment.id))
        });

        Ok(entries)
    }

    async fn create(
        &self,
        post_id: i64,
        author_id: Uuid,
        text: String,
    ) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&post_id) || !tables.users.contains_key(&author_id) {
            return Err(RepoError::Constraint("Unknown reference: comments".into()));
        }

        let comment = Comment {
            id: tables.next_id(),
            text,
            post_id,
            author_id,
            created_at: Utc::now(),
        };
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn update(&self, id: i64, text: String) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        let comment = tables.comments.get_mut(&id).ok_or(RepoError::NotFound)?;
        comment.text = text;
        Ok(comment.clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn user(name: &str) -> User {
        User::new(name.to_string(), format!("{name}@example.com"), "hash".to_string())
    }

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            text: format!("{title} body"),
            pub_date: Utc::now() - Duration::hours(1),
            location_id: None,
            category_id: None,
            image: None,
            is_published: true,
        }
    }

    #[tokio::test]
    async fn test_duplicate_username_is_constraint_violation() {
        let db = InMemoryDatabase::new();
        UserRepository::create(&db, user("anna")).await.unwrap();

        let mut other = user("anna");
        other.email = "other@example.com".to_string();
        let result = UserRepository::create(&db, other).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_duplicate_post_title_is_constraint_violation() {
        let db = InMemoryDatabase::new();
        let author = UserRepository::create(&db, user("anna")).await.unwrap();
        PostRepository::create(&db, author.id, draft("Dawn")).await.unwrap();

        let mut again = draft("Dawn");
        again.text = "different body".to_string();
        let result = PostRepository::create(&db, author.id, again).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_own_title() {
        let db = InMemoryDatabase::new();
        let author = UserRepository::create(&db, user("anna")).await.unwrap();
        let post = PostRepository::create(&db, author.id, draft("Dawn")).await.unwrap();

        let mut edit = draft("Dawn");
        edit.is_published = false;
        let updated = PostRepository::update(&db, post.id, edit).await.unwrap();

        assert!(!updated.publication.is_published);
        assert_eq!(updated.author_id, author.id);
    }

    #[tokio::test]
    async fn test_list_orders_by_pub_date_descending() {
        let db = InMemoryDatabase::new();
        let author = UserRepository::create(&db, user("anna")).await.unwrap();

        let mut older = draft("Older");
        older.pub_date = Utc::now() - Duration::days(2);
        PostRepository::create(&db, author.id, older).await.unwrap();
        PostRepository::create(&db, author.id, draft("Newer")).await.unwrap();

        let page = db
            .list(PostQuery::new(Visibility::public()), PageRequest::first())
            .await
            .unwrap();

        let titles: Vec<&str> = page.items.iter().map(|s| s.post.title.as_str()).collect();
        assert_eq!(titles, vec!["Newer", "Older"]);
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let db = InMemoryDatabase::new();
        let result = BaseRepository::<Post, i64>::delete(&db, 42).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }
}
