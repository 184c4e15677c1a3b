//! Read and write flows over the repositories.
//!
//! [`BlogService`] is what the HTTP layer talks to: the query side assembles
//! feeds and detail pages under the right [`Visibility`](crate::visibility::Visibility),
//! the mutation side enforces ownership and reports where to redirect.

mod mutation;
mod query;

use std::sync::Arc;

use crate::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PostRepository, UserRepository,
};

pub use mutation::{Mutation, Redirect};
pub use query::{CategoryFeed, PostDetail, ProfileFeed};

/// Blog application service.
#[derive(Clone)]
pub struct BlogService {
    users: Arc<dyn UserRepository>,
    categories: Arc<dyn CategoryRepository>,
    locations: Arc<dyn LocationRepository>,
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl BlogService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        categories: Arc<dyn CategoryRepository>,
        locations: Arc<dyn LocationRepository>,
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            users,
            categories,
            locations,
            posts,
            comments,
        }
    }

    pub fn users(&self) -> &Arc<dyn UserRepository> {
        &self.users
    }
}
