//! # Blogicum Core
//!
//! The domain layer of the Blogicum blog.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, the post visibility rules, pagination, repository ports and the
//! [`BlogService`](services::BlogService) that drives every page and form.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod services;
pub mod visibility;

pub use error::{DomainError, RepoError};
pub use services::{BlogService, Mutation, Redirect};
