//! Request extractors and error rendering.

pub mod auth;
pub mod error;
