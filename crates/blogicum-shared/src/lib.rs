//! # Blogicum Shared
//!
//! Wire types of the blog API: request bodies, query strings and the
//! response envelopes. Kept free of domain logic so clients can depend on it.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
