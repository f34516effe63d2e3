//! Typed clients for the `posts`, `categories` and `tags` endpoints.
//!
//! Each resource exposes `list`, `get`, `create`, `update` and `delete`.
//! Responses are unwrapped from their `{ data }` / `{ message }` envelopes.

mod categories;
mod client;
mod error;
mod posts;
mod tags;

pub use categories::CategoriesApi;
pub use client::HttpClient;
pub use error::ApiError;
pub use posts::{PostListParams, PostsApi};
pub use tags::TagsApi;
