//! Admin client core for a headless blog API.
//!
//! - [`api`]: typed clients for posts, categories and tags.
//! - [`cache`]: key-addressed query cache with mutation-driven invalidation.
//! - [`application`]: query and mutation services, notifications, and the
//!   posts filter composer.

pub mod api;
pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
