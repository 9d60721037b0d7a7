//! # Posts Infrastructure
//!
//! Concrete implementations of the ports defined in `posts-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL persistence via SeaORM

pub mod database;
pub mod observability;

pub use database::InMemoryPostRepository;
pub use observability::PostMetrics;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, PostgresPostRepository};
