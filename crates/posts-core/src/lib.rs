//! # Posts Core
//!
//! The domain layer of the posts service.
//! This crate contains the post model, the ports infrastructure must implement,
//! and the service that orchestrates them. It has no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{Code, DomainError, RepoError};
pub use service::PostService;
