//! Application services built on the domain ports.

mod post_service;

pub use post_service::{MAX_PAGE_SIZE, PostService};
