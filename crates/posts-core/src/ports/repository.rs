use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewPost, Page, Post};
use crate::error::RepoError;

/// Post persistence port.
///
/// Deleted posts are tombstoned, not erased. Every method addressed by id, as
/// well as `list_page` and its total, must skip tombstoned rows.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Store a new post. The implementation assigns the id.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Fetch a live post, or `RepoError::NotFound`.
    async fn fetch_by_id(&self, id: Uuid) -> Result<Post, RepoError>;

    /// Up to `limit` live posts, newest `created_at` first, skipping `offset`.
    async fn list_page(&self, offset: u64, limit: u64) -> Result<Page<Post>, RepoError>;

    /// Overwrite the stored state of a live post with the same id.
    async fn update(&self, post: &Post) -> Result<(), RepoError>;

    /// Tombstone a live post.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}
