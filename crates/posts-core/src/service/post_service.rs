//! Post service - validation, orchestration and error mapping for posts.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use crate::domain::{NewPost, Page, Post, PostPatch};
use crate::error::{DomainError, RepoError};
use crate::ports::{Clock, NoopObserver, Operation, PostRepository, ServiceObserver, SystemClock};

/// Largest page a caller may request from `list_posts`.
pub const MAX_PAGE_SIZE: i32 = 100;

/// Post service.
///
/// Holds only shared handles to its ports, so it is cheap to clone into every
/// request handler.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
    observer: Arc<dyn ServiceObserver>,
    clock: Arc<dyn Clock>,
}

impl PostService {
    /// Create a service over `repo` with the system clock and no observer.
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self {
            repo,
            observer: Arc::new(NoopObserver),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ServiceObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Validate and store a new post.
    #[tracing::instrument(skip(self, content))]
    pub async fn create_post(
        &self,
        title: String,
        content: String,
        author_id: String,
    ) -> Result<Post, DomainError> {
        self.observe(Operation::CreatePost, async move {
            require("title", &title)?;
            require("content", &content)?;
            require("author_id", &author_id)?;

            let post = NewPost::new(title, content, author_id, self.clock.now());
            let stored = self
                .repo
                .create(post)
                .await
                .map_err(|e| self.internal(Operation::CreatePost, "failed to create post", e))?;

            self.observer.on_post_created();
            tracing::info!(post_id = %stored.id, title = %stored.title, "Post created");
            Ok(stored)
        })
        .await
    }

    /// Fetch a single post.
    #[tracing::instrument(skip(self))]
    pub async fn get_post(&self, id: &str) -> Result<Post, DomainError> {
        self.observe(Operation::GetPost, async move {
            let post_id = parse_id(id)?;
            self.repo
                .fetch_by_id(post_id)
                .await
                .map_err(|e| self.by_id(Operation::GetPost, "failed to get post", id, e))
        })
        .await
    }

    /// List posts newest first. `page` is zero-indexed.
    #[tracing::instrument(skip(self))]
    pub async fn list_posts(&self, page: i32, page_size: i32) -> Result<Page<Post>, DomainError> {
        self.observe(Operation::ListPosts, async move {
            let (offset, limit) = page_window(page, page_size)?;
            let listed = self
                .repo
                .list_page(offset, limit)
                .await
                .map_err(|e| self.internal(Operation::ListPosts, "failed to list posts", e))?;

            tracing::debug!(returned = listed.items.len(), total = listed.total, "Posts listed");
            Ok(listed)
        })
        .await
    }

    /// Apply a partial update. Empty or absent fields are left unchanged.
    #[tracing::instrument(skip(self, content))]
    pub async fn update_post(
        &self,
        id: &str,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Post, DomainError> {
        self.observe(Operation::UpdatePost, async move {
            let post_id = parse_id(id)?;
            let mut post = self
                .repo
                .fetch_by_id(post_id)
                .await
                .map_err(|e| self.by_id(Operation::UpdatePost, "failed to get post", id, e))?;

            post.apply(PostPatch { title, content }, self.clock.now());

            self.repo
                .update(&post)
                .await
                .map_err(|e| self.by_id(Operation::UpdatePost, "failed to update post", id, e))?;

            tracing::info!(post_id = %post.id, "Post updated");
            Ok(post)
        })
        .await
    }

    /// Delete a post. Returns `true` once the post is gone.
    #[tracing::instrument(skip(self))]
    pub async fn delete_post(&self, id: &str) -> Result<bool, DomainError> {
        self.observe(Operation::DeletePost, async move {
            let post_id = parse_id(id)?;
            self.repo
                .delete(post_id)
                .await
                .map_err(|e| self.by_id(Operation::DeletePost, "failed to delete post", id, e))?;

            tracing::info!(%post_id, "Post deleted");
            Ok(true)
        })
        .await
    }

    async fn observe<T, F>(&self, op: Operation, fut: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        self.observer.on_start(op);
        let started = Instant::now();
        let result = fut.await;
        let elapsed = started.elapsed();

        match &result {
            Ok(_) => self.observer.on_success(op, elapsed),
            Err(err) => {
                if let DomainError::InvalidArgument(reason) = err {
                    tracing::warn!(operation = %op, %reason, "Rejected request");
                }
                self.observer.on_failure(op, err.code(), elapsed);
            }
        }
        result
    }

    /// Map a port failure where "not found" has no meaning for the caller.
    fn internal(&self, op: Operation, action: &str, err: RepoError) -> DomainError {
        self.observer.on_storage_failure(op);
        tracing::error!(operation = %op, error = %err, "Persistence failure");
        DomainError::Internal(format!("{action}: {err}"))
    }

    /// Map a port failure for an operation addressed by id.
    fn by_id(&self, op: Operation, action: &str, id: &str, err: RepoError) -> DomainError {
        match err {
            RepoError::NotFound => DomainError::post_not_found(id),
            other => self.internal(op, action, other),
        }
    }
}

fn require(field: &str, value: &str) -> Result<(), DomainError> {
    if value.is_empty() {
        return Err(DomainError::invalid_argument(format!("{field} is required")));
    }
    Ok(())
}

/// An id that is not a UUID can never match a stored post.
fn parse_id(raw: &str) -> Result<Uuid, DomainError> {
    require("id", raw)?;
    Uuid::parse_str(raw).map_err(|_| DomainError::post_not_found(raw))
}

/// Translate a zero-indexed page request into an `(offset, limit)` window.
fn page_window(page: i32, page_size: i32) -> Result<(u64, u64), DomainError> {
    if page < 0 {
        return Err(DomainError::invalid_argument("page must not be negative"));
    }
    if page_size <= 0 {
        return Err(DomainError::invalid_argument("page_size must be positive"));
    }
    if page_size > MAX_PAGE_SIZE {
        return Err(DomainError::invalid_argument(format!(
            "page_size must not exceed {MAX_PAGE_SIZE}"
        )));
    }

    let limit = page_size as u64;
    Ok((page as u64 * limit, limit))
}
