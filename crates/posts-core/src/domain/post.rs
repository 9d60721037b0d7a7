use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - represents a blog post or article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Apply a partial update and refresh `updated_at`.
    ///
    /// Empty or absent patch fields leave the current value in place. The
    /// timestamp never moves before `created_at`, even with a skewed clock.
    pub fn apply(&mut self, patch: PostPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title.filter(|t| !t.is_empty()) {
            self.title = title;
        }
        if let Some(content) = patch.content.filter(|c| !c.is_empty()) {
            self.content = content;
        }
        self.updated_at = now.max(self.created_at);
    }
}

/// A post that has not been persisted yet.
///
/// There is no `id` here: the repository assigns one when it stores the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewPost {
    /// Create a new post stamped with `now` for both timestamps.
    pub fn new(title: String, content: String, author_id: String, now: DateTime<Utc>) -> Self {
        Self {
            title,
            content,
            author_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a storage-assigned id.
    pub fn with_id(self, id: Uuid) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            author_id: self.author_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Field-level changes for an update. `None` and `Some("")` both mean "keep".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// One window of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Count of all matching records, independent of the window.
    pub total: u64,
}
