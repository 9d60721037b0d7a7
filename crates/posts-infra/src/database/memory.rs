//! In-memory post repository - used when no database is configured.

use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use posts_core::domain::{NewPost, Page, Post};
use posts_core::error::RepoError;
use posts_core::ports::PostRepository;

struct StoredPost {
    post: Post,
    /// Insertion order, breaks `created_at` ties in listings.
    seq: u64,
    deleted_at: Option<DateTime<Utc>>,
}

impl StoredPost {
    fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

#[derive(Default)]
struct Store {
    rows: HashMap<Uuid, StoredPost>,
    next_seq: u64,
}

/// In-memory post repository using a HashMap with async RwLock.
///
/// Deleted posts stay in the map as tombstones.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store::default()),
        }
    }

    /// Whether `id` names a post that was deleted but is still retained.
    pub async fn is_tombstoned(&self, id: Uuid) -> bool {
        let store = self.store.read().await;
        store.rows.get(&id).is_some_and(|row| !row.is_live())
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        let mut id = Uuid::new_v4();
        while store.rows.contains_key(&id) {
            id = Uuid::new_v4();
        }
        let post = new_post.with_id(id);

        let seq = store.next_seq;
        store.next_seq += 1;
        store.rows.insert(
            id,
            StoredPost {
                post: post.clone(),
                seq,
                deleted_at: None,
            },
        );

        Ok(post)
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Post, RepoError> {
        let store = self.store.read().await;
        store
            .rows
            .get(&id)
            .filter(|row| row.is_live())
            .map(|row| row.post.clone())
            .ok_or(RepoError::NotFound)
    }

    async fn list_page(&self, offset: u64, limit: u64) -> Result<Page<Post>, RepoError> {
        let store = self.store.read().await;

        let mut live: Vec<&StoredPost> = store.rows.values().filter(|r| r.is_live()).collect();
        live.sort_by_key(|row| Reverse((row.post.created_at, row.seq)));

        let total = live.len() as u64;
        let items = live
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(|row| row.post.clone())
            .collect();

        Ok(Page { items, total })
    }

    async fn update(&self, post: &Post) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        match store.rows.get_mut(&post.id) {
            Some(row) if row.is_live() => {
                row.post = post.clone();
                Ok(())
            }
            _ => Err(RepoError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        match store.rows.get_mut(&id) {
            Some(row) if row.is_live() => {
                row.deleted_at = Some(Utc::now());
                Ok(())
            }
            _ => Err(RepoError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn new_post(title: &str, at: DateTime<Utc>) -> NewPost {
        NewPost::new(title.to_string(), "content".to_string(), "author".to_string(), at)
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let repo = InMemoryPostRepository::new();
        let now = Utc::now();

        let a = repo.create(new_post("a", now)).await.unwrap();
        let b = repo.create(new_post("b", now)).await.unwrap();

        assert!(!a.id.is_nil());
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_list_orders_newest_first_and_counts_all() {
        let repo = InMemoryPostRepository::new();
        let base = Utc::now();
        for i in 0..5 {
            repo.create(new_post(&format!("p{i}"), base + Duration::seconds(i)))
                .await
                .unwrap();
        }

        let page = repo.list_page(1, 2).await.unwrap();

        assert_eq!(page.total, 5);
        let titles: Vec<_> = page.items.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["p3", "p2"]);
    }

    #[tokio::test]
    async fn test_list_breaks_timestamp_ties_by_insertion() {
        let repo = InMemoryPostRepository::new();
        let now = Utc::now();
        repo.create(new_post("first", now)).await.unwrap();
        repo.create(new_post("second", now)).await.unwrap();

        let page = repo.list_page(0, 10).await.unwrap();

        assert_eq!(page.items[0].title, "second");
        assert_eq!(page.items[1].title, "first");
    }

    #[tokio::test]
    async fn test_list_past_end_is_empty() {
        let repo = InMemoryPostRepository::new();
        repo.create(new_post("only", Utc::now())).await.unwrap();

        let page = repo.list_page(10, 10).await.unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_delete_tombstones_and_hides() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(new_post("gone", Utc::now())).await.unwrap();

        repo.delete(post.id).await.unwrap();

        assert!(repo.is_tombstoned(post.id).await);
        assert!(matches!(
            repo.fetch_by_id(post.id).await,
            Err(RepoError::NotFound)
        ));
        assert!(matches!(repo.update(&post).await, Err(RepoError::NotFound)));
        assert!(matches!(repo.delete(post.id).await, Err(RepoError::NotFound)));
        assert_eq!(repo.list_page(0, 10).await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryPostRepository::new();
        let ghost = new_post("ghost", Utc::now()).with_id(Uuid::new_v4());

        assert!(matches!(repo.update(&ghost).await, Err(RepoError::NotFound)));
        assert!(!repo.is_tombstoned(ghost.id).await);
    }
}
