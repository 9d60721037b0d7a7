use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, Value};
use uuid::Uuid;

use posts_core::domain::{NewPost, Post};
use posts_core::error::RepoError;
use posts_core::ports::PostRepository;

use crate::database::entity::post;
use crate::database::postgres_repo::PostgresPostRepository;

fn model(title: &str, at: DateTime<Utc>) -> post::Model {
    post::Model {
        id: Uuid::new_v4(),
        title: title.to_owned(),
        content: "Content".to_owned(),
        author_id: "author-1".to_owned(),
        created_at: at.into(),
        updated_at: at.into(),
        deleted_at: None,
    }
}

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}

fn exec_result(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let now = Utc::now();
    let stored = model("Test Post", now);
    let post_id = stored.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![stored]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post: Post = repo.fetch_by_id(post_id).await.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.created_at, now);
}

#[tokio::test]
async fn test_fetch_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = repo.fetch_by_id(Uuid::new_v4()).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_fetch_filters_tombstones() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let _ = repo.fetch_by_id(Uuid::new_v4()).await;

    let log = format!("{:?}", repo.db.into_transaction_log());
    assert!(log.contains("deleted_at"));
    assert!(log.contains("IS NULL"));
}

#[tokio::test]
async fn test_create_returns_inserted_post() {
    let now = Utc::now();
    let returned = model("Hello", now);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![returned.clone()]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let new_post = NewPost::new(
        "Hello".to_owned(),
        "Content".to_owned(),
        "author-1".to_owned(),
        now,
    );

    let post = repo.create(new_post).await.unwrap();
    assert_eq!(post.id, returned.id);
    assert_eq!(post.title, "Hello");
    assert_eq!(post.author_id, "author-1");
}

#[tokio::test]
async fn test_list_page_returns_items_and_total() {
    let now = Utc::now();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![count_row(7)]])
        .append_query_results(vec![vec![model("newer", now), model("older", now)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let page = repo.list_page(0, 2).await.unwrap();
    assert_eq!(page.total, 7);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].title, "newer");
}

#[tokio::test]
async fn test_update_without_matching_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![exec_result(0)])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post: Post = model("ghost", Utc::now()).into();

    assert!(matches!(repo.update(&post).await, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_update_matching_row_succeeds() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![exec_result(1)])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post: Post = model("present", Utc::now()).into();

    repo.update(&post).await.unwrap();
}

#[tokio::test]
async fn test_delete_sets_tombstone() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![exec_result(1)])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    repo.delete(Uuid::new_v4()).await.unwrap();

    let log = format!("{:?}", repo.db.into_transaction_log());
    assert!(log.contains("UPDATE"));
    assert!(log.contains("deleted_at"));
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![exec_result(0)])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(matches!(
        repo.delete(Uuid::new_v4()).await,
        Err(RepoError::NotFound)
    ));
}

#[tokio::test]
async fn test_query_failure_maps_to_query_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors(vec![DbErr::Custom("relation does not exist".to_owned())])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    match repo.fetch_by_id(Uuid::new_v4()).await {
        Err(RepoError::Query(msg)) => assert!(msg.contains("relation does not exist")),
        other => panic!("expected query error, got {other:?}"),
    }
}
