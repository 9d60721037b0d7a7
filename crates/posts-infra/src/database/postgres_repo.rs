//! PostgreSQL post repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use posts_core::domain::{NewPost, Page, Post};
use posts_core::error::RepoError;
use posts_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};

/// PostgreSQL post repository.
///
/// Deletion writes `deleted_at`; every read and write below filters on it
/// explicitly.
pub struct PostgresPostRepository {
    pub(super) db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    fn live() -> Select<PostEntity> {
        PostEntity::find().filter(post::Column::DeletedAt.is_null())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let post = new_post.with_id(Uuid::new_v4());
        tracing::debug!(post_id = %post.id, author_id = %post.author_id, "Inserting post");

        let model = post::ActiveModel::from(post)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Post, RepoError> {
        let model = Self::live()
            .filter(post::Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        model.map(Into::into).ok_or(RepoError::NotFound)
    }

    async fn list_page(&self, offset: u64, limit: u64) -> Result<Page<Post>, RepoError> {
        let total = Self::live().count(&self.db).await.map_err(map_db_err)?;

        let models = Self::live()
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(offset, limit, total, "Listed posts");
        Ok(Page {
            items: models.into_iter().map(Into::into).collect(),
            total,
        })
    }

    async fn update(&self, post: &Post) -> Result<(), RepoError> {
        let result = PostEntity::update_many()
            .col_expr(post::Column::Title, Expr::value(post.title.clone()))
            .col_expr(post::Column::Content, Expr::value(post.content.clone()))
            .col_expr(post::Column::AuthorId, Expr::value(post.author_id.clone()))
            .col_expr(
                post::Column::UpdatedAt,
                Expr::value(DateTimeWithTimeZone::from(post.updated_at)),
            )
            .filter(post::Column::Id.eq(post.id))
            .filter(post::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let deleted_at = DateTimeWithTimeZone::from(Utc::now());
        let result = PostEntity::update_many()
            .col_expr(post::Column::DeletedAt, Expr::value(deleted_at))
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        tracing::debug!(post_id = %id, "Post tombstoned");
        Ok(())
    }
}

fn map_db_err(err: DbErr) -> RepoError {
    match &err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        _ => {
            let err_str = err.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint(err_str)
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}
