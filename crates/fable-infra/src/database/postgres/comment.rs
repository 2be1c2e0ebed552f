use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use fable_core::domain::Comment;
use fable_core::error::RepoError;
use fable_core::ports::CommentRepository;

use super::map_db_err;
use crate::database::entity::comment::{self, Entity as CommentEntity};

/// PostgreSQL comment repository.
pub struct PostgresCommentRepository {
    db: Arc<DbConn>,
}

impl PostgresCommentRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn insert(&self, entity: Comment) -> Result<Comment, RepoError> {
        let saved = entity.clone();
        let active: comment::ActiveModel = entity.into();

        CommentEntity::insert(active)
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(saved)
    }

    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_for_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .count(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }
}
