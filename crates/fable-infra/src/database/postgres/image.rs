use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use fable_core::domain::Image;
use fable_core::error::RepoError;
use fable_core::ports::ImageRepository;

use super::map_db_err;
use crate::database::entity::image::{self, Entity as ImageEntity};

/// PostgreSQL image repository.
pub struct PostgresImageRepository {
    db: Arc<DbConn>,
}

impl PostgresImageRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ImageRepository for PostgresImageRepository {
    async fn insert(&self, entity: Image) -> Result<Image, RepoError> {
        let saved = entity.clone();
        let active: image::ActiveModel = entity.into();

        ImageEntity::insert(active)
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(saved)
    }

    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Image>, RepoError> {
        let result = ImageEntity::find()
            .filter(image::Column::PostId.eq(post_id))
            .order_by_asc(image::Column::UploadedAt)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn first_for_post(&self, post_id: Uuid) -> Result<Option<Image>, RepoError> {
        let result = ImageEntity::find()
            .filter(image::Column::PostId.eq(post_id))
            .order_by_asc(image::Column::UploadedAt)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}
