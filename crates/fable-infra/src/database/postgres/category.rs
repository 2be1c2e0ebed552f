use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use fable_core::domain::Category;
use fable_core::error::RepoError;
use fable_core::ports::{BaseRepository, CategoryRepository};

use super::map_db_err;
use crate::database::entity::category::{self, Entity as CategoryEntity};

/// PostgreSQL category repository. The unique index on `slug` backs the
/// allocator's retry loop: a raced insert surfaces as `Constraint`.
pub struct PostgresCategoryRepository {
    db: Arc<DbConn>,
}

impl PostgresCategoryRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BaseRepository<Category, Uuid> for PostgresCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, entity: Category) -> Result<Category, RepoError> {
        let saved = entity.clone();
        let active: category::ActiveModel = entity.into();

        // Conflict target is the primary key; a slug collision still raises
        // the unique violation and comes back as Constraint.
        CategoryEntity::insert(active)
            .on_conflict(
                OnConflict::column(category::Column::Id)
                    .update_columns([category::Column::Name, category::Column::Slug])
                    .to_owned(),
            )
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(saved)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        // Only link rows cascade; posts stay.
        let result = CategoryEntity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list_all(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .order_by_asc(category::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError> {
        let count = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .count(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(count > 0)
    }

    async fn insert(&self, entity: Category) -> Result<Category, RepoError> {
        let saved = entity.clone();
        let active: category::ActiveModel = entity.into();

        CategoryEntity::insert(active)
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(saved)
    }
}
