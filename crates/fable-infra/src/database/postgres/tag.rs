use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder};

use fable_core::domain::Tag;
use fable_core::error::RepoError;
use fable_core::ports::TagRepository;
use fable_core::slug::slugify;

use super::map_db_err;
use crate::database::entity::tag::{self, Entity as TagEntity};

/// PostgreSQL tag repository. Tags are deduplicated by slug.
pub struct PostgresTagRepository {
    db: Arc<DbConn>,
}

impl PostgresTagRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }

    async fn find_by_slug_inner(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(tag::Column::Slug.eq(slug))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn list_all(&self) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .order_by_asc(tag::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        self.find_by_slug_inner(slug).await
    }

    async fn find_or_create(&self, name: &str) -> Result<Tag, RepoError> {
        let slug = slugify(name);

        if let Some(existing) = self.find_by_slug_inner(&slug).await? {
            return Ok(existing);
        }

        let tag = Tag::new(name.to_string());
        let active: tag::ActiveModel = tag.clone().into();

        match TagEntity::insert(active).exec(self.db.as_ref()).await {
            Ok(_) => Ok(tag),
            // Raced creation of the same label: the winner's row is the tag.
            Err(e) => match map_db_err(e) {
                RepoError::Constraint(_) => self
                    .find_by_slug_inner(&slug)
                    .await?
                    .ok_or(RepoError::NotFound),
                other => Err(other),
            },
        }
    }
}
