use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DbConn, EntityTrait, JoinType, LoaderTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

use fable_core::domain::Post;
use fable_core::error::RepoError;
use fable_core::ports::{BaseRepository, PostFilter, PostPage, PostRepository};

use super::map_db_err;
use crate::database::entity::{
    category::{self, Entity as CategoryEntity},
    post::{self, Entity as PostEntity},
    post_category::{self, Entity as PostCategoryEntity},
    post_tag::{self, Entity as PostTagEntity},
    tag::{self, Entity as TagEntity},
};

/// PostgreSQL post repository: scalar columns on `posts`, associations
/// through the `post_tags` / `post_categories` link tables.
pub struct PostgresPostRepository {
    db: Arc<DbConn>,
}

impl PostgresPostRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }

    /// Attach tags and categories to a batch of loaded rows.
    async fn with_associations(&self, models: Vec<post::Model>) -> Result<Vec<Post>, RepoError> {
        let tags = models
            .load_many_to_many(TagEntity, PostTagEntity, self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        let categories = models
            .load_many_to_many(CategoryEntity, PostCategoryEntity, self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(models
            .into_iter()
            .zip(tags)
            .zip(categories)
            .map(|((model, tags), categories)| {
                let mut post: Post = model.into();
                post.tags = tags.into_iter().map(Into::into).collect();
                post.categories = categories.into_iter().map(Into::into).collect();
                post
            })
            .collect())
    }

    /// Rewrite the link rows to match the post's loaded associations.
    async fn sync_links(&self, entity: &Post) -> Result<(), RepoError> {
        PostTagEntity::delete_many()
            .filter(post_tag::Column::PostId.eq(entity.id))
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        PostCategoryEntity::delete_many()
            .filter(post_category::Column::PostId.eq(entity.id))
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        if !entity.tags.is_empty() {
            let links = entity.tags.iter().map(|t| post_tag::ActiveModel {
                post_id: Set(entity.id),
                tag_id: Set(t.id),
            });
            PostTagEntity::insert_many(links)
                .exec(self.db.as_ref())
                .await
                .map_err(map_db_err)?;
        }

        if !entity.categories.is_empty() {
            let links = entity
                .categories
                .iter()
                .map(|c| post_category::ActiveModel {
                    post_id: Set(entity.id),
                    category_id: Set(c.id),
                });
            PostCategoryEntity::insert_many(links)
                .exec(self.db.as_ref())
                .await
                .map_err(map_db_err)?;
        }

        Ok(())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for PostgresPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let Some(model) = PostEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let mut posts = self.with_associations(vec![model]).await?;
        Ok(posts.pop())
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let active: post::ActiveModel = entity.clone().into();

        // `date` is immutable after creation, so it is excluded from the
        // conflict update set.
        PostEntity::insert(active)
            .on_conflict(
                OnConflict::column(post::Column::Id)
                    .update_columns([
                        post::Column::Title,
                        post::Column::Body,
                        post::Column::AuthorId,
                        post::Column::Status,
                        post::Column::CoverImage,
                    ])
                    .to_owned(),
            )
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        self.sync_links(&entity).await?;

        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        // FK cascades remove comments, images, and link rows.
        let result = PostEntity::delete_by_id(id)
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
impl PostRepository for PostgresPostRepository {
    async fn find_page(
        &self,
        filter: &PostFilter,
        page: u64,
        page_size: u64,
    ) -> Result<PostPage, RepoError> {
        let mut select = PostEntity::find();

        match filter {
            PostFilter::All => {}
            PostFilter::Tag(slug) => {
                select = select
                    .join(JoinType::InnerJoin, post::Relation::PostTags.def())
                    .join(JoinType::InnerJoin, post_tag::Relation::Tag.def())
                    .filter(tag::Column::Slug.eq(slug.as_str()));
            }
            PostFilter::Category(slug) => {
                select = select
                    .join(JoinType::InnerJoin, post::Relation::PostCategories.def())
                    .join(JoinType::InnerJoin, post_category::Relation::Category.def())
                    .filter(category::Column::Slug.eq(slug.as_str()));
            }
        }

        let paginator = select
            .order_by_desc(post::Column::Date)
            .order_by_desc(post::Column::Id)
            .paginate(self.db.as_ref(), page_size);

        let total = paginator.num_items().await.map_err(map_db_err)?;
        let models = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(map_db_err)?;

        Ok(PostPage {
            items: self.with_associations(models).await?,
            page,
            page_size,
            total,
        })
    }

    async fn find_latest(&self, n: u64) -> Result<Vec<Post>, RepoError> {
        let models = PostEntity::find()
            .order_by_desc(post::Column::Date)
            .order_by_desc(post::Column::Id)
            .limit(n)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        self.with_associations(models).await
    }
}
