//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use fable_core::domain::PostStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub date: DateTimeWithTimeZone,
    pub author_id: Uuid,
    pub status: String,
    pub cover_image: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
    #[sea_orm(has_many = "super::image::Entity")]
    Images,
    #[sea_orm(has_many = "super::post_tag::Entity")]
    PostTags,
    #[sea_orm(has_many = "super::post_category::Entity")]
    PostCategories,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<super::image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

// Many-to-many through the link tables, for the loader.
impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_tag::Relation::Post.def().rev())
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_category::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_category::Relation::Post.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to domain Post.
///
/// Associations start empty; the repository attaches them after loading
/// through the link tables.
impl From<Model> for fable_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            body: model.body,
            date: model.date.into(),
            author_id: model.author_id,
            status: model.status.parse().unwrap_or(PostStatus::Draft),
            cover_image: model.cover_image,
            categories: Vec::new(),
            tags: Vec::new(),
        }
    }
}

/// Conversion from domain Post to SeaORM ActiveModel (scalar columns only;
/// link rows are written by the repository).
impl From<fable_core::domain::Post> for ActiveModel {
    fn from(post: fable_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            body: Set(post.body),
            date: Set(post.date.into()),
            author_id: Set(post.author_id),
            status: Set(post.status.as_str().to_string()),
            cover_image: Set(post.cover_image),
        }
    }
}
