//! Image entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "images")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub post_id: Uuid,
    pub file: String,
    pub uploaded_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for fable_core::domain::Image {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            post_id: model.post_id,
            file: model.file,
            uploaded_at: model.uploaded_at.into(),
        }
    }
}

impl From<fable_core::domain::Image> for ActiveModel {
    fn from(image: fable_core::domain::Image) -> Self {
        Self {
            id: Set(image.id),
            post_id: Set(image.post_id),
            file: Set(image.file),
            uploaded_at: Set(image.uploaded_at.into()),
        }
    }
}
