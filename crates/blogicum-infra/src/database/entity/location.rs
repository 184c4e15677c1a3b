//! Location entity for SeaORM.

use sea_orm::entity::prelude::*;

use blogicum_core::domain::{Location, Publication};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub is_published: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Location {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            publication: Publication {
                is_published: model.is_published,
                created_at: model.created_at.into(),
            },
        }
    }
}
