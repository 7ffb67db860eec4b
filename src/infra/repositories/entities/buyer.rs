//! SeaORM entity for the buyers principal store.

use sea_orm::entity::prelude::*;

use crate::domain::{Identity, Role};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "buyers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Identity {
    fn from(m: Model) -> Self {
        Identity {
            id: m.id,
            email: m.email,
            password_hash: m.password_hash,
            display_name: m.name,
            role: Role::Buyer,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
