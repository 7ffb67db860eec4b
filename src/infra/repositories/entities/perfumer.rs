//! SeaORM entity for the perfumers principal store.

use sea_orm::entity::prelude::*;

use crate::domain::{Identity, Role};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "perfumers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub fragrance_type: String,
    pub experience: i32,
    pub mobile: Option<String>,
    pub location: Option<String>,
    pub key_ingredients: Option<String>,
    /// Locator returned by the blob store for the certification document
    pub certification_path: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Identity {
    fn from(m: Model) -> Self {
        Identity {
            id: m.id,
            email: m.email,
            password_hash: m.password_hash,
            display_name: m.name,
            role: Role::Perfumer,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
