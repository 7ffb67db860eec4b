//! SeaORM entity for catalog products.

use sea_orm::entity::prelude::*;

use crate::domain::Product;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub perfumer_id: Uuid,
    pub name: String,
    pub description: String,
    pub fragrance_type: String,
    pub price: f64,
    pub stock: i32,
    pub key_ingredients: String,
    pub sustainability_score: Option<f64>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::perfumer::Entity",
        from = "Column::PerfumerId",
        to = "super::perfumer::Column::Id",
        on_delete = "Cascade"
    )]
    Perfumer,
    #[sea_orm(has_many = "super::product_image::Entity")]
    Images,
}

impl Related<super::perfumer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Perfumer.def()
    }
}

impl Related<super::product_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        Product {
            id: m.id,
            perfumer_id: m.perfumer_id,
            name: m.name,
            description: m.description,
            fragrance_type: m.fragrance_type,
            price: m.price,
            stock: m.stock,
            key_ingredients: m.key_ingredients,
            sustainability_score: m.sustainability_score,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
