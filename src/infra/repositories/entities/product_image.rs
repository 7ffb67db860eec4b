//! SeaORM entity for product images.
//!
//! Images are owned by their product and cascade-deleted with it.

use sea_orm::entity::prelude::*;

use crate::domain::ProductImage;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "product_images")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub product_id: Uuid,
    pub image_type: String,
    pub image_data: Vec<u8>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ProductImage {
    fn from(m: Model) -> Self {
        ProductImage {
            id: m.id,
            product_id: m.product_id,
            content_type: m.image_type,
            data: m.image_data,
        }
    }
}
