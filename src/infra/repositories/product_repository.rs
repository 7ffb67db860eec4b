//! Catalog product store (reads and deletes).
//!
//! Product creation and updates go through the transaction-scoped
//! repository in `unit_of_work` so that the image set is replaced
//! atomically with the field update.

use async_trait::async_trait;
use sea_orm::sea_query::JoinType;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, QueryFilter, QuerySelect,
    RelationTrait,
};
use uuid::Uuid;

use super::catalog_query::filter_condition;
use super::entities::{product, product_image};
use crate::domain::{Product, ProductFilter, ProductWithImages};
use crate::errors::{AppError, AppResult};

/// Product repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find product by id, without images
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>>;

    /// Find product by id, with its image set
    async fn find_with_images(&self, id: Uuid) -> AppResult<Option<ProductWithImages>>;

    /// All products owned by one perfumer, with images
    async fn find_by_perfumer(&self, perfumer_id: Uuid) -> AppResult<Vec<ProductWithImages>>;

    /// Marketplace search over the catalog
    async fn search(&self, filter: &ProductFilter) -> AppResult<Vec<ProductWithImages>>;

    /// Delete product by id; images cascade with it
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed product store
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attach image sets to a batch of product rows.
    async fn with_images(
        &self,
        products: Vec<product::Model>,
    ) -> AppResult<Vec<ProductWithImages>> {
        let image_sets = products
            .load_many(product_image::Entity, &self.db)
            .await
            .map_err(AppError::from)?;

        Ok(products
            .into_iter()
            .zip(image_sets)
            .map(|(p, images)| ProductWithImages {
                product: Product::from(p),
                images: images.into_iter().map(Into::into).collect(),
            })
            .collect())
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        let result = product::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Product::from))
    }

    async fn find_with_images(&self, id: Uuid) -> AppResult<Option<ProductWithImages>> {
        let Some(model) = product::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
        else {
            return Ok(None);
        };

        Ok(self.with_images(vec![model]).await?.into_iter().next())
    }

    async fn find_by_perfumer(&self, perfumer_id: Uuid) -> AppResult<Vec<ProductWithImages>> {
        let models = product::Entity::find()
            .filter(product::Column::PerfumerId.eq(perfumer_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.with_images(models).await
    }

    async fn search(&self, filter: &ProductFilter) -> AppResult<Vec<ProductWithImages>> {
        // Joined to perfumers because free-text search also matches the
        // owner's display name.
        let models = product::Entity::find()
            .join(JoinType::InnerJoin, product::Relation::Perfumer.def())
            .filter(filter_condition(filter))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.with_images(models).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = product::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
