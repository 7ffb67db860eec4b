//! Product service - catalog business logic.
//!
//! Every mutation is ownership-guarded and runs inside a single
//! transaction; the marketplace search delegates to the catalog
//! query builder through the product store.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    ownership, FileUpload, Principal, ProductFilter, ProductInput, ProductResponse,
    ProductWithImages,
};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Product service trait for dependency injection.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Create a product owned by the acting perfumer
    async fn add_product(
        &self,
        actor: &Principal,
        input: ProductInput,
        images: Vec<FileUpload>,
    ) -> AppResult<ProductResponse>;

    /// Update a product's fields and, when images are supplied,
    /// atomically replace its image set
    async fn update_product(
        &self,
        actor: &Principal,
        id: Uuid,
        input: ProductInput,
        images: Vec<FileUpload>,
    ) -> AppResult<ProductResponse>;

    /// Delete a product (images cascade with it)
    async fn delete_product(&self, actor: &Principal, id: Uuid) -> AppResult<()>;

    /// List the acting perfumer's products with images
    async fn my_products(&self, actor: &Principal) -> AppResult<Vec<ProductResponse>>;

    /// Public product fetch with images
    async fn get_product(&self, id: Uuid) -> AppResult<ProductResponse>;

    /// Public marketplace search
    async fn search(&self, filter: ProductFilter) -> AppResult<Vec<ProductResponse>>;
}

/// Concrete implementation of ProductService using Unit of Work.
pub struct ProductCatalog<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ProductCatalog<U> {
    /// Create new product service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ProductService for ProductCatalog<U> {
    async fn add_product(
        &self,
        actor: &Principal,
        input: ProductInput,
        images: Vec<FileUpload>,
    ) -> AppResult<ProductResponse> {
        // Creation is exempt from the per-item guard; ownership is
        // established here by stamping the creator as owner.
        ownership::ensure_perfumer(actor)?;
        input.validate()?;
        let owner_id = actor.id;

        crate::with_transaction!(self.uow, |ctx| {
            let repo = ctx.products();
            let product = repo.create(owner_id, input).await?;
            repo.insert_images(product.id, images).await?;
            let images = repo.images(product.id).await?;
            Ok(ProductResponse::from(ProductWithImages { product, images }))
        })
    }

    async fn update_product(
        &self,
        actor: &Principal,
        id: Uuid,
        input: ProductInput,
        images: Vec<FileUpload>,
    ) -> AppResult<ProductResponse> {
        input.validate()?;
        let actor = actor.clone();

        crate::with_transaction!(self.uow, |ctx| {
            let repo = ctx.products();
            let current = repo.find_by_id(id).await?.ok_or_not_found()?;
            ownership::ensure_owner(&actor, current.perfumer_id)?;

            // Image replacement only happens when a new set was uploaded
            if !images.is_empty() {
                repo.replace_images(id, images).await?;
            }

            let product = repo.update_fields(id, input).await?;
            let images = repo.images(id).await?;
            Ok(ProductResponse::from(ProductWithImages { product, images }))
        })
    }

    async fn delete_product(&self, actor: &Principal, id: Uuid) -> AppResult<()> {
        let product = self
            .uow
            .products()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;

        ownership::ensure_owner(actor, product.perfumer_id)?;

        self.uow.products().delete(id).await
    }

    async fn my_products(&self, actor: &Principal) -> AppResult<Vec<ProductResponse>> {
        ownership::ensure_perfumer(actor)?;

        let items = self.uow.products().find_by_perfumer(actor.id).await?;
        Ok(items.into_iter().map(ProductResponse::from).collect())
    }

    async fn get_product(&self, id: Uuid) -> AppResult<ProductResponse> {
        let item = self
            .uow
            .products()
            .find_with_images(id)
            .await?
            .ok_or_not_found()?;

        Ok(ProductResponse::from(item))
    }

    async fn search(&self, filter: ProductFilter) -> AppResult<Vec<ProductResponse>> {
        let items = self.uow.products().search(&filter).await?;
        Ok(items.into_iter().map(ProductResponse::from).collect())
    }
}
