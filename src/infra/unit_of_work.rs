//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and manages transaction lifecycle
//! (begin, commit, rollback). Identity creation and catalog mutation
//! each run inside one transaction; in particular, replacing a
//! product's image set is delete-all-then-insert-all and a failure
//! partway must leave the prior image set intact.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IsolationLevel, QueryFilter, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::{
    BuyerRepository, BuyerStore, PerfumerRepository, PerfumerStore, ProductRepository,
    ProductStore,
};
use crate::domain::{FileUpload, Product, ProductImage, ProductInput};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::entities::{product, product_image};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction
/// management. The generic `transaction` method keeps this trait
/// non-object-safe; services hold it as a type parameter instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get buyer repository
    fn buyers(&self) -> Arc<dyn BuyerRepository>;

    /// Get perfumer repository
    fn perfumers(&self) -> Arc<dyn PerfumerRepository>;

    /// Get product repository
    fn products(&self) -> Arc<dyn ProductRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is automatically committed on success or rolled
    /// back on error.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get product repository for this transaction
    pub fn products(&self) -> TxProductRepository<'_> {
        TxProductRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    buyer_repo: Arc<BuyerStore>,
    perfumer_repo: Arc<PerfumerStore>,
    product_repo: Arc<ProductStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let buyer_repo = Arc::new(BuyerStore::new(db.clone()));
        let perfumer_repo = Arc::new(PerfumerStore::new(db.clone()));
        let product_repo = Arc::new(ProductStore::new(db.clone()));
        Self {
            db,
            buyer_repo,
            perfumer_repo,
            product_repo,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn buyers(&self) -> Arc<dyn BuyerRepository> {
        self.buyer_repo.clone()
    }

    fn perfumers(&self) -> Arc<dyn PerfumerRepository> {
        self.perfumer_repo.clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.product_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(IsolationLevel::ReadCommitted), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware product repository.
///
/// Executes all operations within the provided transaction, so a
/// multi-step mutation (field update plus image replacement) either
/// lands completely or not at all.
pub struct TxProductRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxProductRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Find product by id within the transaction
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        let result = product::Entity::find_by_id(id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Product::from))
    }

    /// Create a new product owned by the given perfumer
    pub async fn create(&self, perfumer_id: Uuid, input: ProductInput) -> AppResult<Product> {
        let now = chrono::Utc::now();
        let active_model = product::ActiveModel {
            id: Set(Uuid::new_v4()),
            perfumer_id: Set(perfumer_id),
            name: Set(input.name),
            description: Set(input.description),
            fragrance_type: Set(input.fragrance_type),
            price: Set(input.price),
            stock: Set(input.stock),
            key_ingredients: Set(input.key_ingredients),
            sustainability_score: Set(input.sustainability_score),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(self.txn).await.map_err(AppError::from)?;

        Ok(Product::from(model))
    }

    /// Replace every mutable field of an existing product
    pub async fn update_fields(&self, id: Uuid, input: ProductInput) -> AppResult<Product> {
        let current = product::Entity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: product::ActiveModel = current.into();
        active.name = Set(input.name);
        active.description = Set(input.description);
        active.fragrance_type = Set(input.fragrance_type);
        active.price = Set(input.price);
        active.stock = Set(input.stock);
        active.key_ingredients = Set(input.key_ingredients);
        active.sustainability_score = Set(input.sustainability_score);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(self.txn).await.map_err(AppError::from)?;

        Ok(Product::from(model))
    }

    /// Insert an image set for a product
    pub async fn insert_images(&self, product_id: Uuid, images: Vec<FileUpload>) -> AppResult<()> {
        if images.is_empty() {
            return Ok(());
        }

        let models: Vec<product_image::ActiveModel> = images
            .into_iter()
            .map(|img| product_image::ActiveModel {
                id: Set(Uuid::new_v4()),
                product_id: Set(product_id),
                image_type: Set(img.content_type),
                image_data: Set(img.bytes),
            })
            .collect();

        product_image::Entity::insert_many(models)
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    /// Replace a product's image set: delete-all-then-insert-all.
    ///
    /// Must run inside the same transaction as the surrounding field
    /// update so an insert failure leaves the prior set untouched.
    pub async fn replace_images(&self, product_id: Uuid, images: Vec<FileUpload>) -> AppResult<()> {
        product_image::Entity::delete_many()
            .filter(product_image::Column::ProductId.eq(product_id))
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;

        self.insert_images(product_id, images).await
    }

    /// Fetch the image set of a product within the transaction
    pub async fn images(&self, product_id: Uuid) -> AppResult<Vec<ProductImage>> {
        let models = product_image::Entity::find()
            .filter(product_image::Column::ProductId.eq(product_id))
            .all(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

/// Simpler API for executing transactional operations.
///
/// This helper macro reduces boilerplate when using transactions.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
