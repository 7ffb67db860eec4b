//! Buyer principal store.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::buyer;
use crate::domain::Identity;
use crate::errors::{AppError, AppResult};

/// Buyer repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait BuyerRepository: Send + Sync {
    /// Find buyer by email (unique within this store)
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>>;

    /// Create a new buyer
    async fn create(&self, email: String, password_hash: String, name: String)
        -> AppResult<Identity>;
}

/// SeaORM-backed buyer store
pub struct BuyerStore {
    db: DatabaseConnection,
}

impl BuyerStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BuyerRepository for BuyerStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>> {
        let result = buyer::Entity::find()
            .filter(buyer::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Identity::from))
    }

    async fn create(
        &self,
        email: String,
        password_hash: String,
        name: String,
    ) -> AppResult<Identity> {
        let now = chrono::Utc::now();
        let active_model = buyer::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            password_hash: Set(password_hash),
            name: Set(name),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;

        Ok(Identity::from(model))
    }
}
