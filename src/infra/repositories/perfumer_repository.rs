//! Perfumer principal store.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::perfumer;
use crate::domain::Identity;
use crate::errors::{AppError, AppResult};

/// Full column set persisted for a new perfumer, assembled by the
/// authentication gateway after hashing and certification storage.
#[derive(Debug, Clone)]
pub struct NewPerfumer {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub fragrance_type: String,
    pub experience: i32,
    pub mobile: Option<String>,
    pub location: Option<String>,
    pub key_ingredients: Option<String>,
    pub certification_path: String,
}

/// Perfumer repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait PerfumerRepository: Send + Sync {
    /// Find perfumer by email (unique within this store)
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>>;

    /// Create a new perfumer
    async fn create(&self, new: NewPerfumer) -> AppResult<Identity>;
}

/// SeaORM-backed perfumer store
pub struct PerfumerStore {
    db: DatabaseConnection,
}

impl PerfumerStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PerfumerRepository for PerfumerStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>> {
        let result = perfumer::Entity::find()
            .filter(perfumer::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Identity::from))
    }

    async fn create(&self, new: NewPerfumer) -> AppResult<Identity> {
        let now = chrono::Utc::now();
        let active_model = perfumer::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(new.email),
            password_hash: Set(new.password_hash),
            name: Set(new.name),
            fragrance_type: Set(new.fragrance_type),
            experience: Set(new.experience),
            mobile: Set(new.mobile),
            location: Set(new.location),
            key_ingredients: Set(new.key_ingredients),
            certification_path: Set(new.certification_path),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;

        Ok(Identity::from(model))
    }
}
