//! Service Container - Centralized service access.
//!
//! SOLID (SRP): Manages service lifecycle and access.
//! SOLID (DIP): Depends on service traits, not implementations.

use std::sync::Arc;

use super::{AuthService, ProductService, TokenService};
use crate::config::Config;
use crate::infra::{FsBlobStore, Persistence};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get product service
    fn products(&self) -> Arc<dyn ProductService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    product_service: Arc<dyn ProductService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        product_service: Arc<dyn ProductService>,
    ) -> Self {
        Self {
            auth_service,
            product_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        use super::{Authenticator, ProductCatalog};

        let uow = Arc::new(Persistence::new(db));
        let tokens = Arc::new(TokenService::new(
            config.jwt_secret_bytes(),
            config.jwt_expiration_hours,
        ));
        let blobs = Arc::new(FsBlobStore::new(&config.upload_dir));

        let auth_service = Arc::new(Authenticator::new(uow.clone(), blobs, tokens));
        let product_service = Arc::new(ProductCatalog::new(uow));

        Self {
            auth_service,
            product_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn products(&self) -> Arc<dyn ProductService> {
        self.product_service.clone()
    }
}
