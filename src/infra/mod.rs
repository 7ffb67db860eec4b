//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Blob storage for certification documents
//! - Unit of Work for transaction management

pub mod blob_store;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use blob_store::{BlobStore, FsBlobStore};
pub use db::{Database, Migrator};
pub use repositories::{
    BuyerRepository, BuyerStore, NewPerfumer, PerfumerRepository, PerfumerStore,
    ProductRepository, ProductStore,
};
pub use unit_of_work::{Persistence, TransactionContext, TxProductRepository, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use blob_store::MockBlobStore;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockBuyerRepository, MockPerfumerRepository, MockProductRepository};
