//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod buyer_repository;
mod catalog_query;
pub(crate) mod entities;
mod perfumer_repository;
mod product_repository;

pub use buyer_repository::{BuyerRepository, BuyerStore};
pub use catalog_query::filter_condition;
pub use perfumer_repository::{NewPerfumer, PerfumerRepository, PerfumerStore};
pub use product_repository::{ProductRepository, ProductStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use buyer_repository::MockBuyerRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use perfumer_repository::MockPerfumerRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use product_repository::MockProductRepository;
