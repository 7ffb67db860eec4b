//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access and transaction management.

mod auth_service;
pub mod container;
mod identity_resolver;
mod product_service;
mod token_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator};
pub use identity_resolver::IdentityResolver;
pub use product_service::{ProductCatalog, ProductService};
pub use token_service::{Claims, TokenResponse, TokenService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
