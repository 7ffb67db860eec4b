//! HTTP request handlers.

pub mod auth_handler;
pub mod perfumer_handler;
pub mod product_handler;

pub use auth_handler::auth_routes;
pub use perfumer_handler::perfumer_routes;
pub use product_handler::{product_routes, protected_product_routes};
