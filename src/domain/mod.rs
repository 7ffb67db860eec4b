//! Domain layer - Core business entities and logic
//!
//! Contains the core domain models independent of infrastructure:
//! identities and roles, the password value object, products, and the
//! ownership rules binding catalog items to their sole owner.

pub mod identity;
pub mod ownership;
pub mod password;
pub mod product;
pub mod upload;

pub use identity::{Identity, PerfumerProfile, Principal, Role};
pub use password::{Password, DUMMY_PASSWORD_HASH};
pub use product::{
    Product, ProductFilter, ProductImage, ProductInput, ProductResponse, ProductWithImages,
};
pub use upload::FileUpload;
