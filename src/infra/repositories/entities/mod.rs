//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod buyer;
pub mod perfumer;
pub mod product;
pub mod product_image;
