//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240110_000001_create_buyers_table;
mod m20240110_000002_create_perfumers_table;
mod m20240110_000003_create_products_table;
mod m20240110_000004_create_product_images_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240110_000001_create_buyers_table::Migration),
            Box::new(m20240110_000002_create_perfumers_table::Migration),
            Box::new(m20240110_000003_create_products_table::Migration),
            Box::new(m20240110_000004_create_product_images_table::Migration),
        ]
    }
}
