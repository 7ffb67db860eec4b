//! Migration: Create the buyers principal store.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Buyers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Buyers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Buyers::Email).string().not_null())
                    .col(ColumnDef::new(Buyers::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Buyers::Name).string().not_null())
                    .col(
                        ColumnDef::new(Buyers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Buyers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Email is unique within this store only; the perfumers table has
        // its own independent unique index.
        manager
            .create_index(
                Index::create()
                    .name("idx_buyers_email")
                    .table(Buyers::Table)
                    .col(Buyers::Email)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Buyers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Buyers {
    Table,
    Id,
    Email,
    PasswordHash,
    Name,
    CreatedAt,
    UpdatedAt,
}
