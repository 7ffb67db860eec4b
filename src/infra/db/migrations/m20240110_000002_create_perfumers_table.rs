//! Migration: Create the perfumers principal store.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Perfumers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Perfumers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Perfumers::Email).string().not_null())
                    .col(ColumnDef::new(Perfumers::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Perfumers::Name).string().not_null())
                    .col(ColumnDef::new(Perfumers::FragranceType).string().not_null())
                    .col(ColumnDef::new(Perfumers::Experience).integer().not_null())
                    .col(ColumnDef::new(Perfumers::Mobile).string().null())
                    .col(ColumnDef::new(Perfumers::Location).string().null())
                    .col(ColumnDef::new(Perfumers::KeyIngredients).string().null())
                    .col(
                        ColumnDef::new(Perfumers::CertificationPath)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Perfumers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Perfumers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_perfumers_email")
                    .table(Perfumers::Table)
                    .col(Perfumers::Email)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Perfumers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Perfumers {
    Table,
    Id,
    Email,
    PasswordHash,
    Name,
    FragranceType,
    Experience,
    Mobile,
    Location,
    KeyIngredients,
    CertificationPath,
    CreatedAt,
    UpdatedAt,
}
