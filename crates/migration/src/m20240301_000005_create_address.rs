//! Create `address` table.
//!
//! One row per client IP; `country` is filled by whoever knows it and
//! stays NULL otherwise.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Address::Table)
                    .if_not_exists()
                    .col(pk_auto(Address::Id))
                    .col(string_len(Address::Ip, 64).unique_key())
                    .col(
                        ColumnDef::new(Address::Country)
                            .string_len(64)
                            .null(),
                    )
                    .col(timestamp_with_time_zone(Address::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Address::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Address { Table, Id, Ip, Country, CreatedAt }
