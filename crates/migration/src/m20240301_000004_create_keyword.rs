//! Create `keyword` table; names are unique so tags are shared across articles.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Keyword::Table)
                    .if_not_exists()
                    .col(pk_auto(Keyword::Id))
                    .col(string_len(Keyword::Name, 128).unique_key())
                    .col(boolean(Keyword::IsActive).default(true))
                    .col(timestamp_with_time_zone(Keyword::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Keyword::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Keyword { Table, Id, Name, IsActive, CreatedAt }
