//! Create `hit_logger` table with FKs to `article` and `address`.
//!
//! Per-visitor view counters; the (article, address) uniqueness lives in the
//! index migration.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HitLogger::Table)
                    .if_not_exists()
                    .col(pk_auto(HitLogger::Id))
                    .col(integer(HitLogger::ArticleId))
                    .col(integer(HitLogger::AddressId))
                    .col(integer(HitLogger::Count).default(1))
                    .col(timestamp_with_time_zone(HitLogger::CreatedAt))
                    .col(timestamp_with_time_zone(HitLogger::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_hit_logger_article")
                            .from(HitLogger::Table, HitLogger::ArticleId)
                            .to(Article::Table, Article::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_hit_logger_address")
                            .from(HitLogger::Table, HitLogger::AddressId)
                            .to(Address::Table, Address::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(HitLogger::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum HitLogger { Table, Id, ArticleId, AddressId, Count, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Article { Table, Id }

#[derive(DeriveIden)]
enum Address { Table, Id }
