//! Create `article` table with FKs to `category`, `user` and optional `address`.
//!
//! Rows are soft-deleted through `is_deleted`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Article::Table)
                    .if_not_exists()
                    .col(pk_auto(Article::Id))
                    .col(string_len(Article::Heading, 255))
                    .col(text(Article::Content))
                    .col(integer(Article::CategoryId))
                    .col(integer(Article::UserId))
                    .col(
                        ColumnDef::new(Article::AddressId)
                            .integer()
                            .null(),
                    )
                    .col(string_len(Article::Language, 16))
                    .col(boolean(Article::IsPublished).default(false))
                    .col(timestamp_with_time_zone(Article::PublishedAt))
                    .col(boolean(Article::IsDeleted).default(false))
                    .col(big_integer(Article::HitCount).default(0))
                    .col(timestamp_with_time_zone(Article::CreatedAt))
                    .col(timestamp_with_time_zone(Article::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_article_category")
                            .from(Article::Table, Article::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_article_user")
                            .from(Article::Table, Article::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_article_address")
                            .from(Article::Table, Article::AddressId)
                            .to(Address::Table, Address::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Article::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Article {
    Table,
    Id,
    Heading,
    Content,
    CategoryId,
    UserId,
    AddressId,
    Language,
    IsPublished,
    PublishedAt,
    IsDeleted,
    HitCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Category { Table, Id }

#[derive(DeriveIden)]
enum User { Table, Id }

#[derive(DeriveIden)]
enum Address { Table, Id }
