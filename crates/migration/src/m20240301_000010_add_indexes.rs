use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // UserRole: one row per (user, role)
        manager
            .create_index(
                Index::create()
                    .name("uniq_user_role_user_role")
                    .table(UserRole::Table)
                    .col(UserRole::UserId)
                    .col(UserRole::Role)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Article: public listing filter, category and author lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_article_visibility")
                    .table(Article::Table)
                    .col(Article::IsPublished)
                    .col(Article::IsDeleted)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_article_category")
                    .table(Article::Table)
                    .col(Article::CategoryId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_article_user")
                    .table(Article::Table)
                    .col(Article::UserId)
                    .to_owned(),
            )
            .await?;

        // Comment: index on article_id
        manager
            .create_index(
                Index::create()
                    .name("idx_comment_article")
                    .table(Comment::Table)
                    .col(Comment::ArticleId)
                    .to_owned(),
            )
            .await?;

        // HitLogger: composite unique (article_id, address_id); upserts conflict on it
        manager
            .create_index(
                Index::create()
                    .name("uniq_hit_logger_article_address")
                    .table(HitLogger::Table)
                    .col(HitLogger::ArticleId)
                    .col(HitLogger::AddressId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_user_role_user_role").table(UserRole::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_article_visibility").table(Article::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_article_category").table(Article::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_article_user").table(Article::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_comment_article").table(Comment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_hit_logger_article_address").table(HitLogger::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserRole { Table, UserId, Role }

#[derive(DeriveIden)]
enum Article { Table, IsPublished, IsDeleted, CategoryId, UserId }

#[derive(DeriveIden)]
enum Comment { Table, ArticleId }

#[derive(DeriveIden)]
enum HitLogger { Table, ArticleId, AddressId }
