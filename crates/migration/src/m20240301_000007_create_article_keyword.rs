//! Create `article_keyword` join table; the pair is the primary key.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ArticleKeyword::Table)
                    .if_not_exists()
                    .col(integer(ArticleKeyword::ArticleId))
                    .col(integer(ArticleKeyword::KeywordId))
                    .primary_key(
                        Index::create()
                            .name("pk_article_keyword")
                            .col(ArticleKeyword::ArticleId)
                            .col(ArticleKeyword::KeywordId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_article_keyword_article")
                            .from(ArticleKeyword::Table, ArticleKeyword::ArticleId)
                            .to(Article::Table, Article::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_article_keyword_keyword")
                            .from(ArticleKeyword::Table, ArticleKeyword::KeywordId)
                            .to(Keyword::Table, Keyword::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ArticleKeyword::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ArticleKeyword { Table, ArticleId, KeywordId }

#[derive(DeriveIden)]
enum Article { Table, Id }

#[derive(DeriveIden)]
enum Keyword { Table, Id }
