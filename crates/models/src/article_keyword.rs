use sea_orm::{entity::prelude::*, sea_query::OnConflict, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{article, keyword};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "article_keyword")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub article_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub keyword_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Article, Keyword }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Article => Entity::belongs_to(article::Entity).from(Column::ArticleId).to(article::Column::Id).into(),
            Relation::Keyword => Entity::belongs_to(keyword::Entity).from(Column::KeywordId).to(keyword::Column::Id).into(),
        }
    }
}

impl Related<article::Entity> for Entity {
    fn to() -> RelationDef { Relation::Article.def() }
}

impl Related<keyword::Entity> for Entity {
    fn to() -> RelationDef { Relation::Keyword.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Link `keyword_ids` to an article; existing links are left alone.
pub async fn attach<C: ConnectionTrait>(db: &C, article_id: i32, keyword_ids: &[i32]) -> Result<(), ModelError> {
    if keyword_ids.is_empty() {
        return Ok(());
    }
    let rows = keyword_ids.iter().map(|&keyword_id| ActiveModel {
        article_id: Set(article_id),
        keyword_id: Set(keyword_id),
    });
    Entity::insert_many(rows)
        .on_conflict(OnConflict::columns([Column::ArticleId, Column::KeywordId]).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;
    Ok(())
}

/// Remove every keyword link of an article; returns the number of links dropped.
pub async fn detach_all<C: ConnectionTrait>(db: &C, article_id: i32) -> Result<u64, ModelError> {
    let res = Entity::delete_many()
        .filter(Column::ArticleId.eq(article_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
