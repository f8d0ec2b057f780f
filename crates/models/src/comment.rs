use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::article;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub article_id: i32,
    pub author_name: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub is_published: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Article }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Article => Entity::belongs_to(article::Entity).from(Column::ArticleId).to(article::Column::Id).into() }
    }
}

impl Related<article::Entity> for Entity {
    fn to() -> RelationDef { Relation::Article.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    article_id: i32,
    author_name: &str,
    body: &str,
    is_published: bool,
) -> Result<Model, ModelError> {
    errors::require(author_name, "author name")?;
    errors::require(body, "comment body")?;
    let am = ActiveModel {
        article_id: Set(article_id),
        author_name: Set(author_name.trim().to_string()),
        body: Set(body.to_string()),
        is_published: Set(is_published),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Published comments of an article, newest first.
pub async fn list_published<C: ConnectionTrait>(db: &C, article_id: i32) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::ArticleId.eq(article_id))
        .filter(Column::IsPublished.eq(true))
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .all(db)
        .await?)
}
