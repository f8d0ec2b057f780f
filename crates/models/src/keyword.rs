use sea_orm::{entity::prelude::*, sea_query::OnConflict, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::{article, article_keyword};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "keyword")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { ArticleKeywords }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::ArticleKeywords => Entity::has_many(article_keyword::Entity).into() }
    }
}

impl Related<article_keyword::Entity> for Entity {
    fn to() -> RelationDef { Relation::ArticleKeywords.def() }
}

impl Related<article::Entity> for Entity {
    fn to() -> RelationDef { article_keyword::Relation::Article.def() }
    fn via() -> Option<RelationDef> { Some(article_keyword::Relation::Keyword.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fetch the keyword called `name`, inserting it first when missing.
///
/// Concurrent callers racing on the same name both end up with the single
/// row guarded by the unique index.
pub async fn find_or_create<C: ConnectionTrait>(db: &C, name: &str) -> Result<Model, ModelError> {
    errors::require(name, "keyword")?;
    let am = ActiveModel {
        name: Set(name.to_string()),
        is_active: Set(true),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Entity::insert(am)
        .on_conflict(OnConflict::column(Column::Name).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;
    Entity::find()
        .filter(Column::Name.eq(name))
        .one(db)
        .await?
        .ok_or_else(|| ModelError::Validation(format!("keyword {name} vanished after insert")))
}
