use sea_orm::{entity::prelude::*, QueryOrder, Select};
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::{address, article_keyword, category, comment, hit_logger, keyword, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "article")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub heading: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub category_id: i32,
    pub user_id: i32,
    pub address_id: Option<i32>,
    pub language: String,
    pub is_published: bool,
    pub published_at: DateTimeWithTimeZone,
    pub is_deleted: bool,
    pub hit_count: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Category,
    User,
    Address,
    Comments,
    HitLogs,
    ArticleKeywords,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity).from(Column::CategoryId).to(category::Column::Id).into(),
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
            Relation::Address => Entity::belongs_to(address::Entity).from(Column::AddressId).to(address::Column::Id).into(),
            Relation::Comments => Entity::has_many(comment::Entity).into(),
            Relation::HitLogs => Entity::has_many(hit_logger::Entity).into(),
            Relation::ArticleKeywords => Entity::has_many(article_keyword::Entity).into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl Related<address::Entity> for Entity {
    fn to() -> RelationDef { Relation::Address.def() }
}

impl Related<comment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Comments.def() }
}

impl Related<hit_logger::Entity> for Entity {
    fn to() -> RelationDef { Relation::HitLogs.def() }
}

impl Related<article_keyword::Entity> for Entity {
    fn to() -> RelationDef { Relation::ArticleKeywords.def() }
}

impl Related<keyword::Entity> for Entity {
    fn to() -> RelationDef { article_keyword::Relation::Keyword.def() }
    fn via() -> Option<RelationDef> { Some(article_keyword::Relation::Article.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

pub const DEFAULT_LANGUAGE: &str = "en";

pub fn validate_heading(heading: &str) -> Result<(), ModelError> {
    errors::require(heading, "heading")?;
    if heading.trim().chars().count() > 255 {
        return Err(ModelError::Validation("heading longer than 255 characters".into()));
    }
    Ok(())
}

pub fn validate_content(content: &str) -> Result<(), ModelError> {
    errors::require(content, "content")
}

pub fn validate_language(language: &str) -> Result<(), ModelError> {
    errors::require(language, "language")?;
    if language.trim().len() > 16 {
        return Err(ModelError::Validation("language code longer than 16 characters".into()));
    }
    Ok(())
}

/// Articles a visitor may see: published and not soft-deleted.
pub fn find_visible() -> Select<Entity> {
    Entity::find()
        .filter(Column::IsPublished.eq(true))
        .filter(Column::IsDeleted.eq(false))
}

/// Public ordering: publish time, then creation time, newest first. The id
/// breaks ties between rows written in the same instant.
pub fn newest_first(select: Select<Entity>) -> Select<Entity> {
    select
        .order_by_desc(Column::PublishedAt)
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
}
