use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::article;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Articles }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Articles => Entity::has_many(article::Entity).into() }
    }
}

impl Related<article::Entity> for Entity {
    fn to() -> RelationDef { Relation::Articles.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(db: &C, name: &str, is_active: bool) -> Result<Model, ModelError> {
    errors::require(name, "name")?;
    let am = ActiveModel {
        name: Set(name.trim().to_string()),
        is_active: Set(is_active),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Categories offered in the article pickers.
pub async fn list_active<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::IsActive.eq(true))
        .order_by_asc(Column::Name)
        .all(db)
        .await?)
}
