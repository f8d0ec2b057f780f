use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, QuerySelect, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::{article, user_role};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub is_subscribed: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Roles,
    Articles,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Roles => Entity::has_many(user_role::Entity).into(),
            Relation::Articles => Entity::has_many(article::Entity).into(),
        }
    }
}

impl Related<user_role::Entity> for Entity {
    fn to() -> RelationDef { Relation::Roles.def() }
}

impl Related<article::Entity> for Entity {
    fn to() -> RelationDef { Relation::Articles.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(ModelError::Validation("invalid email".into())),
    }
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    errors::require(name, "name")
}

pub async fn create<C: ConnectionTrait>(db: &C, name: &str, email: &str, is_subscribed: bool) -> Result<Model, ModelError> {
    validate_email(email)?;
    validate_name(name)?;
    let am = ActiveModel {
        name: Set(name.trim().to_string()),
        email: Set(email.trim().to_string()),
        is_subscribed: Set(is_subscribed),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Emails of every user opted in to new-article mail, in id order.
pub async fn subscribed_emails<C: ConnectionTrait>(db: &C) -> Result<Vec<String>, ModelError> {
    let emails = Entity::find()
        .select_only()
        .column(Column::Email)
        .filter(Column::IsSubscribed.eq(true))
        .order_by_asc(Column::Id)
        .into_tuple::<String>()
        .all(db)
        .await?;
    Ok(emails)
}
