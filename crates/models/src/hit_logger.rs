use sea_orm::{entity::prelude::*, sea_query::{Expr, OnConflict}, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{address, article};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hit_logger")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub article_id: i32,
    pub address_id: i32,
    pub count: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Article, Address }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Article => Entity::belongs_to(article::Entity).from(Column::ArticleId).to(article::Column::Id).into(),
            Relation::Address => Entity::belongs_to(address::Entity).from(Column::AddressId).to(address::Column::Id).into(),
        }
    }
}

impl Related<article::Entity> for Entity {
    fn to() -> RelationDef { Relation::Article.def() }
}

impl Related<address::Entity> for Entity {
    fn to() -> RelationDef { Relation::Address.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert `(article, address, 1)` or bump the existing row's count in a
/// single statement; the unique pair index arbitrates concurrent visits.
pub async fn increment_or_create<C: ConnectionTrait>(db: &C, article_id: i32, address_id: i32) -> Result<(), ModelError> {
    let now: DateTimeWithTimeZone = Utc::now().into();
    let am = ActiveModel {
        article_id: Set(article_id),
        address_id: Set(address_id),
        count: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Entity::insert(am)
        .on_conflict(
            OnConflict::columns([Column::ArticleId, Column::AddressId])
                .value(Column::Count, Expr::col((Entity, Column::Count)).add(1))
                .value(Column::UpdatedAt, now)
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(())
}

pub async fn find_pair<C: ConnectionTrait>(db: &C, article_id: i32, address_id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::ArticleId.eq(article_id))
        .filter(Column::AddressId.eq(address_id))
        .one(db)
        .await?)
}
