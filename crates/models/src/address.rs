use std::net::IpAddr;

use sea_orm::{entity::prelude::*, sea_query::OnConflict, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::hit_logger;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "address")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub ip: String,
    pub country: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { HitLogs }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::HitLogs => Entity::has_many(hit_logger::Entity).into() }
    }
}

impl Related<hit_logger::Entity> for Entity {
    fn to() -> RelationDef { Relation::HitLogs.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Normalise an IP string (`::ffff:1.2.3.4` stays IPv6, whitespace is trimmed).
pub fn normalize_ip(ip: &str) -> Result<String, ModelError> {
    ip.trim()
        .parse::<IpAddr>()
        .map(|addr| addr.to_string())
        .map_err(|_| ModelError::Validation(format!("invalid ip address: {ip}")))
}

/// Resolve the row for `ip`, creating it on first sight.
pub async fn find_or_create<C: ConnectionTrait>(db: &C, ip: &str) -> Result<Model, ModelError> {
    let ip = normalize_ip(ip)?;
    let am = ActiveModel {
        ip: Set(ip.clone()),
        country: Set(None),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Entity::insert(am)
        .on_conflict(OnConflict::column(Column::Ip).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;
    Entity::find()
        .filter(Column::Ip.eq(ip.as_str()))
        .one(db)
        .await?
        .ok_or_else(|| ModelError::Validation(format!("address {ip} vanished after insert")))
}

/// Record the country an external resolver attributed to an address.
pub async fn set_country<C: ConnectionTrait>(db: &C, id: i32, country: Option<String>) -> Result<Model, ModelError> {
    let mut found: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ModelError::Validation("address not found".into()))?
        .into();
    found.country = Set(country.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()));
    Ok(found.update(db).await?)
}
