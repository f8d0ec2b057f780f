use std::fmt;

use sea_orm::{entity::prelude::*, sea_query::OnConflict, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::ModelError;
use crate::user;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_role")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into() }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Staff roles recognised by the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Author,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Author => "author",
        }
    }

    /// Parse a role name (case-insensitive).
    pub fn from_str_ci(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "editor" => Some(Role::Editor),
            "author" => Some(Role::Author),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grant `role` to a user; granting twice is a no-op.
pub async fn assign<C: ConnectionTrait>(db: &C, user_id: i32, role: Role) -> Result<(), ModelError> {
    let am = ActiveModel {
        user_id: Set(user_id),
        role: Set(role.as_str().to_string()),
        ..Default::default()
    };
    Entity::insert(am)
        .on_conflict(OnConflict::columns([Column::UserId, Column::Role]).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;
    Ok(())
}

pub async fn roles_for<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<Vec<Role>, ModelError> {
    let rows = Entity::find().filter(Column::UserId.eq(user_id)).all(db).await?;
    let mut roles = Vec::with_capacity(rows.len());
    for row in rows {
        match Role::from_str_ci(&row.role) {
            Some(role) => roles.push(role),
            None => warn!(user_id, role = %row.role, "ignoring unknown role"),
        }
    }
    roles.sort();
    roles.dedup();
    Ok(roles)
}
