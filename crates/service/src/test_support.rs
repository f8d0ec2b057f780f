#![cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use migration::MigratorTrait;
use models::user_role::{self, Role};
use models::{article, category, user};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::auth::domain::CurrentUser;

static SEQ: AtomicUsize = AtomicUsize::new(0);

/// Fresh in-memory database with the full schema.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = models::db::connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Row builders for service tests.
pub struct Fixture<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> Fixture<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn user(&self, email: &str, subscribed: bool, roles: &[Role]) -> Result<CurrentUser, anyhow::Error> {
        let u = user::create(self.db, email.split('@').next().unwrap_or("user"), email, subscribed).await?;
        for role in roles {
            user_role::assign(self.db, u.id, *role).await?;
        }
        Ok(CurrentUser { id: u.id, name: u.name, email: u.email, roles: user_role::roles_for(self.db, u.id).await? })
    }

    pub async fn staff(&self, email: &str, role: Role) -> Result<CurrentUser, anyhow::Error> {
        self.user(email, false, &[role]).await
    }

    pub async fn category(&self, name: &str, active: bool) -> Result<category::Model, anyhow::Error> {
        Ok(category::create(self.db, name, active).await?)
    }

    pub async fn article(&self, user_id: i32, category_id: i32, published: bool) -> Result<article::Model, anyhow::Error> {
        let n = SEQ.fetch_add(1, Ordering::Relaxed);
        let now = Utc::now();
        let am = article::ActiveModel {
            heading: Set(format!("Article {n}")),
            content: Set(format!("Body of article {n}")),
            category_id: Set(category_id),
            user_id: Set(user_id),
            address_id: Set(None),
            language: Set("en".into()),
            is_published: Set(published),
            published_at: Set(now.into()),
            is_deleted: Set(false),
            hit_count: Set(0),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };
        Ok(am.insert(self.db).await?)
    }

    pub async fn soft_delete(&self, id: i32) -> Result<(), anyhow::Error> {
        let found = article::Entity::find_by_id(id).one(self.db).await?.ok_or_else(|| anyhow::anyhow!("no article {id}"))?;
        let mut am: article::ActiveModel = found.into();
        am.is_deleted = Set(true);
        am.update(self.db).await?;
        Ok(())
    }
}
