//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_user;
mod m20240301_000002_create_user_role;
mod m20240301_000003_create_category;
mod m20240301_000004_create_keyword;
mod m20240301_000005_create_address;
mod m20240301_000006_create_article;
mod m20240301_000007_create_article_keyword;
mod m20240301_000008_create_comment;
mod m20240301_000009_create_hit_logger;
mod m20240301_000010_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_user::Migration),
            Box::new(m20240301_000002_create_user_role::Migration),
            Box::new(m20240301_000003_create_category::Migration),
            Box::new(m20240301_000004_create_keyword::Migration),
            Box::new(m20240301_000005_create_address::Migration),
            Box::new(m20240301_000006_create_article::Migration),
            Box::new(m20240301_000007_create_article_keyword::Migration),
            Box::new(m20240301_000008_create_comment::Migration),
            Box::new(m20240301_000009_create_hit_logger::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000010_add_indexes::Migration),
        ]
    }
}
