use anyhow::Result;
use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set};

use crate::{address, article, article_keyword, category, comment, db, hit_logger, keyword, user, user_role};

async fn setup() -> Result<DatabaseConnection> {
    let conn = db::connect_in_memory().await?;
    Migrator::up(&conn, None).await?;
    Ok(conn)
}

async fn seed_article(conn: &DatabaseConnection) -> Result<article::Model> {
    let author = user::create(conn, "Ada", "ada@example.com", false).await?;
    let cat = category::create(conn, "Rust", true).await?;
    let now = Utc::now();
    let am = article::ActiveModel {
        heading: Set("Ownership".into()),
        content: Set("Borrowing rules".into()),
        category_id: Set(cat.id),
        user_id: Set(author.id),
        address_id: Set(None),
        language: Set(article::DEFAULT_LANGUAGE.into()),
        is_published: Set(true),
        published_at: Set(now.into()),
        is_deleted: Set(false),
        hit_count: Set(0),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };
    Ok(am.insert(conn).await?)
}

#[test]
fn email_validation() {
    assert!(user::validate_email("a@b.io").is_ok());
    assert!(user::validate_email("nobody").is_err());
    assert!(user::validate_email("@b.io").is_err());
}

#[test]
fn heading_must_not_be_blank() {
    assert!(article::validate_heading("   ").is_err());
    assert!(article::validate_heading(&"x".repeat(256)).is_err());
    assert!(article::validate_heading("Hello").is_ok());
}

#[test]
fn ip_normalisation() {
    assert_eq!(address::normalize_ip(" 10.0.0.1 ").unwrap(), "10.0.0.1");
    assert!(address::normalize_ip("not-an-ip").is_err());
}

#[tokio::test]
async fn address_find_or_create_is_idempotent() -> Result<()> {
    let conn = setup().await?;
    let a = address::find_or_create(&conn, "192.168.1.7").await?;
    let b = address::find_or_create(&conn, "192.168.1.7").await?;
    assert_eq!(a.id, b.id);
    assert_eq!(address::Entity::find().all(&conn).await?.len(), 1);

    let tagged = address::set_country(&conn, a.id, Some("NL".into())).await?;
    assert_eq!(tagged.country.as_deref(), Some("NL"));
    Ok(())
}

#[tokio::test]
async fn keyword_find_or_create_reuses_row() -> Result<()> {
    let conn = setup().await?;
    let first = keyword::find_or_create(&conn, "rust").await?;
    let again = keyword::find_or_create(&conn, "rust").await?;
    assert_eq!(first.id, again.id);
    assert!(keyword::find_or_create(&conn, " ").await.is_err());
    Ok(())
}

#[tokio::test]
async fn roles_are_deduplicated() -> Result<()> {
    let conn = setup().await?;
    let u = user::create(&conn, "Grace", "grace@example.com", true).await?;
    user_role::assign(&conn, u.id, user_role::Role::Author).await?;
    user_role::assign(&conn, u.id, user_role::Role::Author).await?;
    user_role::assign(&conn, u.id, user_role::Role::Admin).await?;
    let roles = user_role::roles_for(&conn, u.id).await?;
    assert_eq!(roles, vec![user_role::Role::Admin, user_role::Role::Author]);
    Ok(())
}

#[tokio::test]
async fn subscribed_emails_skips_opted_out() -> Result<()> {
    let conn = setup().await?;
    user::create(&conn, "A", "a@example.com", true).await?;
    user::create(&conn, "B", "b@example.com", false).await?;
    user::create(&conn, "C", "c@example.com", true).await?;
    assert_eq!(user::subscribed_emails(&conn).await?, vec!["a@example.com", "c@example.com"]);
    Ok(())
}

#[tokio::test]
async fn hit_upsert_keeps_one_row_per_pair() -> Result<()> {
    let conn = setup().await?;
    let art = seed_article(&conn).await?;
    let addr = address::find_or_create(&conn, "10.1.1.1").await?;

    hit_logger::increment_or_create(&conn, art.id, addr.id).await?;
    hit_logger::increment_or_create(&conn, art.id, addr.id).await?;
    hit_logger::increment_or_create(&conn, art.id, addr.id).await?;

    let rows = hit_logger::Entity::find()
        .filter(hit_logger::Column::ArticleId.eq(art.id))
        .all(&conn)
        .await?;
    assert_eq!(rows.len(), 1);
    let pair = hit_logger::find_pair(&conn, art.id, addr.id).await?.expect("hit row");
    assert_eq!(pair.count, 3);
    Ok(())
}

#[tokio::test]
async fn keyword_links_attach_and_detach() -> Result<()> {
    let conn = setup().await?;
    let art = seed_article(&conn).await?;
    let a = keyword::find_or_create(&conn, "a").await?;
    let b = keyword::find_or_create(&conn, "b").await?;

    article_keyword::attach(&conn, art.id, &[a.id, b.id, a.id]).await?;
    let names: Vec<String> = art
        .find_related(keyword::Entity)
        .all(&conn)
        .await?
        .into_iter()
        .map(|k| k.name)
        .collect();
    assert_eq!(names.len(), 2);

    assert_eq!(article_keyword::detach_all(&conn, art.id).await?, 2);
    assert!(art.find_related(keyword::Entity).all(&conn).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn visible_scope_hides_deleted_and_drafts() -> Result<()> {
    let conn = setup().await?;
    let art = seed_article(&conn).await?;
    assert_eq!(article::find_visible().all(&conn).await?.len(), 1);

    let mut am: article::ActiveModel = art.into();
    am.is_deleted = Set(true);
    am.update(&conn).await?;
    assert!(article::find_visible().all(&conn).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn published_comments_only() -> Result<()> {
    let conn = setup().await?;
    let art = seed_article(&conn).await?;
    comment::create(&conn, art.id, "Reader", "Nice", true).await?;
    comment::create(&conn, art.id, "Spammer", "Buy now", false).await?;
    let shown = comment::list_published(&conn, art.id).await?;
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].author_name, "Reader");
    Ok(())
}
