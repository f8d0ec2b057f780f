//! Read-only back-office aggregates.

use std::collections::BTreeMap;

use models::{address, article, category, comment, hit_logger};
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use serde::Serialize;
use tracing::instrument;

use crate::auth::authz;
use crate::context::RequestContext;
use crate::errors::ServiceError;

/// Bucket for hits from addresses with no known country.
pub const UNKNOWN_COUNTRY: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct CategoryArticleCount {
    pub category: String,
    pub articles: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryHitCount {
    pub country: String,
    pub hits: i64,
}

#[derive(Debug, FromQueryResult)]
struct CountryHitRow {
    country: Option<String>,
    hits: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub categories: Vec<category::Model>,
    pub comment_count: u64,
    pub articles_by_category: Vec<CategoryArticleCount>,
    pub hits_by_country: Vec<CountryHitCount>,
}

/// Collect every dashboard figure.
#[instrument(skip_all)]
pub async fn dashboard(db: &DatabaseConnection, ctx: &RequestContext) -> Result<Dashboard, ServiceError> {
    authz::require_staff(ctx)?;
    let categories = category::Entity::find().order_by_asc(category::Column::Name).all(db).await?;
    let comment_count = comment::Entity::find().count(db).await?;
    let articles_by_category = articles_by_category(db).await?;
    let hits_by_country = hits_by_country(db).await?;
    Ok(Dashboard { categories, comment_count, articles_by_category, hits_by_country })
}

/// Non-deleted articles per category name.
pub async fn articles_by_category(db: &DatabaseConnection) -> Result<Vec<CategoryArticleCount>, ServiceError> {
    let rows = article::Entity::find()
        .select_only()
        .column_as(category::Column::Name, "category")
        .column_as(Expr::col((article::Entity, article::Column::Id)).count(), "articles")
        .inner_join(category::Entity)
        .filter(article::Column::IsDeleted.eq(false))
        .group_by(category::Column::Name)
        .order_by_asc(category::Column::Name)
        .into_model::<CategoryArticleCount>()
        .all(db)
        .await?;
    Ok(rows)
}

/// Summed hit counters per address country, busiest first.
pub async fn hits_by_country(db: &DatabaseConnection) -> Result<Vec<CountryHitCount>, ServiceError> {
    let rows = hit_logger::Entity::find()
        .select_only()
        .column_as(address::Column::Country, "country")
        .column_as(Expr::col((hit_logger::Entity, hit_logger::Column::Count)).sum(), "hits")
        .inner_join(address::Entity)
        .group_by(address::Column::Country)
        .into_model::<CountryHitRow>()
        .all(db)
        .await?;

    let mut merged: BTreeMap<String, i64> = BTreeMap::new();
    for row in rows {
        let country = row.country.unwrap_or_else(|| UNKNOWN_COUNTRY.to_string());
        *merged.entry(country).or_default() += row.hits;
    }
    let mut out: Vec<CountryHitCount> = merged.into_iter().map(|(country, hits)| CountryHitCount { country, hits }).collect();
    out.sort_by(|a, b| b.hits.cmp(&a.hits).then_with(|| a.country.cmp(&b.country)));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, Fixture};
    use models::user_role::Role;

    #[tokio::test]
    async fn dashboard_aggregates() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let fx = Fixture::new(&db);
        let admin = fx.staff("admin@example.com", Role::Admin).await?;
        let news = fx.category("News", true).await?;
        let tech = fx.category("Tech", false).await?;

        let a1 = fx.article(admin.id, news.id, true).await?;
        fx.article(admin.id, news.id, false).await?;
        let a3 = fx.article(admin.id, tech.id, true).await?;
        fx.soft_delete(a3.id).await?;
        models::comment::create(&db, a1.id, "R", "hi", true).await?;
        models::comment::create(&db, a1.id, "S", "spam", false).await?;

        let nl = models::address::find_or_create(&db, "10.0.0.1").await?;
        models::address::set_country(&db, nl.id, Some("NL".into())).await?;
        crate::articles::hits::record_hit(&db, a1.id, "10.0.0.1").await?;
        crate::articles::hits::record_hit(&db, a1.id, "10.0.0.1").await?;
        crate::articles::hits::record_hit(&db, a1.id, "10.0.0.2").await?;

        let ctx = RequestContext::authenticated(admin, "127.0.0.1");
        let d = dashboard(&db, &ctx).await?;
        assert_eq!(d.categories.len(), 2);
        assert_eq!(d.comment_count, 2);
        assert_eq!(d.articles_by_category, vec![CategoryArticleCount { category: "News".into(), articles: 2 }]);
        assert_eq!(
            d.hits_by_country,
            vec![
                CountryHitCount { country: "NL".into(), hits: 2 },
                CountryHitCount { country: UNKNOWN_COUNTRY.into(), hits: 1 },
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn dashboard_requires_staff() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let ctx = RequestContext::anonymous("127.0.0.1");
        assert!(matches!(dashboard(&db, &ctx).await, Err(ServiceError::Unauthenticated)));
        Ok(())
    }
}
