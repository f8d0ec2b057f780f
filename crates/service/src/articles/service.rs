use std::sync::Arc;

use chrono::Utc;
use common::metrics::{ARTICLES_CREATED_TOTAL, ARTICLE_VIEWS_TOTAL, NOTIFICATIONS_ENQUEUED_TOTAL, NOTIFICATIONS_FAILED_TOTAL};
use models::{address, article, article_keyword, category, comment, hit_logger, keyword, user};
use sea_orm::{
    sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr},
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseBackend, DatabaseConnection, EntityTrait,
    LoaderTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{info, instrument, warn};

use super::domain::{AdminArticleRow, ArticleDetail, ArticleForm, ArticleFormData, SearchResult};
use super::{hits, keywords};
use crate::auth::authz;
use crate::auth::domain::CurrentUser;
use crate::context::RequestContext;
use crate::errors::ServiceError;
use crate::notify::{ArticleNotification, NotificationQueue};
use crate::pagination::{self, Page, Pagination};
use models::user_role::Role;

const RELATED_LIMIT: u64 = 3;

/// Application service encapsulating the article rules.
/// Public operations only read published, non-deleted rows; back-office
/// operations require a staff member and apply the ownership rule.
#[derive(Clone)]
pub struct ArticleService {
    db: DatabaseConnection,
    queue: Arc<dyn NotificationQueue>,
    per_page: u64,
}

impl ArticleService {
    pub fn new(db: DatabaseConnection, queue: Arc<dyn NotificationQueue>, per_page: u64) -> Self {
        Self { db, queue, per_page }
    }

    pub fn db(&self) -> &DatabaseConnection { &self.db }

    fn page(&self, page: u64) -> Pagination { Pagination::new(page, self.per_page) }

    /// Published articles, newest first.
    #[instrument(skip(self))]
    pub async fn list_published(&self, page: u64) -> Result<Page<article::Model>, ServiceError> {
        let select = article::newest_first(article::find_visible());
        Ok(pagination::fetch_page(&self.db, select, self.page(page)).await?)
    }

    /// Public article page; counts a view from the requester's address.
    #[instrument(skip(self, ctx), fields(client_ip = %ctx.client_ip))]
    pub async fn show(&self, ctx: &RequestContext, id: i32) -> Result<ArticleDetail, ServiceError> {
        let found = article::find_visible()
            .filter(article::Column::Id.eq(id))
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("article"))?;

        hits::record_hit(&self.db, found.id, &ctx.client_ip).await?;
        ARTICLE_VIEWS_TOTAL.inc();
        let found = article::Entity::find_by_id(id).one(&self.db).await?.unwrap_or(found);

        let category = found
            .find_related(category::Entity)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("category"))?;
        let keywords = found
            .find_related(keyword::Entity)
            .order_by_asc(keyword::Column::Name)
            .all(&self.db)
            .await?;
        let comments = comment::list_published(&self.db, found.id).await?;
        let related = self.related(&found).await?;
        let unique_visitors = hit_logger::Entity::find()
            .filter(hit_logger::Column::ArticleId.eq(found.id))
            .count(&self.db)
            .await?;

        Ok(ArticleDetail { article: found, category, keywords, comments, related, unique_visitors })
    }

    /// Up to three other visible articles from the same category.
    pub async fn related(&self, of: &article::Model) -> Result<Vec<article::Model>, ServiceError> {
        let select = article::find_visible()
            .filter(article::Column::CategoryId.eq(of.category_id))
            .filter(article::Column::Id.ne(of.id));
        Ok(article::newest_first(select).limit(RELATED_LIMIT).all(&self.db).await?)
    }

    #[instrument(skip(self, ctx))]
    pub async fn create_form(&self, ctx: &RequestContext) -> Result<ArticleFormData, ServiceError> {
        authz::require_staff(ctx)?;
        let categories = category::list_active(&self.db).await?;
        Ok(ArticleFormData { categories, article: None, keywords: Vec::new() })
    }

    #[instrument(skip(self, ctx))]
    pub async fn edit_form(&self, ctx: &RequestContext, id: i32) -> Result<ArticleFormData, ServiceError> {
        let user = authz::require_staff(ctx)?;
        let existing = self.find_editable(id).await?;
        authz::authorize_owner(user, existing.user_id)?;
        let categories = category::list_active(&self.db).await?;
        let keywords = existing
            .find_related(keyword::Entity)
            .order_by_asc(keyword::Column::Name)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|k| k.name)
            .collect();
        Ok(ArticleFormData { categories, article: Some(existing), keywords })
    }

    /// Create an article with its keywords, then notify subscribers.
    #[instrument(skip(self, ctx, form), fields(client_ip = %ctx.client_ip))]
    pub async fn store(&self, ctx: &RequestContext, form: ArticleForm) -> Result<article::Model, ServiceError> {
        let author = authz::require_staff(ctx)?;
        let form = form.validated()?;
        self.ensure_active_category(form.category_id).await?;
        let names = keywords::parse_keywords(&form.keywords);

        let txn = self.db.begin().await?;
        let origin = address::find_or_create(&txn, &ctx.client_ip).await?;
        let now = Utc::now();
        let created = article::ActiveModel {
            heading: Set(form.heading),
            content: Set(form.content),
            category_id: Set(form.category_id),
            user_id: Set(author.id),
            address_id: Set(Some(origin.id)),
            language: Set(form.language),
            is_published: Set(form.is_published),
            published_at: Set(now.into()),
            is_deleted: Set(false),
            hit_count: Set(0),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        keywords::attach(&txn, created.id, &names).await?;
        txn.commit().await?;

        ARTICLES_CREATED_TOTAL.inc();
        info!(event = "article_stored", article_id = created.id, user_id = author.id, keywords = names.len(), "article created");
        self.notify_subscribers(&created, author).await;
        Ok(created)
    }

    /// Replace the editable fields and the keyword set of an article.
    #[instrument(skip(self, ctx, form))]
    pub async fn update(&self, ctx: &RequestContext, id: i32, form: ArticleForm) -> Result<article::Model, ServiceError> {
        let user = authz::require_staff(ctx)?;
        let existing = self.find_editable(id).await?;
        authz::authorize_owner(user, existing.user_id)?;
        let form = form.validated()?;
        if form.category_id != existing.category_id {
            self.ensure_active_category(form.category_id).await?;
        }
        let names = keywords::parse_keywords(&form.keywords);

        let txn = self.db.begin().await?;
        let mut am: article::ActiveModel = existing.into();
        am.heading = Set(form.heading);
        am.content = Set(form.content);
        am.category_id = Set(form.category_id);
        am.language = Set(form.language);
        am.updated_at = Set(Utc::now().into());
        let updated = am.update(&txn).await?;
        keywords::replace(&txn, updated.id, &names).await?;
        txn.commit().await?;

        info!(event = "article_updated", article_id = updated.id, user_id = user.id, "article updated");
        Ok(updated)
    }

    /// Flip the publication flag; the publish time is reset either way.
    #[instrument(skip(self, ctx))]
    pub async fn toggle_publish(&self, ctx: &RequestContext, id: i32) -> Result<article::Model, ServiceError> {
        let user = authz::require_staff(ctx)?;
        let existing = self.find_editable(id).await?;
        authz::authorize_owner(user, existing.user_id)?;

        let now = Utc::now();
        let published = !existing.is_published;
        let mut am: article::ActiveModel = existing.into();
        am.is_published = Set(published);
        am.published_at = Set(now.into());
        am.updated_at = Set(now.into());
        let updated = am.update(&self.db).await?;
        info!(event = "article_publish_toggled", article_id = id, is_published = published, "publish toggled");
        Ok(updated)
    }

    /// Soft delete.
    #[instrument(skip(self, ctx))]
    pub async fn destroy(&self, ctx: &RequestContext, id: i32) -> Result<(), ServiceError> {
        let user = authz::require_staff(ctx)?;
        let existing = self.find_editable(id).await?;
        authz::authorize_owner(user, existing.user_id)?;

        let mut am: article::ActiveModel = existing.into();
        am.is_deleted = Set(true);
        am.updated_at = Set(Utc::now().into());
        am.update(&self.db).await?;
        info!(event = "article_deleted", article_id = id, user_id = user.id, "article soft-deleted");
        Ok(())
    }

    /// Visible articles whose heading or content contains `query`, or that
    /// carry an active keyword containing it. Matching ignores case.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, page: u64) -> Result<SearchResult, ServiceError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ServiceError::Validation("query_string is required".into()));
        }
        let folded = fold_case(self.db.get_database_backend(), query);
        let pattern = format!("%{}%", escape_like(&folded));

        let keyword_article_ids: Vec<i32> = article_keyword::Entity::find()
            .select_only()
            .column(article_keyword::Column::ArticleId)
            .inner_join(keyword::Entity)
            .filter(keyword::Column::IsActive.eq(true))
            .filter(lower_like((keyword::Entity, keyword::Column::Name), &pattern))
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await?;

        let mut matches = Condition::any()
            .add(lower_like((article::Entity, article::Column::Heading), &pattern))
            .add(lower_like((article::Entity, article::Column::Content), &pattern));
        if !keyword_article_ids.is_empty() {
            matches = matches.add(article::Column::Id.is_in(keyword_article_ids));
        }
        let select = article::newest_first(article::find_visible().filter(matches));
        let articles = pagination::fetch_page(&self.db, select, self.page(page)).await?;
        Ok(SearchResult { query: query.to_string(), articles })
    }

    /// Back-office listing; authors only see their own articles.
    #[instrument(skip(self, ctx))]
    pub async fn admin_list(&self, ctx: &RequestContext) -> Result<Vec<AdminArticleRow>, ServiceError> {
        let user = authz::require_staff(ctx)?;
        let mut select = article::Entity::find()
            .filter(article::Column::IsDeleted.eq(false))
            .order_by_desc(article::Column::Id);
        if user.has_role(Role::Author) {
            select = select.filter(article::Column::UserId.eq(user.id));
        }
        let articles = select.all(&self.db).await?;

        let categories = articles.load_one(category::Entity, &self.db).await?;
        let keywords = articles
            .load_many_to_many(keyword::Entity, article_keyword::Entity, &self.db)
            .await?;
        let authors = articles.load_one(user::Entity, &self.db).await?;

        Ok(articles
            .into_iter()
            .zip(categories)
            .zip(keywords)
            .zip(authors)
            .map(|(((article, category), keywords), author)| AdminArticleRow {
                article,
                category,
                keywords,
                author: author.map(Into::into),
            })
            .collect())
    }

    /// Any non-deleted article, published or not.
    async fn find_editable(&self, id: i32) -> Result<article::Model, ServiceError> {
        article::Entity::find_by_id(id)
            .filter(article::Column::IsDeleted.eq(false))
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("article"))
    }

    async fn ensure_active_category(&self, id: i32) -> Result<(), ServiceError> {
        match category::Entity::find_by_id(id).one(&self.db).await? {
            Some(c) if c.is_active => Ok(()),
            Some(_) => Err(ServiceError::Validation("category is inactive".into())),
            None => Err(ServiceError::Validation("category does not exist".into())),
        }
    }

    /// Runs after commit; a failure here never undoes the article.
    async fn notify_subscribers(&self, created: &article::Model, author: &CurrentUser) {
        let recipients = match user::subscribed_emails(&self.db).await {
            Ok(r) => r,
            Err(e) => {
                NOTIFICATIONS_FAILED_TOTAL.inc();
                warn!(event = "notification_skipped", article_id = created.id, error = %e, "could not load subscribers");
                return;
            }
        };
        if recipients.is_empty() {
            info!(event = "notification_skipped", article_id = created.id, "no subscribers");
            return;
        }
        let job = ArticleNotification {
            article_id: created.id,
            heading: created.heading.clone(),
            author_name: author.name.clone(),
            recipients,
        };
        match self.queue.enqueue(job) {
            Ok(()) => NOTIFICATIONS_ENQUEUED_TOTAL.inc(),
            Err(e) => {
                NOTIFICATIONS_FAILED_TOTAL.inc();
                warn!(event = "notification_enqueue_failed", article_id = created.id, error = %e, "notification dropped");
            }
        }
    }
}

/// `lower(col) LIKE pattern ESCAPE '\'`
/// Lowercase `s` the way the backend's `lower()` does. SQLite only folds
/// ASCII letters, so a Unicode fold there would miss stored `É`.
fn fold_case(backend: DatabaseBackend, s: &str) -> String {
    match backend {
        DatabaseBackend::Sqlite => s.to_ascii_lowercase(),
        _ => s.to_lowercase(),
    }
}

fn lower_like<T: IntoColumnRef>(col: T, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(col))).like(LikeExpr::new(pattern).escape('\\'))
}

fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod fold_tests {
    use super::*;

    #[test]
    fn fold_case_follows_backend_lower() {
        assert_eq!(fold_case(DatabaseBackend::Sqlite, "Élan RUST"), "Élan rust");
        assert_eq!(fold_case(DatabaseBackend::Postgres, "Élan RUST"), "élan rust");
    }
}
