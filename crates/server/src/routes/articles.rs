use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};
use common::types::FlashLevel;
use models::article;
use serde::Deserialize;
use service::articles::domain::{AdminArticleRow, ArticleDetail, ArticleForm, ArticleFormData, SearchResult};
use service::pagination::Page;
use tracing::info;

use crate::errors::{flash_redirect, ApiError};
use crate::extract::Ctx;
use crate::state::ServerState;

pub const ADMIN_ARTICLES: &str = "/admin/articles";

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct PageQuery {
    pub page: Option<u64>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct SearchQuery {
    pub query_string: Option<String>,
    pub page: Option<u64>,
}

#[utoipa::path(
    get, path = "/", tag = "articles",
    params(PageQuery),
    responses((status = 200, description = "Published articles, newest first"))
)]
pub async fn index(State(state): State<ServerState>, Query(q): Query<PageQuery>) -> Result<Json<Page<article::Model>>, ApiError> {
    Ok(Json(state.articles.list_published(q.page.unwrap_or(1)).await?))
}

#[utoipa::path(
    get, path = "/articles/{id}", tag = "articles",
    params(("id" = i32, Path, description = "Article id")),
    responses(
        (status = 200, description = "Article with category, keywords, comments and related articles"),
        (status = 303, description = "Not found; redirect home", body = crate::openapi::FlashDoc)
    )
)]
pub async fn show(State(state): State<ServerState>, Ctx(ctx): Ctx, Path(id): Path<i32>) -> Result<Json<ArticleDetail>, ApiError> {
    Ok(Json(state.articles.show(&ctx, id).await?))
}

#[utoipa::path(
    get, path = "/search", tag = "articles",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching articles"),
        (status = 422, description = "Missing query_string")
    )
)]
pub async fn search(State(state): State<ServerState>, Query(q): Query<SearchQuery>) -> Result<Json<SearchResult>, ApiError> {
    let query = q.query_string.unwrap_or_default();
    Ok(Json(state.articles.search(&query, q.page.unwrap_or(1)).await?))
}

#[utoipa::path(
    get, path = "/articles/create", tag = "backend",
    responses((status = 200, description = "Active categories"), (status = 401, description = "Not signed in"))
)]
pub async fn create(State(state): State<ServerState>, Ctx(ctx): Ctx) -> Result<Json<ArticleFormData>, ApiError> {
    Ok(Json(state.articles.create_form(&ctx).await?))
}

#[utoipa::path(
    post, path = "/articles", tag = "backend",
    request_body = crate::openapi::ArticleFormDoc,
    responses(
        (status = 303, description = "Stored; redirect to the admin list", body = crate::openapi::FlashDoc),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn store(State(state): State<ServerState>, Ctx(ctx): Ctx, Json(form): Json<ArticleForm>) -> Result<Response, ApiError> {
    let created = state
        .articles
        .store(&ctx, form)
        .await
        .map_err(|e| ApiError::from(e).back_to("/articles/create"))?;
    info!(article_id = created.id, "article_store_ok");
    Ok(flash_redirect(FlashLevel::Success, ADMIN_ARTICLES, "Article published successfully!"))
}

#[utoipa::path(
    get, path = "/articles/{id}/edit", tag = "backend",
    params(("id" = i32, Path, description = "Article id")),
    responses((status = 200, description = "Article and active categories"), (status = 303, description = "Not found or not allowed"))
)]
pub async fn edit(State(state): State<ServerState>, Ctx(ctx): Ctx, Path(id): Path<i32>) -> Result<Json<ArticleFormData>, ApiError> {
    Ok(Json(state.articles.edit_form(&ctx, id).await?))
}

#[utoipa::path(
    post, path = "/articles/{id}", tag = "backend",
    params(("id" = i32, Path, description = "Article id")),
    request_body = crate::openapi::ArticleFormDoc,
    responses((status = 303, description = "Updated, or redirected with an error", body = crate::openapi::FlashDoc))
)]
pub async fn update(
    State(state): State<ServerState>,
    Ctx(ctx): Ctx,
    Path(id): Path<i32>,
    Json(form): Json<ArticleForm>,
) -> Result<Response, ApiError> {
    state
        .articles
        .update(&ctx, id, form)
        .await
        .map_err(|e| ApiError::from(e).back_to(format!("/articles/{id}/edit")))?;
    Ok(flash_redirect(FlashLevel::Success, ADMIN_ARTICLES, "Article updated"))
}

#[utoipa::path(
    post, path = "/articles/{id}/toggle-publish", tag = "backend",
    params(("id" = i32, Path, description = "Article id")),
    responses((status = 303, description = "Publication flag flipped", body = crate::openapi::FlashDoc))
)]
pub async fn toggle_publish(State(state): State<ServerState>, Ctx(ctx): Ctx, Path(id): Path<i32>) -> Result<Response, ApiError> {
    state
        .articles
        .toggle_publish(&ctx, id)
        .await
        .map_err(|e| ApiError::from(e).back_to(ADMIN_ARTICLES))?;
    Ok(flash_redirect(FlashLevel::Success, ADMIN_ARTICLES, "Article updated"))
}

#[utoipa::path(
    delete, path = "/articles/{id}", tag = "backend",
    params(("id" = i32, Path, description = "Article id")),
    responses((status = 303, description = "Soft-deleted", body = crate::openapi::FlashDoc))
)]
pub async fn destroy(State(state): State<ServerState>, Ctx(ctx): Ctx, Path(id): Path<i32>) -> Result<Response, ApiError> {
    state
        .articles
        .destroy(&ctx, id)
        .await
        .map_err(|e| ApiError::from(e).back_to(ADMIN_ARTICLES))?;
    Ok(flash_redirect(FlashLevel::Success, ADMIN_ARTICLES, "Article deleted"))
}

#[utoipa::path(
    get, path = "/admin/articles", tag = "backend",
    responses((status = 200, description = "Non-deleted articles, authors see their own"), (status = 401, description = "Not signed in"))
)]
pub async fn admin_index(State(state): State<ServerState>, Ctx(ctx): Ctx) -> Result<Json<Vec<AdminArticleRow>>, ApiError> {
    Ok(Json(state.articles.admin_list(&ctx).await?))
}
