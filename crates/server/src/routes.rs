pub mod articles;
pub mod dashboard;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::{metrics::encode_metrics, types::Health};

use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[utoipa::path(
    get, path = "/metrics", tag = "health",
    responses((status = 200, description = "Prometheus text exposition"))
)]
pub async fn metrics() -> Response {
    match encode_metrics() {
        Ok(text) => ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], text).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e).into_response(),
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: public pages, back office, ops endpoints
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Public routes (article pages + ops)
    let public = Router::new()
        .route("/", get(articles::index))
        .route("/search", get(articles::search))
        .route(
            "/articles/:id",
            get(articles::show).post(articles::update).delete(articles::destroy),
        )
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi_json));

    // Back-office routes; handlers reject callers without a staff role
    let backend = Router::new()
        .route("/articles", post(articles::store))
        .route("/articles/create", get(articles::create))
        .route("/articles/:id/edit", get(articles::edit))
        .route("/articles/:id/toggle-publish", post(articles::toggle_publish))
        .route("/admin/articles", get(articles::admin_index))
        .route("/dashboard", get(dashboard::index));

    // Compose
    public
        .merge(backend)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
