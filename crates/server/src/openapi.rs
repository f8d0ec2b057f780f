use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ArticleFormDoc {
    pub heading: String,
    pub content: String,
    pub category_id: i32,
    /// Defaults to `en`.
    pub language: Option<String>,
    /// Honoured on create only.
    pub is_published: Option<bool>,
    /// Whitespace separated keyword names.
    pub keywords: Option<String>,
}

#[derive(ToSchema)]
pub struct FlashDoc {
    /// `success`, `warning` or `error`
    pub level: String,
    pub message: String,
    pub location: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::metrics,
        crate::routes::articles::index,
        crate::routes::articles::show,
        crate::routes::articles::search,
        crate::routes::articles::create,
        crate::routes::articles::store,
        crate::routes::articles::edit,
        crate::routes::articles::update,
        crate::routes::articles::toggle_publish,
        crate::routes::articles::destroy,
        crate::routes::articles::admin_index,
        crate::routes::dashboard::index,
    ),
    components(schemas(HealthResponse, ArticleFormDoc, FlashDoc)),
    tags(
        (name = "health"),
        (name = "articles"),
        (name = "backend")
    )
)]
pub struct ApiDoc;
