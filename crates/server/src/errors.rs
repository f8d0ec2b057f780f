use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::{Flash, FlashLevel};
use service::ServiceError;
use thiserror::Error;
use tracing::warn;

/// `303 See Other` to `location` carrying a flash message.
pub fn flash_redirect(level: FlashLevel, location: &str, message: &str) -> Response {
    let flash = Flash::new(level, location, message);
    (StatusCode::SEE_OTHER, [(header::LOCATION, location.to_string())], Json(flash)).into_response()
}

/// Handler error: a service failure plus the form to return to when
/// storage fails.
#[derive(Debug)]
pub struct ApiError {
    pub error: ServiceError,
    pub back: Option<String>,
}

impl ApiError {
    pub fn back_to(mut self, location: impl Into<String>) -> Self {
        self.back = Some(location.into());
        self
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        Self { error, back: None }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.error {
            ServiceError::NotFound(msg) => flash_redirect(FlashLevel::Warning, "/", &msg),
            ServiceError::Unauthorized => {
                flash_redirect(FlashLevel::Error, "/", &ServiceError::Unauthorized.to_string())
            }
            ServiceError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({"error": "validation", "message": msg})),
            )
                .into_response(),
            ServiceError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({"error": "unauthenticated", "message": "authentication required"})),
            )
                .into_response(),
            ServiceError::Db(fault) => {
                let back = self.back.unwrap_or_else(|| "/".to_string());
                warn!(fault = ?fault, back = %back, "storage failure returned to form");
                flash_redirect(FlashLevel::Error, &back, fault.user_message())
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database setup failed: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::errors::StorageFault;

    #[test]
    fn not_found_redirects_home_with_warning() {
        let resp = ApiError::from(ServiceError::not_found("article")).into_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], "/");
    }

    #[test]
    fn storage_error_returns_to_form() {
        let resp = ApiError::from(ServiceError::Db(StorageFault::Other)).back_to("/articles/create").into_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], "/articles/create");
    }

    #[test]
    fn validation_and_auth_statuses() {
        assert_eq!(
            ApiError::from(ServiceError::Validation("x".into())).into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ApiError::from(ServiceError::Unauthenticated).into_response().status(), StatusCode::UNAUTHORIZED);
    }
}
