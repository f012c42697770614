use axum::{http::StatusCode, response::Json};
use pizzeria_catalog::CatalogError;
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("validation errors: {0:?}")]
    Validation(Vec<String>),
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::RestaurantNotFound
            | CatalogError::PizzaNotFound
            | CatalogError::AssignmentTargetNotFound => ApiError::NotFound(err.to_string()),
            CatalogError::Validation(messages) => ApiError::Validation(messages),
            CatalogError::Database(_)
            | CatalogError::Connection(_)
            | CatalogError::Pool(_)
            | CatalogError::Migration(_) => ApiError::InternalError(err.to_string()),
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, json!({ "errors": errors })),
            ApiError::InternalError(msg) => {
                error!(%msg, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
