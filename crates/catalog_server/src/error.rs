//! Mapping from catalog errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog_core::{CatalogServiceError, ProductId, ProductValidationError, RepoError};
use log::error;
use serde_json::json;

/// Error returned by product handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(ProductId),
    Validation(ProductValidationError),
    Storage(RepoError),
    /// The blocking storage task panicked or was cancelled.
    Worker(String),
}

impl From<CatalogServiceError> for ApiError {
    fn from(value: CatalogServiceError) -> Self {
        match value {
            CatalogServiceError::ProductNotFound(id) => Self::NotFound(id),
            CatalogServiceError::Repo(err) => Self::Storage(err),
        }
    }
}

impl From<ProductValidationError> for ApiError {
    fn from(value: ProductValidationError) -> Self {
        Self::Validation(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(id) => (
                StatusCode::NOT_FOUND,
                CatalogServiceError::ProductNotFound(id).to_string(),
            ),
            Self::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Self::Storage(err) => {
                error!("event=http_storage_error module=http status=error error={err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal storage error".to_string(),
                )
            }
            Self::Worker(message) => {
                error!("event=http_worker_error module=http status=error error={message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal storage error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use catalog_core::ProductValidationError;

    #[test]
    fn worker_failures_map_to_internal_error() {
        let response = ApiError::Worker("task panicked".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_and_validation_keep_client_statuses() {
        assert_eq!(
            ApiError::NotFound(3).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Validation(ProductValidationError::BlankName)
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
    }
}
