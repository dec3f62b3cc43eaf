//! Application error types.
//!
//! Provides the unified error type used by all handlers and the mapping
//! to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Result alias using [`AppError`].
pub type AppResult<T> = Result<T, AppError>;

/// Application error.
///
/// Two tiers: failures establishing a connection (network unreachable,
/// auth rejected) and failures executing a statement (bad SQL, missing
/// table, permission denied). Both surface to the client as a 500 with a
/// human-readable message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Connection-level failure.
    #[error("database connection failed: {0}")]
    DatabaseConnection(String),

    /// Execution-level failure.
    #[error("query execution failed: {0}")]
    DatabaseQuery(String),
}

/// Error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub detail: String,
}

impl AppError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::DatabaseConnection(_) | AppError::DatabaseQuery(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connection_failure_maps_to_500() {
        let response =
            AppError::DatabaseConnection("Access denied for user 'root'".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.contains("database connection failed"));
        assert!(detail.contains("Access denied"));
    }

    #[tokio::test]
    async fn query_failure_maps_to_500() {
        let response = AppError::DatabaseQuery("table 'app.missing' doesn't exist".into())
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .contains("query execution failed"));
    }
}
