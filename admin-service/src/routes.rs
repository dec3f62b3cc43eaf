//! 路由模块

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/users", get(handlers::list_users))
        .route("/databases", get(handlers::list_databases))
        .route("/databases/{database_name}/tables", get(handlers::list_tables))
        .route(
            "/databases/{database_name}/tables/{table_name}/structure",
            get(handlers::get_table_structure),
        )
        .route(
            "/databases/{database_name}/tables/{table_name}/data",
            get(handlers::get_table_data),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use common::config::{AppConfig, DbConfig};
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState::new(
            AppConfig {
                host: "127.0.0.1".to_string(),
                port: 8001,
            },
            DbConfig {
                host: "localhost".to_string(),
                port: 3306,
                user: "root".to_string(),
                password: String::new(),
                database: "mysql".to_string(),
                connect_timeout_secs: 10,
            },
        )
    }

    #[tokio::test]
    async fn root_returns_service_banner() {
        let app = router().with_state(test_state());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["message"], "MySQL Admin API");
    }

    #[tokio::test]
    async fn health_reports_service_metadata() {
        let app = router().with_state(test_state());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "admin-service");
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = router().with_state(test_state());
        let response = app
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
