//! MySQL 只读管理 API 服务
//!
//! 面向数据库管理的只读 HTTP 门面，提供：
//! - 用户账号列表
//! - 数据库与表枚举
//! - 表结构与分页数据查询

mod handlers;
mod provider;
mod routes;
mod service;
mod state;

use axum::http::{header, HeaderValue, Method};
use axum::{middleware, routing::get, Json, Router};
use common::config::{AppConfig, DbConfig};
use common::middleware::request_id::request_id_middleware;
use state::AppState;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;

const SERVICE_NAME: &str = "admin-service";

/// 本地开发前端的固定跨域白名单
const ALLOWED_ORIGINS: [&str; 3] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://localhost:8081",
];

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MySQL Admin API",
        version = "0.1.0",
        description = "MySQL 只读管理 API"
    ),
    paths(
        handlers::root,
        handlers::health_check,
        handlers::list_users,
        handlers::list_databases,
        handlers::list_tables,
        handlers::get_table_structure,
        handlers::get_table_data,
    ),
    components(schemas(
        common::models::UserInfo,
        common::models::DatabaseInfo,
        common::models::TableInfo,
        common::models::ColumnInfo,
        common::models::TableData,
        common::errors::ErrorBody,
        handlers::MessageResponse,
        handlers::HealthResponse,
    )),
    tags(
        (name = "catalog", description = "目录查询端点"),
        (name = "meta", description = "服务元信息端点")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Load .env file (if present) before anything else
    load_dotenv();

    // 初始化日志追踪
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // 加载配置（启动时一次性构建，之后不再变更）
    let config = AppConfig::load();
    let db = DbConfig::from_env();
    info!(
        mysql_host = %db.host,
        mysql_port = db.port,
        mysql_user = %db.user,
        default_database = %db.database,
        "MySQL 目标配置"
    );

    // 创建应用状态
    let state = AppState::new(config.clone(), db);

    // 创建路由
    let app = create_router(state);

    // 启动服务
    let addr = format!("{}:{}", config.host, config.port);
    info!(service = SERVICE_NAME, address = %addr, "启动服务");

    let listener = TcpListener::bind(&addr).await.expect("绑定地址失败");
    axum::serve(listener, app).await.expect("服务启动失败");
}

fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(
            ALLOWED_ORIGINS.map(|origin| origin.parse::<HeaderValue>().expect("无效的跨域来源")),
        )
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .merge(routes::router())
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Load .env file from the working directory (best-effort, no error if missing).
fn load_dotenv() {
    let env_path = std::path::Path::new(".env");
    if env_path.exists() {
        if let Ok(content) = std::fs::read_to_string(env_path) {
            for line in content.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim();
                    // Only set if not already set by the environment
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
        }
    }
}
