//! Handler模块

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use common::errors::AppError;
use common::models::{ColumnInfo, DatabaseInfo, TableData, TableInfo, UserInfo};

use crate::service::CatalogService;
use crate::state::AppState;

const DEFAULT_LIMIT: u64 = 100;

/// 根端点
#[utoipa::path(
    get,
    path = "/",
    tag = "meta",
    responses(
        (status = 200, description = "服务信息", body = MessageResponse)
    )
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "MySQL Admin API".to_string(),
    })
}

/// 健康检查端点
#[utoipa::path(
    get,
    path = "/health",
    tag = "meta",
    responses(
        (status = 200, description = "服务运行正常", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "admin-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

/// 列出 MySQL 用户账号
#[utoipa::path(
    get,
    path = "/users",
    tag = "catalog",
    responses(
        (status = 200, description = "用户列表", body = Vec<UserInfo>),
        (status = 500, description = "数据库连接或查询失败", body = common::errors::ErrorBody)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserInfo>>, AppError> {
    let service = CatalogService::new(state.provider.clone());
    let users = service.list_users().await?;
    tracing::debug!(count = users.len(), "用户查询完成");
    Ok(Json(users))
}

/// 列出数据库
#[utoipa::path(
    get,
    path = "/databases",
    tag = "catalog",
    responses(
        (status = 200, description = "数据库列表", body = Vec<DatabaseInfo>),
        (status = 500, description = "数据库连接或查询失败", body = common::errors::ErrorBody)
    )
)]
pub async fn list_databases(
    State(state): State<AppState>,
) -> Result<Json<Vec<DatabaseInfo>>, AppError> {
    let service = CatalogService::new(state.provider.clone());
    let databases = service.list_databases().await?;
    Ok(Json(databases))
}

/// 列出指定数据库中的表
#[utoipa::path(
    get,
    path = "/databases/{database_name}/tables",
    tag = "catalog",
    params(
        ("database_name" = String, Path, description = "数据库名")
    ),
    responses(
        (status = 200, description = "表列表", body = Vec<TableInfo>),
        (status = 500, description = "数据库连接或查询失败", body = common::errors::ErrorBody)
    )
)]
pub async fn list_tables(
    State(state): State<AppState>,
    Path(database_name): Path<String>,
) -> Result<Json<Vec<TableInfo>>, AppError> {
    let service = CatalogService::new(state.provider.clone());
    let tables = service.list_tables(&database_name).await?;
    Ok(Json(tables))
}

/// 查询表结构
#[utoipa::path(
    get,
    path = "/databases/{database_name}/tables/{table_name}/structure",
    tag = "catalog",
    params(
        ("database_name" = String, Path, description = "数据库名"),
        ("table_name" = String, Path, description = "表名")
    ),
    responses(
        (status = 200, description = "列元数据，按列位置排序", body = Vec<ColumnInfo>),
        (status = 500, description = "数据库连接或查询失败", body = common::errors::ErrorBody)
    )
)]
pub async fn get_table_structure(
    State(state): State<AppState>,
    Path((database_name, table_name)): Path<(String, String)>,
) -> Result<Json<Vec<ColumnInfo>>, AppError> {
    let service = CatalogService::new(state.provider.clone());
    let columns = service.table_structure(&database_name, &table_name).await?;
    Ok(Json(columns))
}

/// 查询表数据（分页）
#[utoipa::path(
    get,
    path = "/databases/{database_name}/tables/{table_name}/data",
    tag = "catalog",
    params(
        ("database_name" = String, Path, description = "数据库名"),
        ("table_name" = String, Path, description = "表名"),
        ("limit" = Option<u64>, Query, description = "返回行数上限，默认 100"),
        ("offset" = Option<u64>, Query, description = "起始偏移，默认 0")
    ),
    responses(
        (status = 200, description = "分页数据快照", body = TableData),
        (status = 500, description = "数据库连接或查询失败", body = common::errors::ErrorBody)
    )
)]
pub async fn get_table_data(
    State(state): State<AppState>,
    Path((database_name, table_name)): Path<(String, String)>,
    Query(params): Query<DataQuery>,
) -> Result<Json<TableData>, AppError> {
    let service = CatalogService::new(state.provider.clone());
    let data = service
        .table_data(&database_name, &table_name, params.limit, params.offset)
        .await?;
    Ok(Json(data))
}

/// 表数据分页参数
#[derive(Debug, Deserialize)]
pub struct DataQuery {
    /// 返回行数上限
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// 起始偏移
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

/// 根端点响应
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    /// 服务标语
    pub message: String,
}

/// 健康检查响应
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// 服务状态
    pub status: String,
    /// 服务名称
    pub service: String,
    /// 服务版本
    pub version: String,
    /// 当前时间戳
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_query_defaults() {
        let params: DataQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(params.limit, 100);
        assert_eq!(params.offset, 0);
    }

    #[test]
    fn data_query_accepts_explicit_values() {
        let params: DataQuery = serde_json::from_str(r#"{"limit": 50, "offset": 100}"#).unwrap();
        assert_eq!(params.limit, 50);
        assert_eq!(params.offset, 100);
    }
}
