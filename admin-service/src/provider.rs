//! MySQL 连接提供者
//!
//! 按规格不做连接池：每次调用打开一个新连接，执行完毕后关闭。
//! 连接级错误与执行级错误分别映射为 [`AppError`] 的两个变体。

use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{Column, Connection, Row};

use common::config::DbConfig;
use common::errors::{AppError, AppResult};
use common::models::catalog::RowObject;

/// Opens one fresh MySQL connection per call, no pooling and no retry.
pub struct MySqlProvider {
    config: DbConfig,
}

impl MySqlProvider {
    /// Creates a provider around an immutable connection configuration.
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }

    /// Opens a new connection, selecting `database` if given, else the
    /// configured default. Connection failures are logged and never retried.
    async fn connect(&self, database: Option<&str>) -> AppResult<MySqlConnection> {
        let database = database.unwrap_or(&self.config.database);
        let options = MySqlConnectOptions::new()
            .host(&self.config.host)
            .port(self.config.port)
            .username(&self.config.user)
            .password(&self.config.password)
            .database(database);

        let timeout = Duration::from_secs(self.config.connect_timeout_secs);
        match tokio::time::timeout(timeout, MySqlConnection::connect_with(&options)).await {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(e)) => {
                tracing::error!(
                    host = %self.config.host,
                    port = self.config.port,
                    user = %self.config.user,
                    database = %database,
                    error = %e,
                    "MySQL 连接失败"
                );
                Err(AppError::DatabaseConnection(e.to_string()))
            }
            Err(_) => {
                tracing::error!(
                    host = %self.config.host,
                    port = self.config.port,
                    "MySQL 连接超时"
                );
                Err(AppError::DatabaseConnection(format!(
                    "connect timeout after {}s",
                    self.config.connect_timeout_secs
                )))
            }
        }
    }

    /// Runs a statement verbatim and returns all result rows in server order.
    ///
    /// The connection is closed on every exit path before returning.
    pub async fn fetch_all(&self, sql: &str, database: Option<&str>) -> AppResult<Vec<MySqlRow>> {
        let mut conn = self.connect(database).await?;
        let result = sqlx::query(sql).fetch_all(&mut conn).await;
        let _ = conn.close().await;

        result.map_err(|e| {
            tracing::error!(error = %e, "查询执行失败");
            AppError::DatabaseQuery(e.to_string())
        })
    }

    /// Runs a statement verbatim and returns the affected row count.
    ///
    /// The connection is closed on every exit path before returning.
    pub async fn execute(&self, sql: &str, database: Option<&str>) -> AppResult<u64> {
        let mut conn = self.connect(database).await?;
        let result = sqlx::query(sql).execute(&mut conn).await;
        let _ = conn.close().await;

        result.map(|done| done.rows_affected()).map_err(|e| {
            tracing::error!(error = %e, "语句执行失败");
            AppError::DatabaseQuery(e.to_string())
        })
    }
}

/// Converts a row to a JSON object keyed by column name, in column order.
pub fn row_to_map(row: &MySqlRow) -> RowObject {
    let mut object = RowObject::new();
    for column in row.columns() {
        object.insert(column.name().to_string(), decode_column(row, column.ordinal()));
    }
    object
}

/// Returns the first column of a row as a string.
///
/// `SHOW DATABASES` / `SHOW TABLES` results carry a single column whose
/// name varies with the server, so access is positional.
pub fn first_column(row: &MySqlRow) -> AppResult<String> {
    row.try_get::<String, _>(0)
        .map_err(|e| AppError::DatabaseQuery(e.to_string()))
}

/// Decodes a single column to a tagged JSON scalar.
///
/// Tries concrete types from most to least specific; anything that cannot
/// be decoded becomes JSON null.
fn decode_column(row: &MySqlRow, idx: usize) -> Value {
    if let Ok(v) = row.try_get::<Option<u64>, _>(idx) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<i64>, _>(idx) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<i32>, _>(idx) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<u32>, _>(idx) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<i16>, _>(idx) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<u16>, _>(idx) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<i8>, _>(idx) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<u8>, _>(idx) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<bool>, _>(idx) {
        return v.map(Value::Bool).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<f64>, _>(idx) {
        return v.and_then(float_value).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<f32>, _>(idx) {
        return v.and_then(|f| float_value(f as f64)).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<Decimal>, _>(idx) {
        return v
            .and_then(|d| d.to_f64())
            .and_then(float_value)
            .unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<String>, _>(idx) {
        return v.map(Value::String).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<DateTime<Utc>>, _>(idx) {
        return v.map(|dt| Value::String(dt.to_rfc3339())).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<NaiveDateTime>, _>(idx) {
        return v
            .map(|dt| Value::String(dt.format("%Y-%m-%d %H:%M:%S").to_string()))
            .unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<NaiveDate>, _>(idx) {
        return v
            .map(|d| Value::String(d.format("%Y-%m-%d").to_string()))
            .unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<NaiveTime>, _>(idx) {
        return v
            .map(|t| Value::String(t.format("%H:%M:%S").to_string()))
            .unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<Vec<u8>>, _>(idx) {
        return v
            .map(|b| Value::String(String::from_utf8_lossy(&b).into_owned()))
            .unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<Value>, _>(idx) {
        return v.unwrap_or(Value::Null);
    }

    Value::Null
}

fn float_value(f: f64) -> Option<Value> {
    serde_json::Number::from_f64(f).map(Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_floats_become_null() {
        assert!(float_value(f64::NAN).is_none());
        assert!(float_value(f64::INFINITY).is_none());
        assert_eq!(float_value(1.5), Some(serde_json::json!(1.5)));
    }
}
