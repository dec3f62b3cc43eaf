//! 目录查询服务模块
//!
//! 为每个端点构建 SQL 语句，通过连接提供者执行，并把结果行映射为响应模型。

use std::sync::Arc;

use sqlx::{FromRow, Row};

use common::errors::{AppError, AppResult};
use common::models::{ColumnInfo, DatabaseInfo, TableData, TableInfo, UserInfo};
use common::utils::{quote_ident, quote_literal};

use crate::provider::{first_column, row_to_map, MySqlProvider};

const USERS_QUERY: &str = "SELECT user, host, account_locked, password_expired \
     FROM mysql.user ORDER BY user, host";

const DATABASES_QUERY: &str = "SHOW DATABASES";

/// 只读目录查询服务
pub struct CatalogService {
    provider: Arc<MySqlProvider>,
}

impl CatalogService {
    /// 创建新的目录服务实例
    pub fn new(provider: Arc<MySqlProvider>) -> Self {
        Self { provider }
    }

    /// 列出服务器上的用户账号，按 user、host 排序
    pub async fn list_users(&self) -> AppResult<Vec<UserInfo>> {
        let rows = self.provider.fetch_all(USERS_QUERY, Some("mysql")).await?;

        rows.iter()
            .map(UserInfo::from_row)
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(|e| AppError::DatabaseQuery(e.to_string()))
    }

    /// 列出当前连接可见的数据库
    pub async fn list_databases(&self) -> AppResult<Vec<DatabaseInfo>> {
        let rows = self.provider.fetch_all(DATABASES_QUERY, None).await?;

        rows.iter()
            .map(|row| Ok(DatabaseInfo { name: first_column(row)? }))
            .collect()
    }

    /// 列出指定数据库中的表
    pub async fn list_tables(&self, database: &str) -> AppResult<Vec<TableInfo>> {
        let rows = self
            .provider
            .fetch_all(&tables_query(database), Some(database))
            .await?;

        rows.iter()
            .map(|row| {
                Ok(TableInfo {
                    name: first_column(row)?,
                    database: database.to_string(),
                })
            })
            .collect()
    }

    /// 查询表结构，按物理列位置排序
    pub async fn table_structure(
        &self,
        database: &str,
        table: &str,
    ) -> AppResult<Vec<ColumnInfo>> {
        let rows = self
            .provider
            .fetch_all(&structure_query(database, table), None)
            .await?;

        rows.iter()
            .map(ColumnInfo::from_row)
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(|e| AppError::DatabaseQuery(e.to_string()))
    }

    /// 查询表数据分页快照：列元数据 + 分页行 + 总行数
    ///
    /// 任一子步骤失败则整体失败，不返回部分结果。
    pub async fn table_data(
        &self,
        database: &str,
        table: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<TableData> {
        let columns = self.table_structure(database, table).await?;

        let data_rows = self
            .provider
            .fetch_all(&data_query(database, table, limit, offset), Some(database))
            .await?;
        let rows = data_rows.iter().map(row_to_map).collect();

        let count_rows = self
            .provider
            .fetch_all(&count_query(database, table), Some(database))
            .await?;
        let total_rows = match count_rows.first() {
            Some(row) => row
                .try_get::<i64, _>("total")
                .map_err(|e| AppError::DatabaseQuery(e.to_string()))?,
            None => 0,
        };

        Ok(TableData {
            columns,
            rows,
            total_rows,
        })
    }
}

fn tables_query(database: &str) -> String {
    format!("SHOW TABLES FROM {}", quote_ident(database))
}

fn structure_query(database: &str, table: &str) -> String {
    format!(
        "SELECT \
            COLUMN_NAME AS column_name, \
            DATA_TYPE AS data_type, \
            IS_NULLABLE AS is_nullable, \
            COLUMN_DEFAULT AS column_default, \
            COLUMN_KEY AS column_key, \
            EXTRA AS extra \
         FROM INFORMATION_SCHEMA.COLUMNS \
         WHERE TABLE_SCHEMA = {} AND TABLE_NAME = {} \
         ORDER BY ORDINAL_POSITION",
        quote_literal(database),
        quote_literal(table)
    )
}

fn data_query(database: &str, table: &str, limit: u64, offset: u64) -> String {
    format!(
        "SELECT * FROM {}.{} LIMIT {} OFFSET {}",
        quote_ident(database),
        quote_ident(table),
        limit,
        offset
    )
}

fn count_query(database: &str, table: &str) -> String {
    format!(
        "SELECT COUNT(*) AS total FROM {}.{}",
        quote_ident(database),
        quote_ident(table)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_query_quotes_database() {
        assert_eq!(tables_query("app db"), "SHOW TABLES FROM `app db`");
        assert_eq!(tables_query("we`ird"), "SHOW TABLES FROM `we``ird`");
    }

    #[test]
    fn structure_query_filters_and_orders() {
        let sql = structure_query("shop", "orders");
        assert!(sql.contains("WHERE TABLE_SCHEMA = 'shop' AND TABLE_NAME = 'orders'"));
        assert!(sql.ends_with("ORDER BY ORDINAL_POSITION"));
    }

    #[test]
    fn structure_query_escapes_literals() {
        let sql = structure_query("shop", "it's");
        assert!(sql.contains("TABLE_NAME = 'it''s'"));
    }

    #[test]
    fn data_query_applies_pagination() {
        assert_eq!(
            data_query("shop", "orders", 50, 100),
            "SELECT * FROM `shop`.`orders` LIMIT 50 OFFSET 100"
        );
    }

    #[test]
    fn count_query_is_unbounded() {
        assert_eq!(
            count_query("shop", "orders"),
            "SELECT COUNT(*) AS total FROM `shop`.`orders`"
        );
    }
}
