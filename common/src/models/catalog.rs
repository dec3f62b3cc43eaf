//! Catalog introspection models.
//!
//! Transfer shapes for databases, tables, columns and paginated row data.
//! All are derived fresh from the backing server on every call; nothing
//! here is persisted.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A JSON object keyed by column name, in server column order.
pub type RowObject = serde_json::Map<String, serde_json::Value>;

/// A database visible on the server.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DatabaseInfo {
    /// Database name.
    pub name: String,
}

/// A table within a database.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TableInfo {
    /// Table name.
    pub name: String,
    /// Database the table belongs to.
    pub database: String,
}

/// Column metadata, mirroring `INFORMATION_SCHEMA.COLUMNS`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct ColumnInfo {
    /// Column name.
    pub column_name: String,
    /// Column data type (e.g. `varchar`, `int`).
    pub data_type: String,
    /// `YES` / `NO`.
    pub is_nullable: String,
    /// Column default, absent for columns without one.
    pub column_default: Option<String>,
    /// Key classification (`PRI`, `UNI`, `MUL` or empty).
    pub column_key: String,
    /// Extra attributes (e.g. `auto_increment`).
    pub extra: String,
}

/// Pagination snapshot of a table.
///
/// `rows` reflects `limit`/`offset` at call time; `total_rows` is the
/// unbounded count taken in the same request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TableData {
    /// Column metadata, ordered by ordinal position.
    pub columns: Vec<ColumnInfo>,
    /// Row data as dynamically-keyed objects.
    #[schema(value_type = Vec<Object>)]
    pub rows: Vec<RowObject>,
    /// Total row count, independent of pagination.
    pub total_rows: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_column_default_serializes_as_null() {
        let column = ColumnInfo {
            column_name: "id".into(),
            data_type: "int".into(),
            is_nullable: "NO".into(),
            column_default: None,
            column_key: "PRI".into(),
            extra: "auto_increment".into(),
        };
        let json = serde_json::to_value(&column).unwrap();
        assert!(json.as_object().unwrap().contains_key("column_default"));
        assert!(json["column_default"].is_null());
    }

    #[test]
    fn table_data_shape() {
        let mut row = RowObject::new();
        row.insert("id".into(), serde_json::json!(1));
        row.insert("name".into(), serde_json::json!("alice"));

        let data = TableData {
            columns: vec![],
            rows: vec![row],
            total_rows: 150,
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["total_rows"], 150);
        assert_eq!(json["rows"][0]["name"], "alice");
    }

    #[test]
    fn row_object_preserves_insertion_order() {
        let mut row = RowObject::new();
        row.insert("z_last".into(), serde_json::json!(1));
        row.insert("a_first".into(), serde_json::json!(2));
        let keys: Vec<&String> = row.keys().collect();
        assert_eq!(keys, vec!["z_last", "a_first"]);
    }
}
