//! Shared data models for the admin API.

pub mod catalog;
pub mod user;

// Re-export commonly used types
pub use catalog::{ColumnInfo, DatabaseInfo, TableData, TableInfo};
pub use user::UserInfo;
