//! Utility functions and helpers.

pub mod sql;

// Re-export commonly used functions
pub use sql::{quote_ident, quote_literal};
