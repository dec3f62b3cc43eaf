//! Shared modules for the MySQL admin API.

pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod utils;
