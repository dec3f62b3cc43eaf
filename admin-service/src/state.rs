//! Application state for the admin service.

use std::sync::Arc;

use common::config::{AppConfig, DbConfig};

use crate::provider::MySqlProvider;

/// Application state shared across handlers.
///
/// Holds only immutable configuration; no cross-request mutable state.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub provider: Arc<MySqlProvider>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: AppConfig, db: DbConfig) -> Self {
        Self {
            config,
            provider: Arc::new(MySqlProvider::new(db)),
        }
    }
}
