//! # Web API Application State

use crate::client::FormSource;
use sqlx::MySqlPool;
use std::sync::Arc;

/// Shared by every handler; cloned per request
#[derive(Clone)]
pub struct AppState {
    pub pool: MySqlPool,
    pub form_source: Arc<dyn FormSource>,
}

impl AppState {
    pub fn new(pool: MySqlPool, form_source: Arc<dyn FormSource>) -> Self {
        Self { pool, form_source }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("pool_size", &self.pool.size())
            .finish()
    }
}
