//! Application state shared by all handlers.

use std::sync::Arc;

use crate::config::{Config, PointsConfig};
use crate::db::DbPool;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Notebook database (all users share one file)
    pub db: DbPool,

    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: DbPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    pub fn points(&self) -> &PointsConfig {
        &self.config.points
    }
}
