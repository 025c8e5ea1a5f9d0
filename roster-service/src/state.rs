//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::repository::RosterSource;

/// Application state shared across handlers
///
/// Generic over the data source so the same router serves Postgres in
/// production and an in-memory roster in tests.
#[derive(Debug, Clone)]
pub struct AppState<S> {
    config: Arc<Config>,
    source: S,
}

impl<S: RosterSource> AppState<S> {
    /// Create state from a configuration and a data source
    pub fn new(config: Config, source: S) -> Self {
        Self {
            config: Arc::new(config),
            source,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the data source
    pub fn source(&self) -> &S {
        &self.source
    }
}
