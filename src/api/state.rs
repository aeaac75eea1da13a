//! Application state for the subsidy engine API.

use std::sync::Arc;

use crate::config::ConfigLoader;

/// Shared application state.
///
/// The configuration is loaded once at startup and shared read-only by
/// every request.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }
}
