//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::key::{self, KeyProvider};

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Holds the configuration and the optional key provider. Nothing in here is
/// mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub key_provider: Option<Arc<dyn KeyProvider>>,
}

impl AppState {
    /// Creates the state, building the key provider described by the configuration.
    pub fn new(config: AppConfig) -> Self {
        let key_provider = key::from_config(&config.key);
        Self {
            config: Arc::new(config),
            key_provider,
        }
    }

    /// Replaces the key provider, e.g. with a stub in tests.
    pub fn with_key_provider(mut self, provider: Arc<dyn KeyProvider>) -> Self {
        self.key_provider = Some(provider);
        self
    }
}
