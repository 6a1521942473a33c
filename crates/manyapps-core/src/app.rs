use anyhow::{Context, Result};
use std::sync::Arc;

use crate::storage::{FileStore, SharedStore};
use crate::{Config, FeatureContext};

/// Main application state and lifecycle manager
pub struct App {
    config: Arc<Config>,
    store: SharedStore,
}

impl App {
    /// Create a new application instance from the on-disk configuration.
    pub fn new() -> Result<Self> {
        let (config, _) = Config::load_validated()?;
        let storage_path = config.storage_path();
        let store = FileStore::open(&storage_path).with_context(|| {
            format!("Failed to open key-value store at {}", storage_path.display())
        })?;

        Ok(Self::with_parts(config, Arc::new(store)))
    }

    /// Assemble an application from explicit parts (tests, embedding).
    pub fn with_parts(config: Config, store: SharedStore) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Context handed to features on activation.
    pub fn context(&self) -> FeatureContext {
        FeatureContext::new(self.config.clone(), self.store.clone())
    }

    /// Shutdown the application
    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down application");
        Ok(())
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_context_shares_store() {
        let app = App::with_parts(Config::default(), MemoryStore::shared());
        let ctx = app.context();

        ctx.store.set_item("weather-city", "Paris").unwrap();
        assert_eq!(
            app.store().get_item("weather-city").unwrap().as_deref(),
            Some("Paris")
        );
        assert_eq!(ctx.config.calculator.history_limit, app.config().calculator.history_limit);
    }
}
