use std::sync::Arc;

use crate::storage::SharedStore;
use crate::Config;

/// Collaborators handed to each feature when it is activated.
///
/// Features never reach for globals; everything they share with the rest of
/// the application arrives through this context.
#[derive(Clone)]
pub struct FeatureContext {
    pub config: Arc<Config>,
    pub store: SharedStore,
}

impl FeatureContext {
    pub fn new(config: Arc<Config>, store: SharedStore) -> Self {
        Self { config, store }
    }
}

impl std::fmt::Debug for FeatureContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureContext")
            .field("config_dir", &self.config.config_dir)
            .finish_non_exhaustive()
    }
}
