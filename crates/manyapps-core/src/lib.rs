pub mod app;
pub mod config;
pub mod context;
pub mod error;
pub mod storage;

pub use app::App;
pub use config::{
    CalculatorConfig, Config, StorageConfig, UiConfig, ValidationResult, WeatherConfig,
};
pub use context::FeatureContext;
pub use error::{AppError, ConfigError, NetworkError, ReqwestErrorExt, StorageError, WeatherError};
pub use storage::{FileStore, KeyValueStore, MemoryStore, SharedStore};

use anyhow::Result;

/// Initialize the core application
pub fn init() -> Result<()> {
    // stdout is reserved for rendered pages
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("ManyApps core initialized");
    Ok(())
}
