use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable that overrides the weather API key.
pub const WEATHER_API_KEY_ENV: &str = "MANYAPPS_WEATHER_API_KEY";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Local key-value storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Calculator settings
    #[serde(default)]
    pub calculator: CalculatorConfig,

    /// Weather settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// File name of the key-value store, relative to `config_dir`
    pub file_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            file_name: "storage.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// How many history entries the calculator view shows
    pub history_limit: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self { history_limit: 5 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Current-conditions endpoint
    pub api_url: String,

    /// API key sent as the `key` query parameter.
    /// Falls back to `MANYAPPS_WEATHER_API_KEY` when empty.
    #[serde(default)]
    pub api_key: String,

    /// Locale code sent as the `lang` query parameter
    pub lang: String,

    /// HTTP request timeout
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.weatherapi.com/v1/current.json".to_string(),
            api_key: String::new(),
            lang: "sr".to_string(),
            timeout_secs: 10,
        }
    }
}

impl WeatherConfig {
    /// The configured key, or the environment override when the file leaves it blank.
    pub fn effective_api_key(&self) -> String {
        if !self.api_key.trim().is_empty() {
            return self.api_key.clone();
        }
        std::env::var(WEATHER_API_KEY_ENV).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Title shown in the navigation bar
    pub title: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: "Jaka App".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("manyapps");

        Self {
            config_dir,
            storage: StorageConfig::default(),
            calculator: CalculatorConfig::default(),
            weather: WeatherConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, creating default if it doesn't exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.api_url, "weather.api_url", &mut result);

        if self.weather.timeout_secs == 0 {
            result.add_error("weather.timeout_secs", "Timeout must be greater than 0");
        } else if self.weather.timeout_secs > 300 {
            result.add_warning(
                "weather.timeout_secs",
                "Timeout is unusually long (>300 seconds)",
            );
        }

        if self.weather.lang.trim().is_empty() {
            result.add_error("weather.lang", "Locale code must not be empty");
        }

        if self.weather.effective_api_key().trim().is_empty() {
            result.add_warning(
                "weather.api_key",
                format!(
                    "No API key configured (set it in config or {}) - weather lookups will fail",
                    WEATHER_API_KEY_ENV
                ),
            );
        }

        if self.calculator.history_limit == 0 {
            result.add_error(
                "calculator.history_limit",
                "History limit must be greater than 0",
            );
        }

        if self.storage.file_name.trim().is_empty() {
            result.add_error("storage.file_name", "Storage file name must not be empty");
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Path of the key-value storage file
    pub fn storage_path(&self) -> PathBuf {
        self.config_dir.join(&self.storage.file_name)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("manyapps");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn keyed_config() -> Config {
        let mut config = Config::default();
        config.weather.api_key = "test-key".to_string();
        config
    }

    #[test]
    fn test_valid_default_config() {
        let config = keyed_config();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_invalid_url() {
        let mut config = keyed_config();
        config.weather.api_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.api_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = keyed_config();
        config.weather.api_url = "ftp://example.com/current.json".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let mut config = keyed_config();
        config.weather.timeout_secs = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.timeout_secs"));
    }

    #[test]
    fn test_zero_history_limit_is_error() {
        let mut config = keyed_config();
        config.calculator.history_limit = 0;
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "calculator.history_limit"));
    }

    #[test]
    fn test_explicit_api_key_suppresses_warning() {
        let result = keyed_config().validate();
        assert!(!result.warnings.iter().any(|w| w.field == "weather.api_key"));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.calculator.history_limit, 5);
        assert_eq!(config.weather.lang, "sr");
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = keyed_config();
        config.calculator.history_limit = 8;
        config.ui.title = "Custom".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.calculator.history_limit, 8);
        assert_eq!(loaded.ui.title, "Custom");
        assert_eq!(loaded.weather.api_key, "test-key");
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "config_dir = \"/tmp/manyapps\"\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.storage.file_name, "storage.json");
        assert_eq!(loaded.ui.title, "Jaka App");
        assert_eq!(loaded.storage_path(), PathBuf::from("/tmp/manyapps/storage.json"));
    }

    #[test]
    fn test_env_api_key_is_read_at_use_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        std::env::set_var(WEATHER_API_KEY_ENV, "first-secret");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.weather.api_key, "");
        assert_eq!(config.weather.effective_api_key(), "first-secret");
        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert!(!on_disk.contains("first-secret"));

        std::env::set_var(WEATHER_API_KEY_ENV, "rotated-key");
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.weather.effective_api_key(), "rotated-key");

        std::env::remove_var(WEATHER_API_KEY_ENV);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
