//! HTTP client for the current-conditions endpoint.

use crate::types::{ApiErrorBody, ApiResponse, WeatherData, WeatherError};
use manyapps_core::WeatherConfig;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

const USER_AGENT: &str = concat!("ManyApps/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    api_url: String,
    api_key: String,
    lang: String,
}

impl WeatherProvider {
    /// Build a provider from the weather section of the configuration.
    ///
    /// # Errors
    ///
    /// Fails if the URL is blank or the HTTP client cannot be created.
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        if config.api_url.trim().is_empty() {
            return Err(WeatherError::Config("api_url is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            api_url: config.api_url.clone(),
            api_key: config.effective_api_key(),
            lang: config.lang.clone(),
        })
    }

    /// Fetch current conditions for `city`.
    ///
    /// # Errors
    ///
    /// Transport failures, non-success statuses and undecodable bodies are
    /// all reported as [`WeatherError`].
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self, city: &str) -> Result<WeatherData, WeatherError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", city),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            tracing::debug!("Weather API returned {}: {}", status, message);
            return Err(WeatherError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let raw: ApiResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))?;

        let data = WeatherData::from_api(raw);
        tracing::info!("Fetched weather for {}", data.city);
        Ok(data)
    }
}
