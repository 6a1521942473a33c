//! Weather state holder.

use chrono::{DateTime, Local};

use crate::types::{WeatherData, WeatherSnapshot};

#[derive(Debug, Default)]
pub struct WeatherState {
    state: WeatherSnapshot,
}

impl WeatherState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.state.is_loading = is_loading;
    }

    /// Store fresh weather; clears loading and any error.
    pub fn set_weather(&mut self, weather: WeatherData) {
        tracing::debug!("Weather state updated for {}", weather.city);
        self.state.current_weather = Some(weather);
        self.state.is_loading = false;
        self.state.error = None;
        self.state.updated_at = Some(Local::now());
    }

    /// Record a failure; clears loading, keeps the last weather.
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.state.error = Some(error.into());
        self.state.is_loading = false;
    }

    pub fn clear_error(&mut self) {
        self.state.error = None;
    }

    pub fn get_state(&self) -> WeatherSnapshot {
        self.state.clone()
    }

    pub fn current_weather(&self) -> Option<&WeatherData> {
        self.state.current_weather.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn updated_at(&self) -> Option<DateTime<Local>> {
        self.state.updated_at
    }
}
