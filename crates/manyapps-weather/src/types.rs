use chrono::{DateTime, Local};
use manyapps_core::{AppError, ConfigError, NetworkError, ReqwestErrorExt};
use serde::{Deserialize, Serialize};

/// Message shown for any failed lookup (the UI locale is Serbian).
pub const SEARCH_FAILED_MESSAGE: &str = "Grad nije pronađen ili se desila greška";

/// Icon value used when the API does not supply one.
pub const DEFAULT_ICON: &str = "default";

/// Current conditions for one city, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub city: String,
    /// Degrees Celsius, rounded to the nearest integer
    pub temperature: i32,
    pub description: String,
    /// Relative humidity in percent
    pub humidity: i32,
    /// Metres per second, one decimal
    pub wind_speed: f64,
    /// Icon URL, or [`DEFAULT_ICON`]
    pub icon: String,
}

impl WeatherData {
    /// Convert the raw API payload into display units.
    pub fn from_api(raw: ApiResponse) -> Self {
        let icon = raw
            .current
            .condition
            .icon
            .filter(|icon| !icon.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ICON.to_string());

        Self {
            city: raw.location.name,
            temperature: round_half_up(raw.current.temp_c) as i32,
            description: raw.current.condition.text,
            humidity: round_half_up(raw.current.humidity) as i32,
            wind_speed: kph_to_mps(raw.current.wind_kph),
            icon,
        }
    }
}

/// Round to the nearest integer with halves going towards positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// km/h to m/s, rounded to one decimal.
pub fn kph_to_mps(kph: f64) -> f64 {
    (kph / 3.6 * 10.0).round() / 10.0
}

/// Immutable view of the weather panel's state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherSnapshot {
    pub current_weather: Option<WeatherData>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// When `current_weather` last changed
    pub updated_at: Option<DateTime<Local>>,
}

/// Raw `current.json` payload (only the consumed fields).
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub location: ApiLocation,
    pub current: ApiCurrent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiLocation {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCurrent {
    pub temp_c: f64,
    pub condition: ApiCondition,
    pub humidity: f64,
    pub wind_kph: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCondition {
    pub text: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorDetail {
    #[allow(dead_code)]
    pub code: Option<i64>,
    pub message: String,
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Weather API returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid weather configuration: {0}")]
    Config(String),
}

impl From<WeatherError> for AppError {
    fn from(e: WeatherError) -> Self {
        use manyapps_core::WeatherError as CoreWeatherError;

        match e {
            WeatherError::Network(inner) => AppError::Network(inner.into_network_error()),
            WeatherError::Status { status: 400 | 404, message } => {
                AppError::Weather(CoreWeatherError::CityNotFound(message))
            }
            WeatherError::Status { status: 401 | 403, .. } => {
                AppError::Weather(CoreWeatherError::InvalidApiKey)
            }
            WeatherError::Status { status, .. } if status >= 500 => {
                AppError::Weather(CoreWeatherError::ServiceUnavailable)
            }
            WeatherError::Status { message, .. } => {
                AppError::Weather(CoreWeatherError::ApiError(message))
            }
            WeatherError::Parse(s) => AppError::Network(NetworkError::InvalidResponse(s)),
            WeatherError::Config(s) => AppError::Config(ConfigError::Invalid(s)),
        }
    }
}
