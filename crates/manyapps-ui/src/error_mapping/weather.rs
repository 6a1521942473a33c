use crate::services::weather_service::WeatherError as UiWeatherError;
use manyapps_core::{AppError, WeatherError};

impl From<UiWeatherError> for AppError {
    fn from(e: UiWeatherError) -> Self {
        match e {
            UiWeatherError::Fetch(inner) => inner.into(),
            UiWeatherError::NotInitialized => AppError::Weather(WeatherError::ServiceUnavailable),
            UiWeatherError::Cancelled => AppError::Service("Weather request cancelled".to_string()),
        }
    }
}
