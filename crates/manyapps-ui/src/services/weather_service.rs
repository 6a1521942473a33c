//! Weather backend: async weather fetching.
//! Requests run on the services runtime; results come back via mpsc.

use std::sync::Arc;

use manyapps_weather::{WeatherData, WeatherProvider};

use crate::app_services::AppServices;

/// Error type for weather operations
#[derive(Debug)]
pub enum WeatherError {
    Fetch(manyapps_weather::WeatherError),
    NotInitialized,
    Cancelled,
}

impl std::fmt::Display for WeatherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherError::Fetch(e) => write!(f, "Weather error: {}", e),
            WeatherError::NotInitialized => write!(f, "Weather service not initialized"),
            WeatherError::Cancelled => write!(f, "Weather request cancelled"),
        }
    }
}

impl std::error::Error for WeatherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WeatherError::Fetch(e) => Some(e),
            _ => None,
        }
    }
}

/// Messages sent from async operations back to the event loop
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Result of fetching weather data for `city`
    FetchDone {
        city: String,
        result: Result<WeatherData, WeatherError>,
    },
}

/// Request current weather for `city` asynchronously.
/// Sends `FetchDone` on the channel when complete, or `Cancelled` on shutdown.
pub fn request_fetch(
    tx: &std::sync::mpsc::Sender<WeatherServiceMessage>,
    services: &AppServices,
    provider: Arc<WeatherProvider>,
    city: String,
) {
    let tx = tx.clone();
    let mut shutdown = services.subscribe_shutdown();

    services.runtime().spawn(async move {
        let result = tokio::select! {
            result = provider.fetch(&city) => result.map_err(WeatherError::Fetch),
            _ = shutdown.recv() => Err(WeatherError::Cancelled),
        };
        let _ = tx.send(WeatherServiceMessage::FetchDone { city, result });
    });
}
