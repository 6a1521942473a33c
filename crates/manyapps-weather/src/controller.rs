//! Weather view-controller: city input in, weather state out.
//!
//! A search is split into [`WeatherController::begin_search`] and
//! [`WeatherController::finish_search`] so an event loop can run the request
//! elsewhere and hand the result back. [`WeatherController::search_weather`]
//! runs both halves inline for async callers.

use std::sync::Arc;

use manyapps_core::FeatureContext;

use crate::city_store::CityStore;
use crate::provider::WeatherProvider;
use crate::state::WeatherState;
use crate::types::{WeatherData, WeatherError, SEARCH_FAILED_MESSAGE};

#[derive(Debug)]
pub struct WeatherController {
    state: WeatherState,
    provider: Arc<WeatherProvider>,
    cities: CityStore,
    /// Pending text typed into the search box
    place: String,
}

impl WeatherController {
    /// Activate the weather feature from the shared context.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP provider cannot be built from the configuration.
    pub fn activate(ctx: &FeatureContext) -> Result<Self, WeatherError> {
        let provider = WeatherProvider::new(&ctx.config.weather)?;
        tracing::info!("Weather activated");
        Ok(Self::new(
            WeatherState::new(),
            Arc::new(provider),
            CityStore::new(ctx.store.clone()),
        ))
    }

    pub fn new(state: WeatherState, provider: Arc<WeatherProvider>, cities: CityStore) -> Self {
        Self {
            state,
            provider,
            cities,
            place: String::new(),
        }
    }

    pub fn set_place(&mut self, place: impl Into<String>) {
        self.place = place.into();
    }

    pub fn place(&self) -> &str {
        &self.place
    }

    /// City to load on activation: the saved city, else the city of the
    /// weather already held in state.
    pub fn initial_city(&self) -> Option<String> {
        let saved = self.cities.get_city();
        let city = if saved.trim().is_empty() {
            self.state
                .current_weather()
                .map(|w| w.city.clone())
                .unwrap_or_default()
        } else {
            saved
        };

        let city = city.trim();
        (!city.is_empty()).then(|| city.to_string())
    }

    /// Start a search and return the city to fetch.
    ///
    /// The pending input wins over `city_name`. Returns `None` (and changes
    /// nothing) when both are blank; otherwise marks loading, clears the
    /// error and empties the input.
    pub fn begin_search(&mut self, city_name: &str) -> Option<String> {
        let typed = self.place.trim();
        let city = if typed.is_empty() {
            city_name.trim()
        } else {
            typed
        };
        if city.is_empty() {
            return None;
        }
        let city = city.to_string();

        self.place.clear();
        self.state.set_loading(true);
        self.state.clear_error();
        tracing::debug!("Searching weather for {}", city);
        Some(city)
    }

    /// Apply the outcome of a search started with [`Self::begin_search`].
    pub fn finish_search<E>(&mut self, city: &str, result: Result<WeatherData, E>)
    where
        E: std::fmt::Display,
    {
        match result {
            Ok(data) => {
                self.state.set_weather(data);
                if let Err(e) = self.cities.save_city(city) {
                    tracing::warn!("Failed to save city {}: {}", city, e);
                }
            }
            Err(e) => {
                tracing::error!("Weather lookup for {} failed: {}", city, e);
                self.state.set_error(SEARCH_FAILED_MESSAGE);
            }
        }
    }

    /// Search and wait for the result. Returns false if nothing was searched.
    pub async fn search_weather(&mut self, city_name: &str) -> bool {
        let Some(city) = self.begin_search(city_name) else {
            return false;
        };
        let result = self.provider.fetch(&city).await;
        self.finish_search(&city, result);
        true
    }

    /// Re-run the search for `city_name`; blank names are ignored.
    pub async fn refresh_weather(&mut self, city_name: &str) -> bool {
        if city_name.trim().is_empty() {
            return false;
        }
        self.search_weather(city_name).await
    }

    /// Load the initial city, if there is one.
    pub async fn load_initial(&mut self) -> bool {
        match self.initial_city() {
            Some(city) => self.search_weather(&city).await,
            None => false,
        }
    }

    pub fn state(&self) -> &WeatherState {
        &self.state
    }

    pub fn provider(&self) -> Arc<WeatherProvider> {
        self.provider.clone()
    }

    pub fn saved_city(&self) -> String {
        self.cities.get_city()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::city_store::CITY_KEY;
    use manyapps_core::{Config, MemoryStore, SharedStore};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn body(city: &str) -> serde_json::Value {
        serde_json::json!({
            "location": { "name": city },
            "current": {
                "temp_c": 15.0,
                "condition": { "text": "Oblačno", "icon": "//icon.png" },
                "humidity": 50,
                "wind_kph": 10.0
            }
        })
    }

    fn controller(server_uri: &str, store: SharedStore) -> WeatherController {
        let mut config = Config::default();
        config.weather.api_url = format!("{}/v1/current.json", server_uri);
        config.weather.api_key = "test-key".to_string();
        let ctx = FeatureContext::new(Arc::new(config), store);
        WeatherController::activate(&ctx).unwrap()
    }

    async fn mount_city(server: &MockServer, city: &str) {
        Mock::given(method("GET"))
            .and(path("/v1/current.json"))
            .and(query_param("q", city))
            .respond_with(ResponseTemplate::new(200).set_body_json(body(city)))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_search_success_updates_state_and_saves_city() {
        let server = MockServer::start().await;
        mount_city(&server, "London").await;
        let store = MemoryStore::shared();
        let mut c = controller(&server.uri(), store.clone());

        c.set_place("London");
        assert!(c.search_weather("").await);

        let state = c.state();
        assert!(!state.is_loading());
        assert_eq!(state.error(), None);
        let weather = state.current_weather().unwrap();
        assert_eq!(weather.city, "London");
        assert_eq!(weather.temperature, 15);
        assert_eq!(weather.wind_speed, 2.8);
        assert_eq!(c.place(), "");
        assert_eq!(store.get_item(CITY_KEY).unwrap().as_deref(), Some("London"));
    }

    #[tokio::test]
    async fn test_search_failure_sets_fixed_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "code": 1006, "message": "No matching location found." }
            })))
            .mount(&server)
            .await;
        let store = MemoryStore::shared();
        let mut c = controller(&server.uri(), store.clone());

        assert!(c.search_weather("UnknownCity").await);

        assert!(!c.state().is_loading());
        assert_eq!(c.state().error(), Some(SEARCH_FAILED_MESSAGE));
        assert!(c.state().current_weather().is_none());
        assert_eq!(store.get_item(CITY_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_weather() {
        let server = MockServer::start().await;
        mount_city(&server, "Paris").await;
        Mock::given(method("GET"))
            .and(query_param("q", "Atlantis"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let mut c = controller(&server.uri(), MemoryStore::shared());

        c.search_weather("Paris").await;
        c.search_weather("Atlantis").await;

        assert_eq!(c.state().error(), Some(SEARCH_FAILED_MESSAGE));
        assert_eq!(c.state().current_weather().unwrap().city, "Paris");
        assert_eq!(c.saved_city(), "Paris");
    }

    #[tokio::test]
    async fn test_blank_search_is_noop() {
        let server = MockServer::start().await;
        let mut c = controller(&server.uri(), MemoryStore::shared());

        c.set_place("   ");
        assert!(!c.search_weather("").await);
        assert!(!c.state().is_loading());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_argument_used_when_input_empty() {
        let server = MockServer::start().await;
        mount_city(&server, "Paris").await;
        let mut c = controller(&server.uri(), MemoryStore::shared());

        assert!(c.search_weather("  Paris ").await);
        assert_eq!(c.state().current_weather().unwrap().city, "Paris");
    }

    #[tokio::test]
    async fn test_refresh_ignores_blank_name() {
        let server = MockServer::start().await;
        mount_city(&server, "Berlin").await;
        let mut c = controller(&server.uri(), MemoryStore::shared());

        assert!(!c.refresh_weather("").await);
        assert!(c.refresh_weather("Berlin").await);
        assert_eq!(c.state().current_weather().unwrap().city, "Berlin");
    }

    #[tokio::test]
    async fn test_load_initial_uses_saved_city() {
        let server = MockServer::start().await;
        mount_city(&server, "Belgrade").await;
        let store = MemoryStore::shared();
        store.set_item(CITY_KEY, "Belgrade").unwrap();
        let mut c = controller(&server.uri(), store);

        assert_eq!(c.initial_city().as_deref(), Some("Belgrade"));
        assert!(c.load_initial().await);
        assert_eq!(c.state().current_weather().unwrap().city, "Belgrade");
    }

    #[tokio::test]
    async fn test_load_initial_without_city_does_nothing() {
        let server = MockServer::start().await;
        let mut c = controller(&server.uri(), MemoryStore::shared());

        assert_eq!(c.initial_city(), None);
        assert!(!c.load_initial().await);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[test]
    fn test_initial_city_falls_back_to_current_weather() {
        let store = MemoryStore::shared();
        let mut c = controller("http://localhost:9", store.clone());
        c.finish_search::<WeatherError>(
            "Novi Sad",
            Ok(WeatherData {
                city: "Novi Sad".to_string(),
                temperature: 10,
                description: "Kiša".to_string(),
                humidity: 80,
                wind_speed: 1.5,
                icon: "default".to_string(),
            }),
        );
        store.remove_item(CITY_KEY).unwrap();

        assert_eq!(c.initial_city().as_deref(), Some("Novi Sad"));
    }

    #[test]
    fn test_begin_search_marks_loading_and_clears_error() {
        let mut c = controller("http://localhost:9", MemoryStore::shared());
        c.finish_search("X", Err(WeatherError::Parse("bad".into())));
        assert_eq!(c.state().error(), Some(SEARCH_FAILED_MESSAGE));

        c.set_place("Sombor");
        let city = c.begin_search("ignored");
        assert_eq!(city.as_deref(), Some("Sombor"));
        assert!(c.state().is_loading());
        assert_eq!(c.state().error(), None);
        assert_eq!(c.place(), "");
    }
}
