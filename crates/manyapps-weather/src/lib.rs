//! Weather lookup for ManyApps
//!
//! Fetches current conditions for a city from a WeatherAPI-compatible
//! endpoint, keeps the panel state and remembers the last searched city.

pub mod city_store;
pub mod controller;
pub mod provider;
pub mod state;
pub mod types;

pub use city_store::{CityStore, CITY_KEY};
pub use controller::WeatherController;
pub use provider::WeatherProvider;
pub use state::WeatherState;
pub use types::*;
