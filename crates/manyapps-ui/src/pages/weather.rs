use std::fmt::Write;

use manyapps_weather::{WeatherController, DEFAULT_ICON};

pub fn render(weather: &WeatherController) -> String {
    let mut out = String::new();
    let state = weather.state();

    let _ = writeln!(out, "search <city> | refresh");
    if state.is_loading() {
        let _ = writeln!(out, "Loading...");
    }
    if let Some(error) = state.error() {
        let _ = writeln!(out, "! {}", error);
    }

    if let Some(data) = state.current_weather() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", data.city);
        let _ = writeln!(out, "  {}°C  {}", data.temperature, data.description);
        let _ = writeln!(out, "  Humidity: {}%", data.humidity);
        let _ = writeln!(out, "  Wind: {} m/s", data.wind_speed);
        if data.icon != DEFAULT_ICON {
            let _ = writeln!(out, "  Icon: {}", data.icon);
        }
        if let Some(updated) = state.updated_at() {
            let _ = writeln!(out, "  Updated: {}", updated.format("%H:%M:%S"));
        }
    } else if !state.is_loading() && state.error().is_none() {
        let _ = writeln!(out, "No city selected.");
    }
    out
}
