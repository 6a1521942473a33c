//! Text shell: parses commands, drives the feature controllers and renders
//! the current page.
//!
//! The shell is single-threaded. Weather lookups are handed to the
//! [`AppServices`] runtime and their results are applied by [`Shell::pump`]
//! or [`Shell::wait_idle`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use manyapps_calculator::{CalculatorController, Operation};
use manyapps_core::{AppError, FeatureContext};
use manyapps_weather::WeatherController;

use crate::app_services::AppServices;
use crate::navigation::Navigation;
use crate::pages;
use crate::router::Route;
use crate::services::{request_weather_fetch, WeatherError, WeatherServiceMessage};

const HELP: &str = "\
go <path>       open /, /calculator or /weather
menu            toggle the navigation menu
quit            exit
calculator:     0-9 .  + - * /  =  del  c
weather:        search <city>  refresh";

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Go(String),
    Menu,
    Help,
    Quit,
    /// Digits and decimal points, entered one key at a time
    Digits(String),
    Operation(Operation),
    Equals,
    Delete,
    Clear,
    Search(String),
    Refresh,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head {
            "" => Command::Empty,
            "go" => Command::Go(rest.to_string()),
            "menu" => Command::Menu,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "search" => Command::Search(rest.to_string()),
            "refresh" if rest.is_empty() => Command::Refresh,
            "=" if rest.is_empty() => Command::Equals,
            "del" if rest.is_empty() => Command::Delete,
            "c" if rest.is_empty() => Command::Clear,
            _ if rest.is_empty() && is_number_input(head) => Command::Digits(head.to_string()),
            _ => match Operation::from_symbol(head) {
                Some(op) if rest.is_empty() => Command::Operation(op),
                _ => Command::Unknown(line.to_string()),
            },
        }
    }
}

fn is_number_input(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit() || c == '.')
}

pub struct Shell {
    ctx: FeatureContext,
    services: Arc<AppServices>,
    navigation: Navigation,
    route: Route,
    calculator: Option<CalculatorController>,
    weather: Option<WeatherController>,
    in_flight: usize,
    notice: Option<String>,
    running: bool,
}

impl Shell {
    pub fn new(ctx: FeatureContext, services: Arc<AppServices>) -> Self {
        services.init_weather_service_channel();
        let navigation = Navigation::new(ctx.config.ui.title.clone());

        Self {
            ctx,
            services,
            navigation,
            route: Route::Home,
            calculator: None,
            weather: None,
            in_flight: 0,
            notice: None,
            running: true,
        }
    }

    pub fn handle_command(&mut self, command: Command) {
        self.notice = None;

        match command {
            Command::Empty => {}
            Command::Go(path) => self.navigate(&path),
            Command::Menu => self.navigation.toggle_mobile_menu(),
            Command::Help => self.notice = Some(HELP.to_string()),
            Command::Quit => self.running = false,
            Command::Unknown(input) => self.notice = Some(format!("Unknown command: {input}")),
            other => match self.route {
                Route::Calculator => self.dispatch_calculator(other),
                Route::Weather => self.dispatch_weather(other),
                Route::Home => self.notice = Some("Open a page first (try `menu`).".to_string()),
            },
        }
    }

    /// Switch pages, activating the target feature on first entry.
    pub fn navigate(&mut self, path: &str) {
        let route = Route::resolve(path);
        self.navigation.close_mobile_menu();
        self.route = route;
        tracing::info!("Navigated to {}", route);

        match route {
            Route::Home => {}
            Route::Calculator => {
                if self.calculator.is_none() {
                    self.calculator = Some(CalculatorController::activate(&self.ctx));
                }
            }
            Route::Weather => self.activate_weather(),
        }
    }

    fn activate_weather(&mut self) {
        if self.weather.is_some() {
            return;
        }

        match WeatherController::activate(&self.ctx) {
            Ok(controller) => {
                let initial = controller.initial_city();
                self.weather = Some(controller);
                if let Some(city) = initial {
                    self.search_weather(&city);
                }
            }
            Err(e) => {
                let err = AppError::from(e);
                tracing::error!("Weather unavailable: {}", err);
                self.notice = Some(err.user_message().to_string());
            }
        }
    }

    fn dispatch_calculator(&mut self, command: Command) {
        let Some(calculator) = self.calculator.as_mut() else {
            return;
        };

        match command {
            Command::Digits(digits) => {
                for key in digits.chars() {
                    calculator.on_number_click(&key.to_string());
                }
            }
            Command::Operation(op) => calculator.on_operation_click(op),
            Command::Equals => {
                if let Err(e) = calculator.on_equals_click() {
                    let err = AppError::from(e);
                    tracing::warn!("Calculation not saved: {}", err);
                    self.notice = Some(err.user_message().to_string());
                }
            }
            Command::Delete => calculator.on_delete(),
            Command::Clear => calculator.on_clear(),
            _ => self.notice = Some("Not available on this page.".to_string()),
        }
    }

    fn dispatch_weather(&mut self, command: Command) {
        let Some(weather) = self.weather.as_mut() else {
            return;
        };

        match command {
            Command::Search(city) => {
                weather.set_place(city);
                self.search_weather("");
            }
            Command::Refresh => {
                let city = weather
                    .state()
                    .current_weather()
                    .map(|w| w.city.clone())
                    .unwrap_or_default();
                if !city.trim().is_empty() {
                    self.search_weather(&city);
                }
            }
            _ => self.notice = Some("Not available on this page.".to_string()),
        }
    }

    fn search_weather(&mut self, city_name: &str) {
        let Some(weather) = self.weather.as_mut() else {
            return;
        };
        let Some(city) = weather.begin_search(city_name) else {
            return;
        };

        match self.services.weather_service_tx() {
            Some(tx) => {
                request_weather_fetch(&tx, &self.services, weather.provider(), city);
                self.in_flight += 1;
            }
            None => weather.finish_search(&city, Err(AppError::from(WeatherError::NotInitialized))),
        }
    }

    /// Apply any finished requests without blocking. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(message) = self.services.try_recv_weather_message() {
            self.apply_weather_message(message);
            applied += 1;
        }
        applied
    }

    /// Block until every in-flight request has been applied or `timeout`
    /// passes. Returns true when idle.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            match self.services.recv_weather_message_timeout(remaining) {
                Some(message) => self.apply_weather_message(message),
                None => return false,
            }
        }
        true
    }

    fn apply_weather_message(&mut self, message: WeatherServiceMessage) {
        match message {
            WeatherServiceMessage::FetchDone { city, result } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                let Some(weather) = self.weather.as_mut() else {
                    return;
                };
                let result = result.map_err(|e| {
                    let err = AppError::from(e);
                    tracing::debug!("Weather fetch for {} failed: {}", city, err.user_message());
                    err
                });
                weather.finish_search(&city, result);
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = pages::render_header(&self.navigation, self.route);
        out.push('\n');

        let body = match self.route {
            Route::Home => pages::home::render(&self.navigation),
            Route::Calculator => self
                .calculator
                .as_ref()
                .map(pages::calculator::render)
                .unwrap_or_default(),
            Route::Weather => self
                .weather
                .as_ref()
                .map(pages::weather::render)
                .unwrap_or_else(|| "Weather is unavailable.\n".to_string()),
        };
        out.push_str(&body);

        if let Some(notice) = &self.notice {
            out.push('\n');
            out.push_str(notice);
            out.push('\n');
        }
        out
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    pub fn calculator(&self) -> Option<&CalculatorController> {
        self.calculator.as_ref()
    }

    pub fn weather(&self) -> Option<&WeatherController> {
        self.weather.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn shutdown(&self) {
        self.services.shutdown();
    }
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("route", &self.route)
            .field("in_flight", &self.in_flight)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}
