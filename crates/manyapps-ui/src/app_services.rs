//! Shared async plumbing for the shell.
//!
//! `AppServices` owns the tokio runtime that runs outbound requests and the
//! channels that carry their results back to the event loop. Channels are
//! created on demand and held behind `RwLock` so they can be torn down on
//! shutdown.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::broadcast;

/// Message types for the weather service channel
pub use crate::services::WeatherServiceMessage;

pub struct AppServices {
    /// Tokio runtime for async operations
    runtime: tokio::runtime::Runtime,

    /// Shutdown signal broadcaster
    shutdown_tx: broadcast::Sender<()>,

    /// Weather service channel sender
    weather_service_tx: RwLock<Option<std::sync::mpsc::Sender<WeatherServiceMessage>>>,

    /// Weather service channel receiver
    weather_service_rx: RwLock<Option<Mutex<std::sync::mpsc::Receiver<WeatherServiceMessage>>>>,
}

impl AppServices {
    /// Create the services container and its runtime.
    ///
    /// # Errors
    ///
    /// Fails if the tokio runtime cannot be started.
    pub fn new() -> std::io::Result<Arc<Self>> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("manyapps-tokio")
            .build()?;

        let (shutdown_tx, _) = broadcast::channel(16);

        Ok(Arc::new(Self {
            runtime,
            shutdown_tx,
            weather_service_tx: RwLock::new(None),
            weather_service_rx: RwLock::new(None),
        }))
    }

    /// Get the tokio runtime handle.
    pub fn runtime(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    /// Subscribe to shutdown notifications.
    pub fn subscribe_shutdown(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signal shutdown to in-flight tasks and drop the channels.
    pub fn shutdown(&self) {
        tracing::info!("AppServices shutdown initiated");

        let _ = self.shutdown_tx.send(());

        *self.weather_service_tx.write() = None;
        *self.weather_service_rx.write() = None;
    }

    // =========== Weather Service Channel ===========

    /// Get weather service sender.
    pub fn weather_service_tx(&self) -> Option<std::sync::mpsc::Sender<WeatherServiceMessage>> {
        self.weather_service_tx.read().clone()
    }

    /// Initialize weather service channel.
    pub fn init_weather_service_channel(&self) -> bool {
        if self.weather_service_tx.read().is_some() {
            return true;
        }

        let (tx, rx) = std::sync::mpsc::channel();
        *self.weather_service_tx.write() = Some(tx);
        *self.weather_service_rx.write() = Some(Mutex::new(rx));
        tracing::info!("Weather service channel initialized");
        true
    }

    /// Try to receive a message from the weather service channel (non-blocking).
    pub fn try_recv_weather_message(&self) -> Option<WeatherServiceMessage> {
        let guard = self.weather_service_rx.read();
        let rx_mutex = guard.as_ref()?;
        let result = rx_mutex.lock().try_recv().ok();
        result
    }

    /// Wait up to `timeout` for the next weather message.
    pub fn recv_weather_message_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Option<WeatherServiceMessage> {
        let guard = self.weather_service_rx.read();
        let rx_mutex = guard.as_ref()?;
        let result = rx_mutex.lock().recv_timeout(timeout).ok();
        result
    }
}

impl std::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppServices")
            .field(
                "weather_channel",
                &self.weather_service_tx.read().is_some(),
            )
            .finish_non_exhaustive()
    }
}
