//! Calculator service: arithmetic and the persisted calculation history.

use manyapps_core::SharedStore;

use crate::error::CalculatorError;
use crate::types::{Calculation, Operation};

/// Storage key of the JSON-encoded history list.
pub const HISTORY_KEY: &str = "calculator-history";

/// Identifies a history subscriber for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type HistoryListener = Box<dyn Fn(&[Calculation]) + Send>;

pub struct CalculatorService {
    store: SharedStore,
    history: Vec<Calculation>,
    listeners: Vec<(SubscriptionId, HistoryListener)>,
    next_subscription: u64,
}

impl CalculatorService {
    /// Create the service and load the persisted history.
    ///
    /// Unreadable or malformed history is logged and replaced by an empty list.
    pub fn new(store: SharedStore) -> Self {
        let history = Self::load_history(&store);
        tracing::debug!("Calculator history loaded ({} entries)", history.len());
        Self {
            store,
            history,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Apply `operation` given as its keypad symbol.
    ///
    /// Division by zero and unknown symbols both yield 0.
    pub fn calculate(&self, operand1: f64, operand2: f64, operation: &str) -> f64 {
        match Operation::from_symbol(operation) {
            Some(op) => op.apply(operand1, operand2),
            None => {
                tracing::debug!("Unknown operation {:?}, result is 0", operation);
                0.0
            }
        }
    }

    /// Append `calculation`, persist the whole list and notify subscribers.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be encoded or written; the
    /// in-memory history is left untouched in that case.
    pub fn save_calculation(&mut self, calculation: Calculation) -> Result<(), CalculatorError> {
        let mut updated = self.history.clone();
        updated.push(calculation);

        let encoded = serde_json::to_string(&updated)?;
        self.store.set_item(HISTORY_KEY, &encoded)?;

        self.history = updated;
        tracing::debug!("Saved calculation ({} in history)", self.history.len());

        for (_, listener) in &self.listeners {
            listener(&self.history);
        }
        Ok(())
    }

    /// Full history in insertion order.
    pub fn get_calculation_history(&self) -> &[Calculation] {
        &self.history
    }

    /// The newest `limit` entries, most recent first.
    pub fn recent_history(&self, limit: usize) -> Vec<Calculation> {
        self.history.iter().rev().take(limit).cloned().collect()
    }

    /// Register a callback invoked with the full history after every save.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&[Calculation]) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn load_history(store: &SharedStore) -> Vec<Calculation> {
        let raw = match store.get_item(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read calculator history: {}. Starting empty.", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!("Stored calculator history is malformed: {}. Starting empty.", e);
                Vec::new()
            }
        }
    }
}

impl std::fmt::Debug for CalculatorService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalculatorService")
            .field("history", &self.history)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
