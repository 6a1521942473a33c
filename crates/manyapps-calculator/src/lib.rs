//! Calculator feature for ManyApps
//!
//! Four-function arithmetic with a persisted calculation history, split into
//! a state holder, a service and a view-controller.

pub mod controller;
pub mod error;
pub mod service;
pub mod state;
pub mod types;

pub use controller::CalculatorController;
pub use error::CalculatorError;
pub use service::{CalculatorService, SubscriptionId, HISTORY_KEY};
pub use state::CalculatorState;
pub use types::*;
