//! Calculator-specific error types.

use manyapps_core::{AppError, StorageError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("Failed to persist history: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to encode history: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CalculatorError {
    /// User-friendly error message for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Storage(e) => e.user_message(),
            Self::Encode(_) => "Failed to save calculation history.",
        }
    }
}

impl From<CalculatorError> for AppError {
    fn from(e: CalculatorError) -> Self {
        match e {
            CalculatorError::Storage(inner) => AppError::Storage(inner),
            CalculatorError::Encode(inner) => AppError::Storage(StorageError::Serialization(inner)),
        }
    }
}
