//! Errors raised by the shot dialer core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShotError {
    #[error("Dose and yield are required to evaluate a shot.")]
    InsufficientInput,

    #[error("Stored shot history is malformed: {0}")]
    CorruptHistory(#[source] serde_json::Error),

    #[error("Unable to serialize shot history: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("History storage error: {0}")]
    Storage(String),
}

impl ShotError {
    /// Stable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            ShotError::InsufficientInput => "INSUFFICIENT_INPUT",
            ShotError::CorruptHistory(_) => "CORRUPT_HISTORY",
            ShotError::Serialization(_) => "SERIALIZATION_ERROR",
            ShotError::Storage(_) => "STORAGE_ERROR",
        }
    }
}
