//! Error types for game logic.

use thiserror::Error;

use crate::{ElementId, Screen};

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Element id is not part of the pairing pool.
    #[error("Unknown element: {0}")]
    UnknownElement(ElementId),

    /// The app flow only moves forward, one screen at a time.
    #[error("Invalid screen transition: {from:?} -> {to:?}")]
    InvalidTransition {
        /// Screen the flow was on.
        from: Screen,
        /// Screen that was requested.
        to: Screen,
    },

    /// Configuration is inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration (de)serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
