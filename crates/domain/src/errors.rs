//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for SlotWatch
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SlotWatchError {
    /// The calendar source could not be reached or parsed.
    #[error("Observation error: {0}")]
    Observation(String),

    /// Persisted slot state exists but cannot be parsed.
    #[error("Storage corrupt: {0}")]
    StorageCorrupt(String),

    /// Persisted slot state could not be written.
    #[error("Storage write error: {0}")]
    StorageWrite(String),

    /// The notification could not be delivered.
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// Transport-level HTTP failure, before a collaborator classifies it.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Another run holds the store lock.
    #[error("Store locked: {0}")]
    Locked(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SlotWatchError {
    /// Whether this error must abort the run and surface to the invoker.
    ///
    /// Delivery failures are reported but never fail a run whose observation
    /// was already persisted.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Delivery(_))
    }

    /// Stable label suitable for structured logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Observation(_) => "observation",
            Self::StorageCorrupt(_) => "storage_corrupt",
            Self::StorageWrite(_) => "storage_write",
            Self::Delivery(_) => "delivery",
            Self::Network(_) => "network",
            Self::Config(_) => "config",
            Self::Locked(_) => "locked",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for SlotWatch operations
pub type Result<T> = std::result::Result<T, SlotWatchError>;
