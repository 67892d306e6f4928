//! Conversions from external infrastructure errors into domain errors.

use std::io::{Error as IoError, ErrorKind};

use reqwest::Error as HttpError;
use slotwatch_domain::SlotWatchError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SlotWatchError);

impl From<InfraError> for SlotWatchError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SlotWatchError> for InfraError {
    fn from(value: SlotWatchError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoSlotWatchError {
    fn into_slotwatch(self) -> SlotWatchError;
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → SlotWatchError */
/* -------------------------------------------------------------------------- */

impl IntoSlotWatchError for IoError {
    fn into_slotwatch(self) -> SlotWatchError {
        match self.kind() {
            ErrorKind::PermissionDenied => {
                SlotWatchError::StorageWrite(format!("permission denied: {self}"))
            }
            ErrorKind::NotFound => SlotWatchError::StorageWrite(format!("path not found: {self}")),
            _ => SlotWatchError::StorageWrite(self.to_string()),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_slotwatch())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → SlotWatchError */
/* -------------------------------------------------------------------------- */

impl IntoSlotWatchError for HttpError {
    fn into_slotwatch(self) -> SlotWatchError {
        if self.is_timeout() {
            return SlotWatchError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return SlotWatchError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));
            return SlotWatchError::Network(message);
        }

        if self.is_decode() {
            return SlotWatchError::Network(format!("HTTP body could not be decoded: {self}"));
        }

        SlotWatchError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_slotwatch())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
