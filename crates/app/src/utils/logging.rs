//! Logging setup and command logging helpers

use std::time::Duration;

use slotwatch_domain::SlotWatchError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Selects the JSON formatter when set to `json`.
pub const LOG_FORMAT_ENV: &str = "SLOTWATCH_LOG_FORMAT";

/// Install the global subscriber.
///
/// Filter comes from `RUST_LOG` (default `info`). Logs go to stderr so stdout
/// carries only the command output. Calling this twice is a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var(LOG_FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let _ = if json { builder.json().try_init() } else { builder.try_init() };
}

/// Log the outcome of a command execution with structured fields.
///
/// `command` should be a stable identifier without sensitive data.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error: Option<&SlotWatchError>) {
    let duration_ms = elapsed.as_millis() as u64;

    match error {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(err) => warn!(
            command,
            duration_ms,
            error_type = err.label(),
            fatal = err.is_fatal(),
            "command_execution_failure"
        ),
    }
}
