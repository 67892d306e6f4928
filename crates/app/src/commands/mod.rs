//! CLI commands
//!
//! Each command returns its result; rendering for the console is a separate
//! pure function so it can be tested without capturing stdout.

pub mod run;
pub mod status;

pub use run::{execute_run, render_report};
pub use status::{execute_status, render_status};
