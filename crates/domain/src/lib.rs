//! # SlotWatch Domain
//!
//! Business domain types and models for SlotWatch.
//!
//! This crate contains:
//! - Slot identifiers and slot sets
//! - Notification decisions and run reports
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other SlotWatch crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
