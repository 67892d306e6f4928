//! # SlotWatch App
//!
//! Command-line application layer.
//!
//! This crate contains:
//! - Commands (`run`, `status`) and their console rendering
//! - Application context (dependency injection)
//! - Logging setup
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod commands;
pub mod context;
pub mod utils;

pub use context::{AppContext, ContextOptions};
