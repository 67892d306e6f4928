//! # SlotWatch Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Configuration loading (environment, JSON, TOML)
//! - JSON file slot store and the per-state-file run lock
//! - HTTP client with retry
//! - External service integrations (booking calendar, mail API)
//!
//! ## Architecture
//! - Implements traits defined in `slotwatch-core`
//! - Contains all "impure" code (file system, network)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod storage;

pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use integrations::calendar::HttpCalendarCrawler;
pub use integrations::mail::HttpMailer;
pub use storage::{JsonFileSlotStore, RunLock};
