//! Slot watching: ports and the run orchestrator

pub mod ports;
pub mod service;

pub use service::{DeliveryTarget, WatchService, WatchSettings};
