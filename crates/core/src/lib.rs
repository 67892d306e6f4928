//! # SlotWatch Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Change detection between observations
//! - Urgency classification against a cutoff date
//! - The notification policy
//! - Port interfaces (traits) for the source, store, notifier and clock
//! - The run orchestrator
//!
//! ## Architecture Principles
//! - Only depends on `slotwatch-domain`
//! - No filesystem, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod detection;
pub mod notification;
pub mod urgency;
pub mod watch;

// Re-export specific items to avoid ambiguity
pub use detection::diff;
pub use notification::{compose_body, decide, PolicyInputs};
pub use urgency::classify;
pub use watch::ports::{Clock, Notifier, SlotSource, SlotStore, SystemClock};
pub use watch::{DeliveryTarget, WatchService, WatchSettings};
