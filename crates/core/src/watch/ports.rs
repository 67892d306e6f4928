//! Port interfaces for slot watching
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slotwatch_domain::{Result, SlotSet};

/// Trait for observing the currently available slots
#[async_trait]
pub trait SlotSource: Send + Sync {
    /// Produce the full set of slots offered right now.
    ///
    /// Fails with `SlotWatchError::Observation` when the source cannot be
    /// reached or parsed. A failed observation is never partial.
    async fn observe(&self) -> Result<SlotSet>;
}

/// Trait for persisting the slots seen by the previous run
pub trait SlotStore: Send + Sync {
    /// Read the persisted set; an absent store is an empty set.
    ///
    /// Fails with `SlotWatchError::StorageCorrupt` when persisted data exists
    /// but cannot be parsed.
    fn load(&self) -> Result<SlotSet>;

    /// Replace the persisted set with exactly `current`.
    ///
    /// Either the old or the new state survives a crash. Fails with
    /// `SlotWatchError::StorageWrite`.
    fn save(&self, current: &SlotSet) -> Result<()>;
}

/// Trait for delivering a notification to a human
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Fails with `SlotWatchError::Delivery` on transport or auth failure.
    async fn deliver(&self, subject: &str, body: &str, recipient: &str) -> Result<()>;
}

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
