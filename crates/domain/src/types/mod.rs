//! Domain types and models

pub mod decision;
pub mod report;
pub mod slot;

pub use decision::{NotificationDecision, NotificationReason};
pub use report::{DeliveryOutcome, DeliveryStatus, RunReport};
pub use slot::{SlotId, SlotSet};
