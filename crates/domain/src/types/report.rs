//! Run report types

use serde::{Deserialize, Serialize};

use super::decision::NotificationDecision;
use super::slot::SlotSet;
use crate::impl_domain_label_conversions;

/// What happened to the notification of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// The decision did not fire.
    NotRequired,
    /// The decision fired but delivery is disabled or unconfigured.
    Skipped,
    /// The notifier accepted the message.
    Delivered,
    /// Delivery was attempted and failed; the run still completed.
    Failed(String),
}

/// Label-only view of [`DeliveryStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    NotRequired,
    Skipped,
    Delivered,
    Failed,
}

impl_domain_label_conversions!(DeliveryOutcome {
    NotRequired => "not_required",
    Skipped => "skipped",
    Delivered => "delivered",
    Failed => "failed",
});

impl DeliveryStatus {
    pub fn outcome(&self) -> DeliveryOutcome {
        match self {
            Self::NotRequired => DeliveryOutcome::NotRequired,
            Self::Skipped => DeliveryOutcome::Skipped,
            Self::Delivered => DeliveryOutcome::Delivered,
            Self::Failed(_) => DeliveryOutcome::Failed,
        }
    }
}

/// Summary of one completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Full observation of this run (now persisted).
    pub observed: SlotSet,
    /// Slots absent from the previous state.
    pub new_slots: SlotSet,
    /// New slots before the cutoff.
    pub urgent_new_slots: SlotSet,
    /// Observed slots before the cutoff.
    pub urgent_slots: SlotSet,
    pub decision: NotificationDecision,
    pub delivery: DeliveryStatus,
}
