//! Notification decision types
//!
//! A decision is computed once per run from the diff and urgency results and
//! never outlives the run.

use serde::{Deserialize, Serialize};

use crate::impl_domain_label_conversions;

/// Why a notification fires (or does not).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationReason {
    /// At least one newly observed slot falls before the cutoff.
    NewUrgentSlots,
    /// Today is a configured recap day.
    ScheduledRecap,
    /// Neither trigger applies; the run stays silent.
    NothingToReport,
}

impl_domain_label_conversions!(NotificationReason {
    NewUrgentSlots => "new_urgent_slots",
    ScheduledRecap => "scheduled_recap",
    NothingToReport => "nothing_to_report",
});

impl NotificationReason {
    /// Sentence appended as the last line of a notification body.
    pub fn describe(self) -> &'static str {
        match self {
            Self::NewUrgentSlots => "new urgent slots before cutoff",
            Self::ScheduledRecap => "scheduled recap",
            Self::NothingToReport => "nothing to report",
        }
    }

    /// Whether this reason implies a notification.
    pub fn fires(self) -> bool {
        !matches!(self, Self::NothingToReport)
    }
}

/// Outcome of the notification policy for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationDecision {
    /// Whether a message goes out this run.
    pub fires: bool,
    /// Trigger behind the decision.
    pub reason: NotificationReason,
    /// Composed message text; empty when the decision does not fire.
    pub body: String,
}

impl NotificationDecision {
    /// A decision that does not fire.
    pub fn silent() -> Self {
        Self { fires: false, reason: NotificationReason::NothingToReport, body: String::new() }
    }

    /// A decision that sends `body` for `reason`.
    pub fn firing(reason: NotificationReason, body: String) -> Self {
        Self { fires: true, reason, body }
    }
}
