//! Decision precedence
//!
//! 1. urgent new slots fire regardless of the weekday
//! 2. otherwise a recap day fires, even with nothing new
//! 3. otherwise nothing fires

use chrono::Weekday;
use slotwatch_domain::{NotificationDecision, NotificationReason, SlotSet};

use super::body::compose_body;

/// Everything the policy looks at for one run.
#[derive(Debug, Clone, Copy)]
pub struct PolicyInputs<'a> {
    /// Observed slots absent from the previous state.
    pub new_slots: &'a SlotSet,
    /// Subset of `new_slots` before the cutoff.
    pub urgent_new_slots: &'a SlotSet,
    /// Full current observation.
    pub all_slots: &'a SlotSet,
    /// Subset of `all_slots` before the cutoff.
    pub urgent_all_slots: &'a SlotSet,
    pub today: Weekday,
    pub recap_days: &'a [Weekday],
}

impl PolicyInputs<'_> {
    fn reason(&self) -> NotificationReason {
        if !self.urgent_new_slots.is_empty() {
            NotificationReason::NewUrgentSlots
        } else if self.recap_days.contains(&self.today) {
            NotificationReason::ScheduledRecap
        } else {
            NotificationReason::NothingToReport
        }
    }
}

/// Decide whether to notify and compose the body when it fires.
pub fn decide(inputs: &PolicyInputs<'_>) -> NotificationDecision {
    let reason = inputs.reason();
    if !reason.fires() {
        return NotificationDecision::silent();
    }
    NotificationDecision::firing(reason, compose_body(inputs, reason))
}
