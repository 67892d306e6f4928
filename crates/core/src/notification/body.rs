//! Notification body composition
//!
//! Output is byte-identical for identical inputs: every listing iterates a
//! `SlotSet`, which is ordered by key.

use std::fmt::Write as _;

use slotwatch_domain::{NotificationReason, SlotSet};

use super::policy::PolicyInputs;

const ALL_SLOTS_HEADING: &str = "Available slots";
const NEW_SLOTS_HEADING: &str = "New slots";
const URGENT_SLOTS_HEADING: &str = "Urgent slots before cutoff";

/// Compose the message for a firing decision.
///
/// Sections, in order: the full listing (always), new slots (when any), urgent
/// slots (when any), then the reason as the final line.
pub fn compose_body(inputs: &PolicyInputs<'_>, reason: NotificationReason) -> String {
    let mut body = String::new();
    push_section(&mut body, ALL_SLOTS_HEADING, inputs.all_slots);

    if !inputs.new_slots.is_empty() {
        push_section(&mut body, NEW_SLOTS_HEADING, inputs.new_slots);
    }
    if !inputs.urgent_all_slots.is_empty() {
        push_section(&mut body, URGENT_SLOTS_HEADING, inputs.urgent_all_slots);
    }

    let _ = write!(body, "Reason: {}", reason.describe());
    body
}

fn push_section(body: &mut String, heading: &str, slots: &SlotSet) {
    let _ = writeln!(body, "{heading} ({}):", slots.len());
    if slots.is_empty() {
        body.push_str("- none\n");
    }
    for slot in slots {
        let _ = writeln!(body, "- {slot}");
    }
    body.push('\n');
}
