//! Change detection between two observations
//!
//! Only additions are reported. Removals need no tracking: the store always
//! persists the full current observation, so a slot that disappears and later
//! comes back is new again.

use slotwatch_domain::SlotSet;

/// Slots in `current` that were not in `previous`.
pub fn diff(current: &SlotSet, previous: &SlotSet) -> SlotSet {
    current.difference(previous)
}
