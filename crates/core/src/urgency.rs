//! Urgency classification
//!
//! The cutoff is supplied by the caller on every run so the urgency window
//! can move without touching this module.

use chrono::NaiveDate;
use slotwatch_domain::SlotSet;

/// Slots whose calendar date is strictly before `cutoff`.
pub fn classify(slots: &SlotSet, cutoff: NaiveDate) -> SlotSet {
    slots.filter(|slot| slot.date() < cutoff)
}

#[cfg(test)]
mod tests {
    use slotwatch_domain::SlotId;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_slot_on_cutoff_is_not_urgent() {
        let cutoff = date(2025, 10, 1);
        let slots: SlotSet = [SlotId::from_date(cutoff)].into_iter().collect();
        assert!(classify(&slots, cutoff).is_empty());
    }

    #[test]
    fn test_day_before_cutoff_is_urgent() {
        let cutoff = date(2025, 10, 1);
        let day_before = SlotId::from_date(date(2025, 9, 30));
        let last_millisecond = SlotId::from_millis(SlotId::from_date(cutoff).key() - 1);
        let slots: SlotSet = [day_before, last_millisecond].into_iter().collect();
        assert_eq!(classify(&slots, cutoff), slots);
    }

    #[test]
    fn test_mixed_slots_are_partitioned() {
        let cutoff = date(2025, 10, 1);
        let early = SlotId::from_date(date(2025, 9, 3));
        let late = SlotId::from_date(date(2025, 10, 15));
        let slots: SlotSet = [early, late].into_iter().collect();
        let urgent = classify(&slots, cutoff);
        assert_eq!(urgent.len(), 1);
        assert!(urgent.contains(&early));
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(classify(&SlotSet::new(), date(2025, 10, 1)).is_empty());
    }
}
