//! Slot identifiers and slot sets
//!
//! A slot is one bookable calendar day offered by the appointment source.
//! The source identifies each day by the epoch-millisecond timestamp of its
//! midnight, which becomes the canonical key. Every derived rendering (date,
//! weekday, display string) is a pure function of that key, computed in UTC.

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::constants::{DISPLAY_DATE_FORMAT, ISO_DATE_FORMAT};

/// One bookable day, keyed by milliseconds since the Unix epoch.
///
/// Equality, hashing and ordering use the key only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(i64);

impl SlotId {
    /// Wrap a raw epoch-millisecond key without range checks.
    ///
    /// Input read from outside the process goes through
    /// [`SlotId::try_from_millis`] instead.
    pub const fn from_millis(key: i64) -> Self {
        Self(key)
    }

    /// Wrap `key` if chrono can represent it as an instant.
    pub fn try_from_millis(key: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(key).map(|_| Self(key))
    }

    /// Key of the UTC midnight that starts `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp_millis())
    }

    /// Canonical key.
    pub const fn key(self) -> i64 {
        self.0
    }

    /// Instant the key points at.
    ///
    /// Keys outside chrono's range render as the epoch. The crawler and the
    /// store reject such keys through [`SlotId::try_from_millis`], so only an
    /// unchecked [`SlotId::from_millis`] can reach this.
    pub fn instant(self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.0).unwrap_or_default()
    }

    /// Calendar date of the slot (UTC).
    pub fn date(self) -> NaiveDate {
        self.instant().date_naive()
    }

    /// Day of the week of [`SlotId::date`].
    pub fn weekday(self) -> Weekday {
        self.date().weekday()
    }

    /// English weekday name, e.g. `Monday`.
    pub fn weekday_name(self) -> String {
        self.instant().format("%A").to_string()
    }

    /// `YYYY-MM-DD`
    pub fn iso_date(self) -> String {
        self.instant().format(ISO_DATE_FORMAT).to_string()
    }

    /// Human-readable form, e.g. `Monday 25-08-2025`.
    pub fn display(self) -> String {
        self.instant().format(DISPLAY_DATE_FORMAT).to_string()
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<i64> for SlotId {
    fn from(key: i64) -> Self {
        Self::from_millis(key)
    }
}

/// Set of slots, iterated in ascending key order.
///
/// Serializes as a JSON array of integer keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotSet(BTreeSet<SlotId>);

impl SlotSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw keys; duplicates collapse.
    pub fn from_keys<I: IntoIterator<Item = i64>>(keys: I) -> Self {
        keys.into_iter().map(SlotId::from_millis).collect()
    }

    /// Returns `true` if the slot was not already present.
    pub fn insert(&mut self, slot: SlotId) -> bool {
        self.0.insert(slot)
    }

    /// Membership by key.
    pub fn contains(&self, slot: &SlotId) -> bool {
        self.0.contains(slot)
    }

    /// Number of distinct slots.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when no slot is open.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ascending key order.
    pub fn iter(&self) -> btree_set::Iter<'_, SlotId> {
        self.0.iter()
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> Vec<i64> {
        self.0.iter().map(|slot| slot.key()).collect()
    }

    /// Slots in `self` that are absent from `other`.
    pub fn difference(&self, other: &SlotSet) -> SlotSet {
        self.0.difference(&other.0).copied().collect()
    }

    /// Subset of slots matching `predicate`.
    pub fn filter<F: FnMut(&SlotId) -> bool>(&self, mut predicate: F) -> SlotSet {
        self.0.iter().copied().filter(|slot| predicate(slot)).collect()
    }

    /// Every slot of `self` is also in `other`.
    pub fn is_subset(&self, other: &SlotSet) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Display strings in ascending order.
    pub fn display_lines(&self) -> Vec<String> {
        self.0.iter().map(|slot| slot.display()).collect()
    }
}

impl FromIterator<SlotId> for SlotSet {
    fn from_iter<I: IntoIterator<Item = SlotId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<SlotId> for SlotSet {
    fn extend<I: IntoIterator<Item = SlotId>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for SlotSet {
    type Item = SlotId;
    type IntoIter = btree_set::IntoIter<SlotId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SlotSet {
    type Item = &'a SlotId;
    type IntoIter = btree_set::Iter<'a, SlotId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
