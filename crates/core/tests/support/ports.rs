//! In-memory mocks for the watch ports.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use slotwatch_core::{Clock, Notifier, SlotSource, SlotStore};
use slotwatch_domain::{Result as DomainResult, SlotSet, SlotWatchError};

/// Source returning a fixed observation, or a fixed failure.
pub struct MockSlotSource {
    outcome: DomainResult<SlotSet>,
    calls: Mutex<usize>,
}

impl MockSlotSource {
    pub fn returning(slots: SlotSet) -> Self {
        Self { outcome: Ok(slots), calls: Mutex::new(0) }
    }

    pub fn failing(err: SlotWatchError) -> Self {
        Self { outcome: Err(err), calls: Mutex::new(0) }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl SlotSource for MockSlotSource {
    async fn observe(&self) -> DomainResult<SlotSet> {
        *self.calls.lock().unwrap() += 1;
        self.outcome.clone()
    }
}

/// Store keeping the persisted set in memory.
///
/// `corrupt` makes `load` fail the way an unparsable file would;
/// `read_only` makes `save` fail.
#[derive(Default)]
pub struct MockSlotStore {
    state: Mutex<Option<SlotSet>>,
    corrupt: bool,
    read_only: bool,
    saves: Mutex<usize>,
}

impl MockSlotStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_state(slots: SlotSet) -> Self {
        Self { state: Mutex::new(Some(slots)), ..Self::default() }
    }

    pub fn corrupt() -> Self {
        Self { corrupt: true, ..Self::default() }
    }

    pub fn read_only(slots: SlotSet) -> Self {
        Self { state: Mutex::new(Some(slots)), read_only: true, ..Self::default() }
    }

    pub fn persisted(&self) -> Option<SlotSet> {
        self.state.lock().unwrap().clone()
    }

    pub fn saves(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

impl SlotStore for MockSlotStore {
    fn load(&self) -> DomainResult<SlotSet> {
        if self.corrupt {
            return Err(SlotWatchError::StorageCorrupt("expected a JSON array".into()));
        }
        Ok(self.state.lock().unwrap().clone().unwrap_or_default())
    }

    fn save(&self, current: &SlotSet) -> DomainResult<()> {
        if self.read_only {
            return Err(SlotWatchError::StorageWrite("read-only medium".into()));
        }
        *self.state.lock().unwrap() = Some(current.clone());
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

/// One recorded delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub subject: String,
    pub body: String,
    pub recipient: String,
}

/// Notifier recording every message, optionally failing.
#[derive(Clone, Default)]
pub struct MockNotifier {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    fail: bool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn deliver(&self, subject: &str, body: &str, recipient: &str) -> DomainResult<()> {
        if self.fail {
            return Err(SlotWatchError::Delivery("mail API returned 503".into()));
        }
        self.sent.lock().unwrap().push(SentMessage {
            subject: subject.to_string(),
            body: body.to_string(),
            recipient: recipient.to_string(),
        });
        Ok(())
    }
}

/// Clock frozen at noon UTC of a given date.
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn on(date: NaiveDate) -> Self {
        Self(date.and_hms_opt(12, 0, 0).unwrap().and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
