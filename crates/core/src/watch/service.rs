//! Run orchestrator - core business logic
//!
//! One pass per invocation:
//! `LoadPriorState -> Observe -> Diff & Classify -> Decide -> PersistState ->
//! MaybeNotify`. The prior state is loaded first so a corrupt store aborts the
//! run before the (slow) observation is spent. Nothing is written unless the
//! observation succeeded, and delivery runs only after the new state is
//! persisted.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use slotwatch_domain::{
    Config, DeliveryStatus, NotificationDecision, Result, RunReport, SlotSet, SlotWatchError,
};
use tracing::{error, info};

use super::ports::{Clock, Notifier, SlotSource, SlotStore, SystemClock};
use crate::detection::diff;
use crate::notification::{decide, PolicyInputs};
use crate::urgency::classify;

/// Where a firing notification goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryTarget {
    pub recipient: String,
    pub subject: String,
}

/// Per-run policy settings, passed in at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchSettings {
    pub cutoff: NaiveDate,
    pub recap_days: Vec<Weekday>,
    /// `None` means report locally and skip delivery.
    pub delivery: Option<DeliveryTarget>,
}

impl WatchSettings {
    /// Derive settings from the application configuration.
    ///
    /// Delivery is only targeted when the delivery section is complete.
    pub fn from_config(config: &Config) -> Self {
        let delivery = if config.delivery.is_ready() {
            config.delivery.recipient.clone().map(|recipient| DeliveryTarget {
                recipient,
                subject: config.delivery.subject.clone(),
            })
        } else {
            None
        };

        Self { cutoff: config.watch.cutoff, recap_days: config.watch.recap_schedule(), delivery }
    }
}

/// Slot watch orchestrator
pub struct WatchService {
    source: Arc<dyn SlotSource>,
    store: Arc<dyn SlotStore>,
    notifier: Option<Arc<dyn Notifier>>,
    clock: Arc<dyn Clock>,
    settings: WatchSettings,
}

impl WatchService {
    /// Create a new watch service without delivery
    pub fn new(
        source: Arc<dyn SlotSource>,
        store: Arc<dyn SlotStore>,
        settings: WatchSettings,
    ) -> Self {
        Self { source, store, notifier: None, clock: Arc::new(SystemClock), settings }
    }

    /// Attach the delivery collaborator
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Replace the wall clock, mainly for tests
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn settings(&self) -> &WatchSettings {
        &self.settings
    }

    /// Slots remembered from the previous run, without observing anything.
    pub fn known_slots(&self) -> Result<SlotSet> {
        self.store.load()
    }

    /// Execute one full pass.
    ///
    /// Returns an error for failures that must reach the invoker: corrupt or
    /// unwritable state and failed observations. A delivery failure is
    /// reported in [`RunReport::delivery`] instead.
    pub async fn run_once(&self) -> Result<RunReport> {
        let previous = self.store.load().map_err(|err| {
            error!(error = %err, "run.state_load_failed");
            err
        })?;
        info!(known = previous.len(), "run.state_loaded");

        let observed = self.source.observe().await.map_err(|err| {
            error!(error = %err, "run.observation_failed");
            match err {
                SlotWatchError::Observation(_) => err,
                other => SlotWatchError::Observation(other.to_string()),
            }
        })?;
        info!(observed = observed.len(), "run.observed");

        let new_slots = diff(&observed, &previous);
        let urgent_new_slots = classify(&new_slots, self.settings.cutoff);
        let urgent_slots = classify(&observed, self.settings.cutoff);
        let today = self.clock.now().date_naive().weekday();

        let decision = decide(&PolicyInputs {
            new_slots: &new_slots,
            urgent_new_slots: &urgent_new_slots,
            all_slots: &observed,
            urgent_all_slots: &urgent_slots,
            today,
            recap_days: &self.settings.recap_days,
        });
        info!(
            new = new_slots.len(),
            urgent_new = urgent_new_slots.len(),
            urgent = urgent_slots.len(),
            %today,
            fires = decision.fires,
            reason = %decision.reason,
            "run.decided"
        );

        self.store.save(&observed).map_err(|err| {
            error!(error = %err, stale_state = true, "run.persist_failed");
            err
        })?;
        info!(persisted = observed.len(), "run.state_persisted");

        let delivery = self.notify(&decision).await;

        Ok(RunReport {
            observed,
            new_slots,
            urgent_new_slots,
            urgent_slots,
            decision,
            delivery,
        })
    }

    async fn notify(&self, decision: &NotificationDecision) -> DeliveryStatus {
        if !decision.fires {
            return DeliveryStatus::NotRequired;
        }

        let (Some(notifier), Some(target)) = (&self.notifier, &self.settings.delivery) else {
            info!(reason = %decision.reason, "delivery.skipped");
            return DeliveryStatus::Skipped;
        };

        match notifier.deliver(&target.subject, &decision.body, &target.recipient).await {
            Ok(()) => {
                info!(recipient = %target.recipient, "delivery.sent");
                DeliveryStatus::Delivered
            }
            Err(err) => {
                error!(error = %err, recipient = %target.recipient, "delivery.failed");
                DeliveryStatus::Failed(err.to_string())
            }
        }
    }
}
