//! Configuration management

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAX_PAGES, DEFAULT_SOURCE_TIMEOUT_SECS, DEFAULT_STATE_FILE, DEFAULT_SUBJECT,
};
use crate::errors::{Result, SlotWatchError};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub watch: WatchConfig,
    #[serde(default)]
    pub store: StoreConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub delivery: DeliveryConfig,
}

/// Urgency window and recap schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Slots strictly before this date are urgent.
    pub cutoff: NaiveDate,
    /// Weekdays on which a recap is sent even without urgent news.
    #[serde(default)]
    pub recap_days: Vec<Weekday>,
}

/// Slot state persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub path: String,
}

/// Calendar source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Page URL; `{page}` is replaced by the 0-based page index.
    pub url: String,
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Notification delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Mail API endpoint receiving the JSON message.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default = "default_subject")]
    pub subject: String,
}

fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

fn default_timeout_secs() -> u64 {
    DEFAULT_SOURCE_TIMEOUT_SECS
}

fn default_subject() -> String {
    DEFAULT_SUBJECT.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { path: DEFAULT_STATE_FILE.to_string() }
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: None,
            api_key: None,
            sender: None,
            recipient: None,
            subject: default_subject(),
        }
    }
}

impl WatchConfig {
    /// Recap weekdays without duplicates, in configuration order.
    pub fn recap_schedule(&self) -> Vec<Weekday> {
        let mut days: Vec<Weekday> = Vec::with_capacity(self.recap_days.len());
        for day in &self.recap_days {
            if !days.contains(day) {
                days.push(*day);
            }
        }
        days
    }
}

impl DeliveryConfig {
    /// Delivery is attempted only when enabled and fully addressed.
    pub fn is_ready(&self) -> bool {
        self.enabled
            && self.endpoint.as_deref().is_some_and(|v| !v.trim().is_empty())
            && self.sender.as_deref().is_some_and(|v| !v.trim().is_empty())
            && self.recipient.as_deref().is_some_and(|v| !v.trim().is_empty())
    }
}

impl Config {
    /// Reject configurations no run could succeed with.
    ///
    /// Incomplete delivery settings are not an error; delivery is skipped.
    pub fn validate(&self) -> Result<()> {
        if self.source.url.trim().is_empty() {
            return Err(SlotWatchError::Config("source.url must not be empty".into()));
        }
        if self.source.max_pages == 0 {
            return Err(SlotWatchError::Config("source.max_pages must be at least 1".into()));
        }
        if self.source.timeout_secs == 0 {
            return Err(SlotWatchError::Config("source.timeout_secs must be at least 1".into()));
        }
        if self.store.path.trim().is_empty() {
            return Err(SlotWatchError::Config("store.path must not be empty".into()));
        }
        Ok(())
    }
}
