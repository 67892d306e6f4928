//! JSON file implementation of the slot store
//!
//! The file holds a JSON array of epoch-millisecond keys. Saves go through a
//! sibling temporary file that is fsynced and renamed over the target, so a
//! crash leaves either the old or the new array on disk.
//!
//! Older state files written as `"YYYY-MM-DD"` strings or stringified keys are
//! still readable; they are rewritten as integers on the next save.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use slotwatch_core::SlotStore;
use slotwatch_domain::constants::ISO_DATE_FORMAT;
use slotwatch_domain::{Result, SlotId, SlotSet, SlotWatchError};
use tracing::{debug, info};

use crate::errors::InfraError;

/// One persisted entry as it may appear on disk.
#[derive(Deserialize)]
#[serde(untagged)]
enum PersistedKey {
    Millis(i64),
    Text(String),
}

impl PersistedKey {
    fn into_slot(self) -> std::result::Result<SlotId, String> {
        match self {
            Self::Millis(key) => checked_key(key),
            Self::Text(text) => {
                let trimmed = text.trim();
                if let Ok(key) = trimmed.parse::<i64>() {
                    return checked_key(key);
                }
                NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
                    .map(SlotId::from_date)
                    .map_err(|_| format!("unrecognised slot entry {text:?}"))
            }
        }
    }
}

fn checked_key(key: i64) -> std::result::Result<SlotId, String> {
    SlotId::try_from_millis(key).ok_or_else(|| format!("slot key {key} is out of range"))
}

/// Slot store backed by a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileSlotStore {
    path: PathBuf,
}

impl JsonFileSlotStore {
    /// Store reading and writing the JSON array at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// State file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn parse(&self, bytes: &[u8]) -> Result<SlotSet> {
        let corrupt =
            |detail: String| SlotWatchError::StorageCorrupt(format!("{}: {detail}", self.path.display()));

        let entries: Vec<PersistedKey> =
            serde_json::from_slice(bytes).map_err(|err| corrupt(err.to_string()))?;

        entries
            .into_iter()
            .map(|entry| entry.into_slot().map_err(&corrupt))
            .collect::<Result<SlotSet>>()
    }

    fn write_atomically(&self, payload: &[u8]) -> std::result::Result<(), InfraError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.temp_path();
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(payload)?;
            file.sync_all()?;
        }

        if let Err(err) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(err.into());
        }

        #[cfg(unix)]
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            // Persist the rename itself.
            if let Ok(dir) = File::open(parent) {
                let _ = dir.sync_all();
            }
        }

        Ok(())
    }
}

impl SlotStore for JsonFileSlotStore {
    fn load(&self) -> Result<SlotSet> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "store.absent");
                return Ok(SlotSet::new());
            }
            Err(err) => {
                return Err(SlotWatchError::StorageCorrupt(format!(
                    "failed to read {}: {err}",
                    self.path.display()
                )));
            }
        };

        let slots = self.parse(&bytes)?;
        debug!(path = %self.path.display(), slots = slots.len(), "store.loaded");
        Ok(slots)
    }

    fn save(&self, current: &SlotSet) -> Result<()> {
        let payload = serde_json::to_vec(current).map_err(|err| {
            SlotWatchError::StorageWrite(format!("failed to serialize slot set: {err}"))
        })?;

        self.write_atomically(&payload).map_err(|err| match SlotWatchError::from(err) {
            SlotWatchError::StorageWrite(detail) => SlotWatchError::StorageWrite(format!(
                "{}: {detail}",
                self.path.display()
            )),
            other => other,
        })?;

        info!(path = %self.path.display(), slots = current.len(), "store.saved");
        Ok(())
    }
}
