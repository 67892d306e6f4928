//! Shared test helpers for `slotwatch-core` integration tests.
//!
//! These helpers provide in-memory port implementations so orchestrator tests
//! can focus on behaviour instead of I/O.

#![allow(dead_code)]

pub mod ports;

use chrono::NaiveDate;
use slotwatch_domain::SlotId;

/// UTC-midnight slot for the given date.
pub fn slot(year: i32, month: u32, day: u32) -> SlotId {
    SlotId::from_date(date(year, month, day))
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
