//! `slotwatch status`: show the remembered slots

use std::time::Instant;

use slotwatch_core::{classify, SlotStore};
use slotwatch_domain::{Config, Result, SlotSet};
use slotwatch_infra::JsonFileSlotStore;

use super::run::write_listing;
use crate::utils::logging::log_command_execution;

/// Read the persisted slot set. Observes nothing and writes nothing.
pub fn execute_status(config: &Config) -> Result<SlotSet> {
    let start = Instant::now();
    let result = JsonFileSlotStore::new(&config.store.path).load();

    log_command_execution("status", start.elapsed(), result.as_ref().err());
    result
}

pub fn render_status(config: &Config, slots: &SlotSet) -> String {
    let mut out = format!("State file: {}\n", config.store.path);
    write_listing(&mut out, "Known slots", slots);

    let urgent = classify(slots, config.watch.cutoff);
    out.push_str(&format!("Before cutoff {}: {}", config.watch.cutoff, urgent.len()));
    out
}
