//! Slot state persistence
//!
//! The JSON file store implements the core `SlotStore` port; the run lock
//! keeps two runs from interleaving against the same state file.

pub mod json_store;
pub mod run_lock;

pub use json_store::JsonFileSlotStore;
pub use run_lock::RunLock;
