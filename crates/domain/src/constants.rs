//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Persistence
pub const DEFAULT_STATE_FILE: &str = "slots_state.json";
pub const LOCK_FILE_SUFFIX: &str = "lock";

// Rendering
pub const DISPLAY_DATE_FORMAT: &str = "%A %d-%m-%Y";
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

// Calendar source
pub const DEFAULT_MAX_PAGES: u32 = 24;
pub const DEFAULT_SOURCE_TIMEOUT_SECS: u64 = 30;
pub const PAGE_PLACEHOLDER: &str = "{page}";

// Delivery
pub const DEFAULT_SUBJECT: &str = "Appointment slot recap";
