//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use chrono::{NaiveDate, Weekday};
use slotwatch_domain::SlotWatchError;
use slotwatch_infra::config;
use tempfile::TempDir;

#[test]
fn test_load_full_toml_config() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("slotwatch.toml");
    std::fs::write(
        &path,
        r#"
[watch]
cutoff = "2025-10-01"
recap_days = ["Mon", "Wed", "Fri", "Mon"]

[store]
path = "/var/lib/slotwatch/slots_state.json"

[source]
url = "https://calendar.example/slots?page={page}"
max_pages = 12
timeout_secs = 15

[delivery]
enabled = true
endpoint = "https://mail.example/v1/send"
api_key = "key-123"
sender = "watch@example.com"
recipient = "me@example.com"
subject = "Slots"
"#,
    )
    .expect("write config");

    let config = config::load_from_file(Some(path)).expect("config loads");

    assert_eq!(config.watch.cutoff, NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
    assert_eq!(config.watch.recap_schedule(), vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]);
    assert_eq!(config.store.path, "/var/lib/slotwatch/slots_state.json");
    assert_eq!(config.source.max_pages, 12);
    assert_eq!(config.source.timeout_secs, 15);
    assert!(config.delivery.is_ready());
    assert_eq!(config.delivery.subject, "Slots");
}

#[test]
fn test_api_key_is_not_written_back() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "watch": { "cutoff": "2025-10-01" },
            "source": { "url": "https://calendar.example/" },
            "delivery": { "api_key": "secret" }
        }"#,
    )
    .expect("write config");

    let config = config::load_from_file(Some(path)).expect("config loads");
    assert_eq!(config.delivery.api_key.as_deref(), Some("secret"));

    let rendered = serde_json::to_string(&config).expect("serialize");
    assert!(!rendered.contains("secret"));
}

#[test]
fn test_missing_required_section_fails() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "source": { "url": "https://calendar.example/" } }"#)
        .expect("write config");

    let result = config::load_from_file(Some(path));
    assert!(matches!(result, Err(SlotWatchError::Config(_))));
}

#[test]
fn test_incomplete_delivery_is_not_ready() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "watch": { "cutoff": "2025-10-01" },
            "source": { "url": "https://calendar.example/" },
            "delivery": { "enabled": true, "endpoint": "https://mail.example/v1/send" }
        }"#,
    )
    .expect("write config");

    let config = config::load_from_file(Some(path)).expect("config loads");
    assert!(config.delivery.enabled);
    assert!(!config.delivery.is_ready());
}
