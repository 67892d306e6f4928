//! Shared fixtures for app integration tests
#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use slotwatch_core::Clock;
use slotwatch_domain::{Config, DeliveryConfig, SourceConfig, StoreConfig, WatchConfig};
use wiremock::MockServer;

/// 2025-09-03T00:00:00Z, before the cutoff
pub const SEPT_3: i64 = 1_756_857_600_000;
/// 2025-10-15T00:00:00Z, after the cutoff
pub const OCT_15: i64 = 1_760_486_400_000;

pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Noon UTC on `date`.
    pub fn on(year: i32, month: u32, day: u32) -> Arc<Self> {
        let instant = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .expect("valid date")
            .and_utc();
        Arc::new(Self(instant))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Config pointing at `calendar` and `mail` mock servers, with recaps on
/// Mondays only.
pub fn config(state_dir: &Path, calendar: &MockServer, mail: Option<&MockServer>) -> Config {
    let delivery = match mail {
        Some(server) => DeliveryConfig {
            enabled: true,
            endpoint: Some(format!("{}/send", server.uri())),
            api_key: Some("key-123".into()),
            sender: Some("watch@example.com".into()),
            recipient: Some("me@example.com".into()),
            ..DeliveryConfig::default()
        },
        None => DeliveryConfig::default(),
    };

    Config {
        watch: WatchConfig {
            cutoff: NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date"),
            recap_days: vec![chrono::Weekday::Mon],
        },
        store: StoreConfig { path: state_dir.join("slots_state.json").display().to_string() },
        source: SourceConfig {
            url: format!("{}/calendar?page={{page}}", calendar.uri()),
            max_pages: 4,
            timeout_secs: 5,
        },
        delivery,
    }
}

/// Single-month calendar page with the given open days.
pub fn last_page(open_days: &[i64]) -> String {
    let cells: String = open_days
        .iter()
        .map(|key| format!(r#"<td class="day" data-date="{key}">d</td>"#))
        .collect();
    format!(
        r#"<table><thead><tr><th class="next disabled">&raquo;</th></tr></thead>
<tbody><tr>{cells}<td class="day disabled" data-date="1">x</td></tr></tbody></table>"#
    )
}
