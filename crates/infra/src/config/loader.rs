//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! Every loaded configuration passes [`Config::validate`].
//!
//! ## Environment Variables
//! - `SLOTWATCH_CUTOFF`: Urgency cutoff date, `YYYY-MM-DD` (required)
//! - `SLOTWATCH_SOURCE_URL`: Calendar page URL, may contain `{page}` (required)
//! - `SLOTWATCH_RECAP_DAYS`: Comma-separated weekdays, e.g. `Mon,Wed,Fri`
//! - `SLOTWATCH_STATE_PATH`: Slot state file path
//! - `SLOTWATCH_SOURCE_MAX_PAGES`: Page cap for one observation
//! - `SLOTWATCH_SOURCE_TIMEOUT`: Per-request timeout in seconds
//! - `SLOTWATCH_DELIVERY_ENABLED`: Whether recaps are sent (true/false)
//! - `SLOTWATCH_DELIVERY_ENDPOINT`: Mail API endpoint
//! - `SLOTWATCH_DELIVERY_API_KEY`: Mail API bearer key
//! - `SLOTWATCH_DELIVERY_SENDER`: Sender address
//! - `SLOTWATCH_DELIVERY_RECIPIENT`: Recipient address
//! - `SLOTWATCH_DELIVERY_SUBJECT`: Subject line
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./slotwatch.json` or `./slotwatch.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{NaiveDate, Weekday};
use slotwatch_domain::constants::{
    DEFAULT_MAX_PAGES, DEFAULT_SOURCE_TIMEOUT_SECS, DEFAULT_STATE_FILE, DEFAULT_SUBJECT,
    ISO_DATE_FORMAT,
};
use slotwatch_domain::{
    Config, DeliveryConfig, Result, SlotWatchError, SourceConfig, StoreConfig, WatchConfig,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `SlotWatchError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Validation fails
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("config.loaded_from_env");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "config.env_incomplete");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `SLOTWATCH_CUTOFF` and `SLOTWATCH_SOURCE_URL` must be present; every other
/// variable falls back to its default.
///
/// # Errors
/// Returns `SlotWatchError::Config` if required variables are missing
/// or any variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let cutoff = env_var("SLOTWATCH_CUTOFF").and_then(|s| parse_date(&s))?;
    let url = env_var("SLOTWATCH_SOURCE_URL")?;

    let recap_days = match std::env::var("SLOTWATCH_RECAP_DAYS") {
        Ok(raw) => parse_weekdays(&raw)?,
        Err(_) => Vec::new(),
    };

    let store_path =
        std::env::var("SLOTWATCH_STATE_PATH").unwrap_or_else(|_| DEFAULT_STATE_FILE.to_string());

    let max_pages = env_parse("SLOTWATCH_SOURCE_MAX_PAGES", DEFAULT_MAX_PAGES, "max pages")?;
    let timeout_secs =
        env_parse("SLOTWATCH_SOURCE_TIMEOUT", DEFAULT_SOURCE_TIMEOUT_SECS, "source timeout")?;

    let delivery = DeliveryConfig {
        enabled: env_bool("SLOTWATCH_DELIVERY_ENABLED", false),
        endpoint: env_opt("SLOTWATCH_DELIVERY_ENDPOINT"),
        api_key: env_opt("SLOTWATCH_DELIVERY_API_KEY"),
        sender: env_opt("SLOTWATCH_DELIVERY_SENDER"),
        recipient: env_opt("SLOTWATCH_DELIVERY_RECIPIENT"),
        subject: env_opt("SLOTWATCH_DELIVERY_SUBJECT")
            .unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
    };

    let config = Config {
        watch: WatchConfig { cutoff, recap_days },
        store: StoreConfig { path: store_path },
        source: SourceConfig { url, max_pages, timeout_secs },
        delivery,
    };
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `SlotWatchError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Validation fails
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SlotWatchError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SlotWatchError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "config.loading_file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SlotWatchError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SlotWatchError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SlotWatchError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(SlotWatchError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its parent, and the directory of
/// the running executable.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
        candidates.push(cwd.join("../config.json"));
        candidates.push(cwd.join("../config.toml"));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> [PathBuf; 4] {
    [
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("slotwatch.json"),
        dir.join("slotwatch.toml"),
    ]
}

/// Get required environment variable
///
/// # Errors
/// Returns `SlotWatchError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        SlotWatchError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Optional environment variable; blank values count as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T>(key: &str, default: T, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| SlotWatchError::Config(format!("Invalid {}: {}", what, e))),
        Err(_) => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), ISO_DATE_FORMAT)
        .map_err(|e| SlotWatchError::Config(format!("Invalid cutoff date {:?}: {}", raw, e)))
}

/// `Mon,Wed,Fri` or `monday, friday`; blank entries are ignored.
fn parse_weekdays(raw: &str) -> Result<Vec<Weekday>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<Weekday>()
                .map_err(|_| SlotWatchError::Config(format!("Invalid recap day: {}", part)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ENV_KEYS: [&str; 12] = [
        "SLOTWATCH_CUTOFF",
        "SLOTWATCH_SOURCE_URL",
        "SLOTWATCH_RECAP_DAYS",
        "SLOTWATCH_STATE_PATH",
        "SLOTWATCH_SOURCE_MAX_PAGES",
        "SLOTWATCH_SOURCE_TIMEOUT",
        "SLOTWATCH_DELIVERY_ENABLED",
        "SLOTWATCH_DELIVERY_ENDPOINT",
        "SLOTWATCH_DELIVERY_API_KEY",
        "SLOTWATCH_DELIVERY_SENDER",
        "SLOTWATCH_DELIVERY_RECIPIENT",
        "SLOTWATCH_DELIVERY_SUBJECT",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    fn write_temp(contents: &str, extension: &str) -> PathBuf {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        let path = temp_file.path().with_extension(extension);
        std::fs::copy(temp_file.path(), &path).unwrap();
        path
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        for (key, value) in [
            ("TEST_SW_BOOL_1", "1"),
            ("TEST_SW_BOOL_TRUE", "true"),
            ("TEST_SW_BOOL_YES", "yes"),
            ("TEST_SW_BOOL_ON", "ON"),
        ] {
            std::env::set_var(key, value);
            assert!(env_bool(key, false), "{} should be true", value);
            std::env::remove_var(key);
        }

        for (key, value) in [("TEST_SW_BOOL_0", "0"), ("TEST_SW_BOOL_OFF", "off")] {
            std::env::set_var(key, value);
            assert!(!env_bool(key, true), "{} should be false", value);
            std::env::remove_var(key);
        }

        std::env::remove_var("TEST_SW_BOOL_MISSING");
        assert!(env_bool("TEST_SW_BOOL_MISSING", true));
        assert!(!env_bool("TEST_SW_BOOL_MISSING", false));
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("SLOTWATCH_CUTOFF", "2025-10-01");
        std::env::set_var("SLOTWATCH_SOURCE_URL", "https://calendar.example/?page={page}");
        std::env::set_var("SLOTWATCH_RECAP_DAYS", "Mon, wednesday,Fri");
        std::env::set_var("SLOTWATCH_STATE_PATH", "/tmp/slots.json");
        std::env::set_var("SLOTWATCH_SOURCE_MAX_PAGES", "6");
        std::env::set_var("SLOTWATCH_SOURCE_TIMEOUT", "10");
        std::env::set_var("SLOTWATCH_DELIVERY_ENABLED", "true");
        std::env::set_var("SLOTWATCH_DELIVERY_ENDPOINT", "https://mail.example/send");
        std::env::set_var("SLOTWATCH_DELIVERY_API_KEY", "key-123");
        std::env::set_var("SLOTWATCH_DELIVERY_SENDER", "watch@example.com");
        std::env::set_var("SLOTWATCH_DELIVERY_RECIPIENT", "me@example.com");

        let result = load_from_env();
        clear_env();

        let config = result.expect("config from env");
        assert_eq!(config.watch.cutoff, NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
        assert_eq!(config.watch.recap_days, vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]);
        assert_eq!(config.store.path, "/tmp/slots.json");
        assert_eq!(config.source.max_pages, 6);
        assert_eq!(config.source.timeout_secs, 10);
        assert!(config.delivery.is_ready());
        assert_eq!(config.delivery.api_key.as_deref(), Some("key-123"));
        assert_eq!(config.delivery.subject, DEFAULT_SUBJECT);
    }

    #[test]
    fn test_load_from_env_applies_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("SLOTWATCH_CUTOFF", "2025-10-01");
        std::env::set_var("SLOTWATCH_SOURCE_URL", "https://calendar.example/");

        let result = load_from_env();
        clear_env();

        let config = result.expect("config from env");
        assert!(config.watch.recap_days.is_empty());
        assert_eq!(config.store.path, DEFAULT_STATE_FILE);
        assert_eq!(config.source.max_pages, DEFAULT_MAX_PAGES);
        assert!(!config.delivery.enabled);
    }

    #[test]
    fn test_load_from_env_missing_var() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("SLOTWATCH_SOURCE_URL", "https://calendar.example/");
        let result = load_from_env();
        clear_env();

        assert!(matches!(result, Err(SlotWatchError::Config(_))));
    }

    #[test]
    fn test_load_from_env_invalid_values() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("SLOTWATCH_CUTOFF", "01/10/2025");
        std::env::set_var("SLOTWATCH_SOURCE_URL", "https://calendar.example/");
        assert!(matches!(load_from_env(), Err(SlotWatchError::Config(_))));

        std::env::set_var("SLOTWATCH_CUTOFF", "2025-10-01");
        std::env::set_var("SLOTWATCH_RECAP_DAYS", "Mon,Someday");
        assert!(matches!(load_from_env(), Err(SlotWatchError::Config(_))));

        std::env::remove_var("SLOTWATCH_RECAP_DAYS");
        std::env::set_var("SLOTWATCH_SOURCE_MAX_PAGES", "0");
        assert!(matches!(load_from_env(), Err(SlotWatchError::Config(_))));

        clear_env();
    }

    #[test]
    fn test_load_from_file_json() {
        let path = write_temp(
            r#"{
                "watch": { "cutoff": "2025-10-01", "recap_days": ["Mon", "Fri"] },
                "source": { "url": "https://calendar.example/?page={page}" },
                "delivery": {
                    "enabled": true,
                    "endpoint": "https://mail.example/send",
                    "sender": "watch@example.com",
                    "recipient": "me@example.com"
                }
            }"#,
            "json",
        );

        let result = load_from_file(Some(path.clone()));
        std::fs::remove_file(path).ok();

        let config = result.expect("config from JSON file");
        assert_eq!(config.watch.recap_days, vec![Weekday::Mon, Weekday::Fri]);
        assert_eq!(config.store.path, DEFAULT_STATE_FILE);
        assert_eq!(config.source.timeout_secs, DEFAULT_SOURCE_TIMEOUT_SECS);
        assert!(config.delivery.is_ready());
    }

    #[test]
    fn test_load_from_file_toml() {
        let path = write_temp(
            r#"
[watch]
cutoff = "2025-10-01"
recap_days = ["Wed"]

[store]
path = "state/slots.json"

[source]
url = "https://calendar.example/"
max_pages = 3
"#,
            "toml",
        );

        let result = load_from_file(Some(path.clone()));
        std::fs::remove_file(path).ok();

        let config = result.expect("config from TOML file");
        assert_eq!(config.store.path, "state/slots.json");
        assert_eq!(config.source.max_pages, 3);
        assert!(!config.delivery.enabled);
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(matches!(result, Err(SlotWatchError::Config(_))));
    }

    #[test]
    fn test_load_from_file_rejects_invalid_config() {
        let path = write_temp(
            r#"{ "watch": { "cutoff": "2025-10-01" }, "source": { "url": "  " } }"#,
            "json",
        );

        let result = load_from_file(Some(path.clone()));
        std::fs::remove_file(path).ok();

        assert!(matches!(result, Err(SlotWatchError::Config(_))));
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("some content", &PathBuf::from("test.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }

    #[test]
    fn test_parse_weekdays_skips_blanks() {
        assert_eq!(parse_weekdays("Mon,, Tue ,").unwrap(), vec![Weekday::Mon, Weekday::Tue]);
    }
}
