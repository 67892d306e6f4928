//! Application context - dependency injection container

use std::path::PathBuf;
use std::sync::Arc;

use slotwatch_core::{Clock, SystemClock, WatchService, WatchSettings};
use slotwatch_domain::{Config, Result};
use slotwatch_infra::{config, HttpCalendarCrawler, HttpMailer, JsonFileSlotStore, RunLock};

/// Knobs that come from the command line rather than the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextOptions {
    /// Attach the mail collaborator when delivery is configured.
    pub deliver: bool,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self { deliver: true }
    }
}

/// Application context - holds the wired watch service for one run
pub struct AppContext {
    pub config: Config,
    pub watch_service: Arc<WatchService>,

    // Held for the whole run; released on drop
    _run_lock: RunLock,
}

impl AppContext {
    /// Resolve configuration from an explicit file or the standard sources.
    pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
        match path {
            Some(path) => config::load_from_file(Some(path)),
            None => config::load(),
        }
    }

    /// Wire the production adapters around `config`.
    pub fn new(config: Config, options: ContextOptions) -> Result<Self> {
        Self::new_with_clock(config, options, Arc::new(SystemClock))
    }

    /// Same as [`AppContext::new`] with an injected clock.
    pub fn new_with_clock(
        config: Config,
        options: ContextOptions,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;

        let run_lock = RunLock::acquire(&config.store.path)?;

        let store = Arc::new(JsonFileSlotStore::new(&config.store.path));
        let source = Arc::new(HttpCalendarCrawler::from_config(&config.source)?);
        let settings = WatchSettings::from_config(&config);

        let mut service = WatchService::new(source, store, settings).with_clock(clock);

        if !options.deliver {
            tracing::info!("context.delivery_disabled_by_flag");
        } else if config.delivery.is_ready() {
            service = service.with_notifier(Arc::new(HttpMailer::from_config(&config.delivery)?));
        } else if config.delivery.enabled {
            tracing::warn!("context.delivery_incomplete");
        }

        tracing::info!(
            state = %config.store.path,
            source = %config.source.url,
            delivery = service.settings().delivery.is_some() && options.deliver,
            "context.ready"
        );

        Ok(Self { config, watch_service: Arc::new(service), _run_lock: run_lock })
    }
}
