//! HTTP calendar crawler
//!
//! Walks the datepicker month by month. A URL containing `{page}` is
//! paginated (page numbers start at 0); any other URL is a single page.

use std::time::Duration;

use async_trait::async_trait;
use slotwatch_core::SlotSource;
use slotwatch_domain::constants::PAGE_PLACEHOLDER;
use slotwatch_domain::{Result, SlotSet, SlotWatchError, SourceConfig};
use tracing::{debug, info, warn};

use super::page_parser::parse_page;
use crate::http::HttpClient;

/// Slot source backed by the public booking calendar
pub struct HttpCalendarCrawler {
    client: HttpClient,
    url: String,
    max_pages: u32,
}

impl HttpCalendarCrawler {
    pub fn new(client: HttpClient, url: impl Into<String>, max_pages: u32) -> Self {
        Self { client, url: url.into(), max_pages: max_pages.max(1) }
    }

    /// Build a crawler with its own HTTP client from the source settings.
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        let client =
            HttpClient::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
        Ok(Self::new(client, config.url.clone(), config.max_pages))
    }

    fn is_paginated(&self) -> bool {
        self.url.contains(PAGE_PLACEHOLDER)
    }

    fn page_url(&self, page: u32) -> String {
        self.url.replace(PAGE_PLACEHOLDER, &page.to_string())
    }

    /// Fetch every page until the datepicker reports its last month.
    ///
    /// Errors are returned as the HTTP client raised them.
    async fn crawl(&self) -> Result<SlotSet> {
        let mut slots = SlotSet::new();

        for page in 0..self.max_pages {
            let url = self.page_url(page);
            let html = self.client.get_text(&url).await?;
            let parsed = parse_page(&html)?;
            debug!(page, slots = parsed.slots.len(), has_next = parsed.has_next, "calendar.page_parsed");

            slots.extend(parsed.slots);

            if !self.is_paginated() || !parsed.has_next {
                info!(pages = page + 1, slots = slots.len(), "calendar.crawl_complete");
                return Ok(slots);
            }
        }

        warn!(max_pages = self.max_pages, "calendar.page_cap_reached");
        Err(SlotWatchError::Observation(format!(
            "calendar still offered a next page after {} pages",
            self.max_pages
        )))
    }
}

#[async_trait]
impl SlotSource for HttpCalendarCrawler {
    async fn observe(&self) -> Result<SlotSet> {
        self.crawl().await.map_err(|err| match err {
            SlotWatchError::Observation(_) => err,
            other => SlotWatchError::Observation(other.to_string()),
        })
    }
}
