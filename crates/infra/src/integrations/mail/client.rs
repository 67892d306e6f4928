//! HTTP mail client
//!
//! Sends one plain-text message per call as
//! `POST <endpoint>` with a JSON body `{from, to, subject, text}` and an
//! optional bearer key.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use slotwatch_core::Notifier;
use slotwatch_domain::{DeliveryConfig, Result, SlotWatchError};
use tracing::{debug, info};

use crate::http::HttpClient;

const MAIL_TIMEOUT: Duration = Duration::from_secs(20);
const ERROR_BODY_LIMIT: usize = 200;

/// Wire payload of one message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailMessage<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub subject: &'a str,
    pub text: &'a str,
}

/// Notifier backed by an HTTP mail API
pub struct HttpMailer {
    client: HttpClient,
    endpoint: String,
    api_key: Option<String>,
    sender: String,
}

impl HttpMailer {
    /// Mailer posting to `endpoint` as `sender`, authenticated by `api_key`
    /// when one is set.
    pub fn new(
        client: HttpClient,
        endpoint: impl Into<String>,
        api_key: Option<String>,
        sender: impl Into<String>,
    ) -> Self {
        Self { client, endpoint: endpoint.into(), api_key, sender: sender.into() }
    }

    /// Build a mailer from the delivery settings.
    ///
    /// Fails with `SlotWatchError::Config` when endpoint or sender is missing.
    pub fn from_config(config: &DeliveryConfig) -> Result<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| SlotWatchError::Config("delivery.endpoint is not set".into()))?;
        let sender = config
            .sender
            .clone()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| SlotWatchError::Config("delivery.sender is not set".into()))?;

        let client = HttpClient::builder().timeout(MAIL_TIMEOUT).max_attempts(1).build()?;
        Ok(Self::new(client, endpoint, config.api_key.clone(), sender))
    }

    async fn post(&self, message: &MailMessage<'_>) -> Result<()> {
        let response =
            self.client.post_json(&self.endpoint, message, self.api_key.as_deref()).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let snippet: String = body.chars().take(ERROR_BODY_LIMIT).collect();
        debug!(%status, body = %snippet, "mail.rejected");
        Err(SlotWatchError::Delivery(format!("mail API returned {status}: {snippet}")))
    }
}

#[async_trait]
impl Notifier for HttpMailer {
    async fn deliver(&self, subject: &str, body: &str, recipient: &str) -> Result<()> {
        let message = MailMessage { from: &self.sender, to: recipient, subject, text: body };

        self.post(&message).await.map_err(|err| match err {
            SlotWatchError::Delivery(_) => err,
            other => SlotWatchError::Delivery(other.to_string()),
        })?;

        info!(recipient = %recipient, "mail.sent");
        Ok(())
    }
}
