use std::time::Duration;

use reqwest::{Client as ReqwestClient, Response, StatusCode};
use serde::Serialize;
use slotwatch_domain::SlotWatchError;
use tracing::{debug, warn};

use crate::errors::InfraError;

/// HTTP access for the calendar and the mail API.
///
/// Calendar pages are fetched with `GET`, which is retried with exponential
/// backoff on 5xx responses and transport failures. Mail submissions are a
/// single `POST` and are never replayed.
#[derive(Clone)]
pub struct HttpClient {
    inner: ReqwestClient,
    retry: RetryPolicy,
}

#[derive(Debug, Clone, Copy)]
struct RetryPolicy {
    attempts: usize,
    base_backoff: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `retry` (1-based), doubling each time.
    fn delay(&self, retry: usize) -> Duration {
        let shift = retry.saturating_sub(1).min(8) as u32;
        self.base_backoff.saturating_mul(1u32 << shift)
    }

    fn has_more(&self, attempt: usize) -> bool {
        attempt < self.attempts
    }
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Client with default timeout, attempts and backoff.
    pub fn new() -> Result<Self, SlotWatchError> {
        Self::builder().build()
    }

    /// GET `url` and return the body of a 2xx response.
    ///
    /// A non-success status after the last attempt is
    /// `SlotWatchError::Network` naming the status.
    pub async fn get_text(&self, url: &str) -> Result<String, SlotWatchError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            debug!(attempt, %url, "http.get");

            match self.inner.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt, %url, %status, "http.get_response");

                    if status.is_success() {
                        return response.text().await.map_err(network);
                    }
                    if status.is_server_error() && self.retry.has_more(attempt) {
                        self.back_off(attempt).await;
                        continue;
                    }
                    return Err(status_error("GET", url, status));
                }
                Err(err) => {
                    debug!(attempt, %url, error = %err, "http.get_failed");

                    if is_transient(&err) && self.retry.has_more(attempt) {
                        self.back_off(attempt).await;
                        continue;
                    }
                    return Err(network(err));
                }
            }
        }
    }

    /// POST `payload` as JSON exactly once and hand back the response.
    ///
    /// Status handling is left to the caller. Transport failures are
    /// `SlotWatchError::Network`.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        payload: &T,
        bearer: Option<&str>,
    ) -> Result<Response, SlotWatchError> {
        let mut request = self.inner.post(url).json(payload);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        debug!(%url, "http.post");
        let response = request.send().await.map_err(|err| {
            warn!(%url, error = %err, "http.post_failed");
            network(err)
        })?;
        debug!(%url, status = %response.status(), "http.post_response");
        Ok(response)
    }

    async fn back_off(&self, attempt: usize) {
        let delay = self.retry.delay(attempt);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    user_agent: String,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: 3,
            base_backoff: Duration::from_millis(200),
            user_agent: concat!("slotwatch/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpClientBuilder {
    /// Per-request timeout, connect included.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total `GET` attempts, first try included. Clamped to at least 1.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Delay before the first retry.
    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn build(self) -> Result<HttpClient, SlotWatchError> {
        let inner = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .no_proxy()
            .build()
            .map_err(network)?;

        Ok(HttpClient {
            inner,
            retry: RetryPolicy { attempts: self.max_attempts.max(1), base_backoff: self.base_backoff },
        })
    }
}

fn network(err: reqwest::Error) -> SlotWatchError {
    InfraError::from(err).into()
}

fn status_error(method: &str, url: &str, status: StatusCode) -> SlotWatchError {
    SlotWatchError::Network(format!("{method} {url} returned {status}"))
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}
