//! HTTP client for the OTXv2 subscribed-pulses endpoint.

use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use zeek_otx_types::PulsePage;

/// The AlienVault OTX pulse URL is hard coded.
/// If it is ever to change, update the URL below.
pub const PULSES_URL: &str = "http://otx.alienvault.com/api/v1/pulses/subscribed";

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "X-OTX-API-KEY";

/// Configuration for the OTX client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Pulses requested per page.
    pub page_size: usize,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retry attempts for transient failures.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds).
    pub max_delay_ms: u64,
    /// User agent string.
    pub user_agent: String,
    /// Endpoint for the first page; continuation URLs come from the server.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            timeout: Duration::from_secs(60),
            max_retries: 5,
            base_delay_ms: 500,
            max_delay_ms: 30_000,
            user_agent: format!("zeek-otx/{}", env!("CARGO_PKG_VERSION")),
            base_url: PULSES_URL.to_string(),
        }
    }
}

/// Errors that can occur while fetching a page of pulses.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the API key (HTTP 403).
    #[error("invalid API key")]
    Authentication,

    /// The server rejected the request (HTTP 400).
    #[error("invalid request")]
    BadRequest,

    /// The server answered with a status outside the documented set.
    #[error("unexpected response status: {0}")]
    UnexpectedStatus(u16),
}

/// HTTP client with connection reuse, timeouts, and bounded retries.
#[derive(Debug, Clone)]
pub struct OtxClient {
    client: Client,
    config: ClientConfig,
}

impl OtxClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            // Pagination reuses one connection; keep it alive between pages
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches one page of subscribed pulses.
    ///
    /// The first page (no continuation) asks the configured endpoint for
    /// pulses modified since `modified_since`, `page_size` at a time. A
    /// continuation request hits the server-supplied `next` URL verbatim:
    /// that URL already encodes the paging parameters, so only the API key
    /// header is re-sent.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Authentication`] on HTTP 403,
    /// [`FetchError::BadRequest`] on HTTP 400, and
    /// [`FetchError::UnexpectedStatus`] for any other non-200 status once
    /// retries are exhausted. Timeouts and connection failures are retried
    /// with exponential backoff before surfacing as [`FetchError::Http`].
    pub async fn fetch_page(
        &self,
        api_key: &str,
        modified_since: &str,
        next: Option<&str>,
    ) -> Result<PulsePage, FetchError> {
        let mut attempts = 0;

        loop {
            let request = match next {
                Some(url) => self.client.get(url),
                None => self.client.get(&self.config.base_url).query(&[
                    ("limit", self.config.page_size.to_string().as_str()),
                    ("modified_since", modified_since),
                ]),
            };

            match request.header(API_KEY_HEADER, api_key).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status == StatusCode::OK {
                        return Ok(response.json::<PulsePage>().await?);
                    }
                    if status == StatusCode::FORBIDDEN {
                        return Err(FetchError::Authentication);
                    }
                    if status == StatusCode::BAD_REQUEST {
                        return Err(FetchError::BadRequest);
                    }

                    // Retry on server errors (5xx) and rate limiting (429)
                    if (status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS)
                        && attempts < self.config.max_retries
                    {
                        attempts += 1;
                        tokio::time::sleep(self.backoff_delay(attempts)).await;
                        continue;
                    }

                    return Err(FetchError::UnexpectedStatus(status.as_u16()));
                }
                Err(e) if is_retryable_error(&e) && attempts < self.config.max_retries => {
                    attempts += 1;
                    tokio::time::sleep(self.backoff_delay(attempts)).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Calculates the backoff delay with exponential backoff and jitter.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let exp_delay = self
            .config
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(10));
        let capped_delay = exp_delay.min(self.config.max_delay_ms);

        // Deterministic jitter derived from the attempt number, so no RNG
        // is needed for a single sequential request loop.
        let jitter_range = capped_delay / 4;
        let jitter = if jitter_range > 0 {
            let jitter_offset = (u64::from(attempt) * 17) % (jitter_range * 2);
            jitter_offset.saturating_sub(jitter_range)
        } else {
            0
        };

        Duration::from_millis((capped_delay + jitter).max(100))
    }
}

/// Determines if a transport error is worth retrying.
fn is_retryable_error(error: &reqwest::Error) -> bool {
    // Builder errors are configuration issues; retrying cannot help
    if error.is_builder() {
        return false;
    }

    error.is_timeout() || error.is_connect() || error.is_request()
}
