use super::{FetchError, RawFeedPayload, TimeWindow};
use crate::Result;
use core::time::Duration;
use ohno::IntoAppError;

const LOG_TARGET: &str = "      feed";

/// Default base URL of the USGS summary feeds.
pub const USGS_SUMMARY_BASE_URL: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";

/// `User-Agent` sent with every feed request.
pub const USER_AGENT: &str = concat!("quake-tracker/", env!("CARGO_PKG_VERSION"));

/// Default timeout for one feed request, including the body transfer.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Default number of attempts, including the original request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default base delay for exponential backoff between attempts.
pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// How often and how patiently to retry transport failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Values below 1 are treated as 1.
    pub max_attempts: u32,

    /// Delay after the first failed attempt; doubled after each subsequent failure.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Delay to wait after the given (1-based) failed attempt.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_RETRY_BASE_DELAY,
        }
    }
}

/// Retrieves the raw summary feed for a time window.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl FeedClient {
    /// Create a client for the given feed location.
    ///
    /// `base_url` defaults to [`USGS_SUMMARY_BASE_URL`].
    pub fn new(base_url: Option<&str>, request_timeout: Duration, retry: RetryPolicy) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(request_timeout)
            .build()
            .into_app_err("creating HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.unwrap_or(USGS_SUMMARY_BASE_URL).trim_end_matches('/').to_string(),
            retry,
        })
    }

    /// The URL of the feed for a time window.
    #[must_use]
    pub fn feed_url(&self, window: TimeWindow) -> String {
        format!("{}/all_{}.geojson", self.base_url, window.token())
    }

    /// Fetch and shape-check the feed for a time window.
    ///
    /// Transport failures are retried with exponential backoff until the attempt budget is
    /// spent; the last failure is then returned. A body that is not a feed payload fails
    /// immediately.
    pub async fn fetch(&self, window: TimeWindow) -> Result<RawFeedPayload, FetchError> {
        let url = self.feed_url(window);
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 0;

        let body = loop {
            attempt += 1;
            log::debug!(target: LOG_TARGET, "GET {url} (attempt {attempt} of {max_attempts})");

            match self.get_body(&url).await {
                Ok(body) => break body,
                Err(e) if attempt >= max_attempts => {
                    log::error!(target: LOG_TARGET, "Giving up on {url} after {attempt} attempt(s): {e}");
                    return Err(FetchError::Transport {
                        url,
                        attempts: attempt,
                        source: e,
                    });
                }
                Err(e) => {
                    let delay = self.retry.delay_after(attempt);
                    log::warn!(
                        target: LOG_TARGET,
                        "Failed to fetch {url}: {e}. Retrying in {}ms",
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        };

        log::debug!(target: LOG_TARGET, "Received {} bytes from {url}", body.len());

        let value: serde_json::Value = serde_json::from_str(&body).map_err(|e| FetchError::Validation {
            url: url.clone(),
            reason: format!("body is not valid JSON: {e}"),
        })?;

        RawFeedPayload::from_value(value).map_err(|e| {
            log::error!(target: LOG_TARGET, "Data validation failed for {url}: {e}");
            FetchError::Validation {
                url,
                reason: e.to_string(),
            }
        })
    }

    /// One request attempt; non-success statuses count as transport failures.
    async fn get_body(&self, url: &str) -> Result<String, reqwest::Error> {
        self.client.get(url).send().await?.error_for_status()?.text().await
    }
}
