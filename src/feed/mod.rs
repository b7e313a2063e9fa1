//! Retrieval of the USGS earthquake summary feeds
//!
//! # Implementation Model
//!
//! [`FeedClient`] builds the feed URL for a [`TimeWindow`], issues the HTTP GET with a
//! bounded timeout, and retries transport failures (network errors, timeouts, non-2xx
//! statuses) with exponential backoff. A response that arrives but does not look like a
//! feed (not JSON, not an object, no `features` array) is reported as a
//! [`FetchError::Validation`] right away, since retrying cannot fix it.
//!
//! [`FeedCache`] is owned by the caller and keeps the last payload per window together
//! with its fetch time, so repeated requests within the TTL skip the network.

mod cache;
mod client;
mod fetch_error;
mod payload;
mod time_window;

pub use cache::{DEFAULT_CACHE_TTL, FeedCache};
pub use client::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_REQUEST_TIMEOUT, DEFAULT_RETRY_BASE_DELAY, FeedClient, RetryPolicy, USER_AGENT,
    USGS_SUMMARY_BASE_URL,
};
pub use fetch_error::FetchError;
pub use payload::{FEATURES_KEY, PayloadError, RawFeedPayload};
pub(crate) use payload::json_kind;
pub use time_window::TimeWindow;
