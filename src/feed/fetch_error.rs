use thiserror::Error;

/// Failure to obtain a usable feed payload.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be completed (network error, timeout, non-success status)
    /// within the attempt budget. Carries the failure of the last attempt.
    #[error("unable to fetch {url} after {attempts} attempt(s): {source}")]
    Transport {
        url: String,
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered, but the body is not a recognizable feed. Never retried.
    #[error("invalid feed data from {url}: {reason}")]
    Validation { url: String, reason: String },
}

impl FetchError {
    /// Returns `true` for failures that were retried before being surfaced.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Returns `true` for feed-level validation failures.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
