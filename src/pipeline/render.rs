use super::{EventTable, MinMagnitude, filter_by_min_magnitude};
use crate::Result;
use crate::encoding::{EncodedEvent, VisualScale};
use crate::events::normalize;
use crate::feed::{FeedCache, FeedClient, RawFeedPayload, TimeWindow};
use chrono::{DateTime, Utc};
use core::fmt::{Display, Formatter};
use ohno::IntoAppError;
use std::sync::Arc;

const LOG_TARGET: &str = "  pipeline";

/// What the user asked to see.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Request {
    pub window: TimeWindow,
    pub min_magnitude: MinMagnitude,
}

/// Why a request produced nothing to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoDataReason {
    /// The feed had no usable events for the window.
    FeedEmpty,

    /// Events exist, but none reach the selected threshold.
    BelowThreshold { available: usize },
}

impl Display for NoDataReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::FeedEmpty => f.write_str("the feed contains no usable events"),
            Self::BelowThreshold { available } => {
                write!(f, "none of the {available} event(s) reach the selected minimum magnitude")
            }
        }
    }
}

/// Result of rendering a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Events(EventTable),
    NoData(NoDataReason),
}

/// Fetch, normalize, encode, and filter events for display.
///
/// The pipeline owns the feed cache, so a sequence of requests against the same window
/// reuses one download until the cache entry goes stale.
#[derive(Debug)]
pub struct Pipeline {
    client: FeedClient,
    cache: FeedCache,
    scale: VisualScale,
}

impl Pipeline {
    #[must_use]
    pub const fn new(client: FeedClient, cache: FeedCache, scale: VisualScale) -> Self {
        Self { client, cache, scale }
    }

    /// Produce the events to display for `request` as of `now`.
    ///
    /// # Errors
    ///
    /// Returns an error when the feed cannot be retrieved or is not a feed payload.
    pub async fn render(&mut self, request: Request, now: DateTime<Utc>) -> Result<Outcome> {
        let payload = self.payload(request.window, now).await?;

        let normalized = normalize(&payload);
        if normalized.skipped > 0 {
            log::warn!(
                target: LOG_TARGET,
                "Skipped {} malformed feature(s) in the {} feed",
                normalized.skipped,
                request.window
            );
        }

        if normalized.events.is_empty() {
            log::info!(target: LOG_TARGET, "No events in the {} feed", request.window);
            return Ok(Outcome::NoData(NoDataReason::FeedEmpty));
        }

        let available = normalized.events.len();
        let encoded = normalized
            .events
            .into_iter()
            .map(|record| EncodedEvent::encode(record, &self.scale));
        let rows = filter_by_min_magnitude(encoded, request.min_magnitude.value());

        log::info!(
            target: LOG_TARGET,
            "{} of {available} event(s) in the {} feed reach magnitude {}",
            rows.len(),
            request.window,
            request.min_magnitude
        );

        if rows.is_empty() {
            return Ok(Outcome::NoData(NoDataReason::BelowThreshold { available }));
        }

        Ok(Outcome::Events(EventTable::new(rows)))
    }

    async fn payload(&mut self, window: TimeWindow, now: DateTime<Utc>) -> Result<Arc<RawFeedPayload>> {
        if let Some(payload) = self.cache.load(window, now) {
            return Ok(payload);
        }

        let payload = self
            .client
            .fetch(window)
            .await
            .into_app_err_with(|| format!("could not retrieve the {} earthquake feed", window.token()))?;

        Ok(self.cache.store(window, payload, now))
    }
}
