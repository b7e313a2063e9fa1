//! A TTL-aware, in-memory cache of feed payloads keyed by time window.
//!
//! [`FeedCache`] remembers when each window's payload was fetched so that the
//! orchestration layer can reuse it until it goes stale, without ever serving one
//! window's payload for another.

use super::{RawFeedPayload, TimeWindow};
use chrono::{DateTime, Utc};
use core::time::Duration;
use std::collections::HashMap;
use std::sync::Arc;

const LOG_TARGET: &str = "     cache";

/// Default freshness window for cached payloads.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Clone)]
struct Entry {
    payload: Arc<RawFeedPayload>,
    fetched_at: DateTime<Utc>,
}

/// Payloads of recently fetched feeds.
#[derive(Debug, Clone)]
pub struct FeedCache {
    entries: HashMap<TimeWindow, Entry>,
    ttl: Duration,
    ignore: bool,
}

impl FeedCache {
    /// Create an empty cache.
    ///
    /// When `ignore_cache` is set every lookup misses, so each request goes to the network.
    #[must_use]
    pub fn new(ttl: Duration, ignore_cache: bool) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            ignore: ignore_cache,
        }
    }

    /// Look up a fresh payload for `window` as of `now`.
    #[must_use]
    pub fn load(&self, window: TimeWindow, now: DateTime<Utc>) -> Option<Arc<RawFeedPayload>> {
        if self.ignore {
            return None;
        }

        let Some(entry) = self.entries.get(&window) else {
            log::debug!(target: LOG_TARGET, "Cache miss for {window}");
            return None;
        };

        // Future timestamps (clock skew) are treated as fresh
        let age = now.signed_duration_since(entry.fetched_at);
        if age.num_milliseconds() < 0 {
            log::debug!(target: LOG_TARGET, "Cache timestamp is in the future for {window} (clock skew detected), treating as fresh");
        } else {
            let age = age.to_std().unwrap_or(Duration::MAX);
            if age >= self.ttl {
                log::debug!(
                    target: LOG_TARGET,
                    "Cache expired for {window} (age: {}s, TTL: {}s)",
                    age.as_secs(),
                    self.ttl.as_secs()
                );
                return None;
            }

            log::debug!(target: LOG_TARGET, "Cache hit for {window} (age: {}s)", age.as_secs());
        }

        Some(Arc::clone(&entry.payload))
    }

    /// Remember `payload` as the feed for `window`, fetched at `now`.
    pub fn store(&mut self, window: TimeWindow, payload: RawFeedPayload, now: DateTime<Utc>) -> Arc<RawFeedPayload> {
        let payload = Arc::new(payload);
        let _ = self.entries.insert(
            window,
            Entry {
                payload: Arc::clone(&payload),
                fetched_at: now,
            },
        );
        payload
    }
}

impl Default for FeedCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL, false)
    }
}
