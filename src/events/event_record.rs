use chrono::{DateTime, Utc};
use serde::Serialize;

/// One earthquake, flattened from a feed feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    /// Feed identifier of the event, when the feature carries one.
    pub event_id: Option<String>,

    /// Origin time of the event.
    pub time: DateTime<Utc>,

    /// Degrees east, always finite.
    pub longitude: f64,

    /// Degrees north, always finite.
    pub latitude: f64,

    /// Depth below the surface in kilometers. May be negative for events above sea level.
    pub depth_km: f64,

    /// Magnitude, or `None` when the feed does not know it.
    pub mag: Option<f64>,

    /// Human-readable location description.
    pub place: Option<String>,

    /// Event detail page.
    pub url: Option<String>,
}
