use crate::encoding::EncodedEvent;

/// Magnitude substituted for unknown values, only while comparing against a threshold.
///
/// It is below every selectable threshold, so events of unknown magnitude never pass the
/// filter. It is never stored in an event.
pub const UNKNOWN_MAGNITUDE_SENTINEL: f64 = -1.0;

/// Whether an event of magnitude `mag` is shown for `min_magnitude`.
#[must_use]
pub fn meets_min_magnitude(mag: Option<f64>, min_magnitude: f64) -> bool {
    mag.unwrap_or(UNKNOWN_MAGNITUDE_SENTINEL) >= min_magnitude
}

/// Keep the events whose magnitude is at least `min_magnitude`, preserving order.
#[must_use]
pub fn filter_by_min_magnitude(events: impl IntoIterator<Item = EncodedEvent>, min_magnitude: f64) -> Vec<EncodedEvent> {
    events
        .into_iter()
        .filter(|event| meets_min_magnitude(event.record.mag, min_magnitude))
        .collect()
}
