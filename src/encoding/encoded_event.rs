use super::{Rgba, VisualScale};
use crate::events::EventRecord;

/// An event together with the visual attributes derived from its magnitude.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedEvent {
    pub record: EventRecord,
    pub color: Rgba,
    pub radius: i64,
}

impl EncodedEvent {
    /// Derive color and radius for `record` using `scale`.
    #[must_use]
    pub fn encode(record: EventRecord, scale: &VisualScale) -> Self {
        Self {
            color: scale.color(record.mag),
            radius: scale.radius(record.mag),
            record,
        }
    }
}
