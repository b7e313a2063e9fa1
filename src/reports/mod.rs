//! Report generation for filtered earthquake events
//!
//! # Implementation Model
//!
//! Four generators are provided, each accessed through a `generate` function that
//! writes into any `core::fmt::Write`:
//! - **Console**: a terminal table with magnitudes drawn in their event color
//! - **CSV**: one row per event with every [`Column`](crate::pipeline::Column)
//! - **JSON**: the request context plus one object per event
//! - **Deck**: a deck.gl `ScatterplotLayer` descriptor for drawing the events on a map
//!
//! All generators operate on the same [`EventTable`](crate::pipeline::EventTable), so
//! column names and value formatting are identical across the file formats.

mod console;
mod csv;
mod deck;
mod json;

pub use console::generate as generate_console;
pub use csv::generate as generate_csv;
pub use deck::generate as generate_deck;
pub use json::generate as generate_json;

#[cfg(test)]
mod test_support {
    use crate::encoding::{EncodedEvent, VisualScale};
    use crate::events::EventRecord;
    use crate::feed::TimeWindow;
    use crate::pipeline::{EventTable, MinMagnitude, Request};
    use chrono::DateTime;

    pub fn sample_request() -> Request {
        Request {
            window: TimeWindow::Week,
            min_magnitude: MinMagnitude::new(3.0).unwrap(),
        }
    }

    pub fn sample_table() -> EventTable {
        let scale = VisualScale::default();
        let first = EventRecord {
            event_id: Some("us1".to_string()),
            time: DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
            longitude: 142.5,
            latitude: 38.25,
            depth_km: 33.0,
            mag: Some(5.5),
            place: Some("Offshore somewhere".to_string()),
            url: Some("https://example.com/us1".to_string()),
        };
        let second = EventRecord {
            event_id: Some("us2".to_string()),
            time: DateTime::from_timestamp_millis(1_699_996_400_000).unwrap(),
            longitude: -120.5,
            latitude: 35.75,
            depth_km: 10.0,
            mag: Some(3.0),
            place: None,
            url: None,
        };

        EventTable::new(vec![EncodedEvent::encode(first, &scale), EncodedEvent::encode(second, &scale)])
    }
}
