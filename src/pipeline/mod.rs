//! Turning a user request into a table of displayable events
//!
//! [`Pipeline::render`] ties the stages together: the feed payload for the requested
//! window comes from the cache or the network, is normalized into event records, encoded
//! with colors and radii, and finally filtered against the [`MinMagnitude`] threshold.
//! An empty result is reported as [`Outcome::NoData`] with the reason, rather than as an
//! error.

mod event_table;
mod filter;
mod min_magnitude;
mod render;

pub use event_table::{Cell, Column, EventTable};
pub use filter::{UNKNOWN_MAGNITUDE_SENTINEL, filter_by_min_magnitude, meets_min_magnitude};
pub use min_magnitude::{MIN_MAGNITUDE_CEILING, MIN_MAGNITUDE_FLOOR, MinMagnitude, parse_min_magnitude};
pub use render::{NoDataReason, Outcome, Pipeline, Request};
