//! Normalization of raw feed features into event records
//!
//! The feed delivers GeoJSON features whose nested `properties` and `geometry` members
//! are not guaranteed to be well formed. [`normalize`] walks the features one at a time,
//! extracts an [`EventRecord`] from each, and counts (rather than propagates) every
//! feature it has to reject. Rows without a usable position are removed in a second pass
//! and the survivors are ordered most recent first.

mod event_record;
mod normalizer;

pub use event_record::EventRecord;
pub use normalizer::{MalformedFeature, Normalized, normalize, normalize_features};
