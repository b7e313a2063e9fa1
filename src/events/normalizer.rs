use super::EventRecord;
use crate::feed::{RawFeedPayload, json_kind};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

const LOG_TARGET: &str = "normalizer";

/// Number of elements in a feature's `geometry.coordinates`: longitude, latitude, depth.
const COORDINATE_ARITY: usize = 3;

/// Result of flattening a feed payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    /// Valid events, most recent first.
    pub events: Vec<EventRecord>,

    /// Number of features that were dropped because they were malformed.
    pub skipped: usize,
}

/// Why a single feature could not be turned into an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct MalformedFeature {
    reason: String,
}

impl MalformedFeature {
    fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// A feature that passed structural checks but whose position may still be unusable.
#[derive(Debug)]
struct ExtractedRow {
    event_id: Option<String>,
    time: DateTime<Utc>,
    longitude: Option<f64>,
    latitude: Option<f64>,
    depth_km: f64,
    mag: Option<f64>,
    place: Option<String>,
    url: Option<String>,
}

impl ExtractedRow {
    fn into_event(self) -> Option<EventRecord> {
        let longitude = self.longitude.filter(|v| v.is_finite())?;
        let latitude = self.latitude.filter(|v| v.is_finite())?;

        Some(EventRecord {
            event_id: self.event_id,
            time: self.time,
            longitude,
            latitude,
            depth_km: self.depth_km,
            mag: self.mag,
            place: self.place,
            url: self.url,
        })
    }
}

/// Flatten a feed payload into events.
///
/// Every feature is extracted on its own: a malformed feature is counted in
/// [`Normalized::skipped`] and never affects the others. Events without a usable position
/// are dropped afterwards, and the result is sorted by time, most recent first.
#[must_use]
pub fn normalize(payload: &RawFeedPayload) -> Normalized {
    normalize_features(payload.features())
}

/// Flatten a slice of raw GeoJSON features. See [`normalize`].
#[must_use]
pub fn normalize_features(features: &[Value]) -> Normalized {
    let mut rows = Vec::with_capacity(features.len());
    let mut skipped = 0;

    for feature in features {
        match extract_feature(feature) {
            Ok(row) => rows.push(row),
            Err(e) => {
                skipped += 1;
                log::warn!(target: LOG_TARGET, "Skipping malformed feature {}: {e}", feature_label(feature));
            }
        }
    }

    if skipped > 0 {
        log::info!(target: LOG_TARGET, "Skipped a total of {skipped} malformed feature(s)");
    }

    let extracted = rows.len();
    let mut events: Vec<EventRecord> = rows.into_iter().filter_map(ExtractedRow::into_event).collect();
    if events.len() < extracted {
        log::debug!(
            target: LOG_TARGET,
            "Dropped {} event(s) without a usable longitude/latitude",
            extracted - events.len()
        );
    }

    events.sort_by(|a, b| b.time.cmp(&a.time));

    Normalized { events, skipped }
}

fn extract_feature(feature: &Value) -> Result<ExtractedRow, MalformedFeature> {
    let feature = feature
        .as_object()
        .ok_or_else(|| MalformedFeature::new(format!("feature is {}, expected an object", json_kind(feature))))?;

    let properties = required_object(feature, "properties")?;
    let geometry = required_object(feature, "geometry")?;

    let coordinates = match geometry.get("coordinates") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(MalformedFeature::new(format!(
                "'geometry.coordinates' is {}, expected an array",
                json_kind(other)
            )));
        }
        None => return Err(MalformedFeature::new("'geometry.coordinates' is missing")),
    };

    let [longitude, latitude, depth] = coordinates.as_slice() else {
        return Err(MalformedFeature::new(format!(
            "coordinates list has {} items, expected {COORDINATE_ARITY}",
            coordinates.len()
        )));
    };

    Ok(ExtractedRow {
        event_id: feature_id(feature)?,
        time: event_time(properties)?,
        longitude: nullable_coordinate(longitude, "longitude")?,
        latitude: nullable_coordinate(latitude, "latitude")?,
        depth_km: depth
            .as_f64()
            .ok_or_else(|| MalformedFeature::new(format!("depth is {}, expected a number", json_kind(depth))))?,
        mag: optional_number(properties, "mag")?,
        place: optional_string(properties, "place")?,
        url: optional_string(properties, "url")?,
    })
}

fn required_object<'a>(parent: &'a Map<String, Value>, key: &str) -> Result<&'a Map<String, Value>, MalformedFeature> {
    match parent.get(key) {
        Some(Value::Object(map)) => Ok(map),
        Some(other) => Err(MalformedFeature::new(format!("'{key}' is {}, expected an object", json_kind(other)))),
        None => Err(MalformedFeature::new(format!("'{key}' is missing"))),
    }
}

/// Epoch milliseconds in `properties.time`.
fn event_time(properties: &Map<String, Value>) -> Result<DateTime<Utc>, MalformedFeature> {
    let millis = match properties.get("time") {
        Some(Value::Number(n)) => {
            if let Some(ms) = n.as_i64() {
                Some(ms)
            } else {
                n.as_f64().filter(|f| f.is_finite() && f.abs() < 9.0e15).map(|f| {
                    #[expect(clippy::cast_possible_truncation, reason = "magnitude is bounded above, fraction of a millisecond is dropped")]
                    let ms = f.trunc() as i64;
                    ms
                })
            }
        }
        Some(Value::Null) | None => return Err(MalformedFeature::new("'properties.time' is missing")),
        Some(other) => {
            return Err(MalformedFeature::new(format!(
                "'properties.time' is {}, expected epoch milliseconds",
                json_kind(other)
            )));
        }
    };

    millis
        .and_then(DateTime::from_timestamp_millis)
        .ok_or_else(|| MalformedFeature::new("'properties.time' is out of range"))
}

fn feature_id(feature: &Map<String, Value>) -> Result<Option<String>, MalformedFeature> {
    match feature.get("id") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(MalformedFeature::new(format!("'id' is {}, expected a string", json_kind(other)))),
    }
}

fn nullable_coordinate(value: &Value, name: &str) -> Result<Option<f64>, MalformedFeature> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        other => Err(MalformedFeature::new(format!("{name} is {}, expected a number", json_kind(other)))),
    }
}

fn optional_number(properties: &Map<String, Value>, key: &str) -> Result<Option<f64>, MalformedFeature> {
    match properties.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(other) => Err(MalformedFeature::new(format!(
            "'properties.{key}' is {}, expected a number",
            json_kind(other)
        ))),
    }
}

fn optional_string(properties: &Map<String, Value>, key: &str) -> Result<Option<String>, MalformedFeature> {
    match properties.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(MalformedFeature::new(format!(
            "'properties.{key}' is {}, expected a string",
            json_kind(other)
        ))),
    }
}

/// Identifier used when logging a skipped feature.
fn feature_label(feature: &Value) -> String {
    match feature.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(id: &str, time: i64, coordinates: &Value, mag: &Value) -> Value {
        json!({
            "type": "Feature",
            "id": id,
            "properties": {
                "time": time,
                "mag": mag,
                "place": format!("somewhere {id}"),
                "url": format!("https://example.com/{id}")
            },
            "geometry": { "type": "Point", "coordinates": coordinates }
        })
    }

    fn ids(normalized: &Normalized) -> Vec<&str> {
        normalized.events.iter().map(|e| e.event_id.as_deref().unwrap()).collect()
    }

    #[test]
    fn test_extracts_all_fields() {
        let result = normalize_features(&[feature("us1", 1_700_000_000_123, &json!([-122.5, 37.75, 8.25]), &json!(4.2))]);

        assert_eq!(result.skipped, 0);
        assert_eq!(result.events.len(), 1);
        let event = &result.events[0];
        assert_eq!(event.event_id.as_deref(), Some("us1"));
        assert_eq!(event.time, DateTime::from_timestamp_millis(1_700_000_000_123).unwrap());
        assert!((event.longitude - -122.5).abs() < f64::EPSILON);
        assert!((event.latitude - 37.75).abs() < f64::EPSILON);
        assert!((event.depth_km - 8.25).abs() < f64::EPSILON);
        assert_eq!(event.mag, Some(4.2));
        assert_eq!(event.place.as_deref(), Some("somewhere us1"));
        assert_eq!(event.url.as_deref(), Some("https://example.com/us1"));
    }

    #[test]
    fn test_empty_features() {
        let result = normalize_features(&[]);
        assert_eq!(result, Normalized::default());
    }

    #[test]
    fn test_normalize_payload_with_empty_features() {
        let payload = RawFeedPayload::from_value(json!({ "features": [] })).unwrap();
        let result = normalize(&payload);
        assert!(result.events.is_empty());
        assert_eq!(result.skipped, 0);
    }

    #[test]
    fn test_two_element_coordinates_are_skipped() {
        let result = normalize_features(&[
            feature("a", 1000, &json!([1.0, 2.0, 3.0]), &json!(1.0)),
            feature("b", 2000, &json!([1.0, 2.0]), &json!(1.0)),
            feature("c", 3000, &json!([4.0, 5.0, 6.0]), &json!(1.0)),
        ]);

        assert_eq!(result.events.len(), 2);
        assert_eq!(result.skipped, 1);
        assert_eq!(ids(&result), ["c", "a"]);
    }

    #[test]
    fn test_four_element_coordinates_are_skipped() {
        let result = normalize_features(&[feature("a", 1000, &json!([1.0, 2.0, 3.0, 4.0]), &json!(1.0))]);
        assert!(result.events.is_empty());
        assert_eq!(result.skipped, 1);
    }

    #[test]
    fn test_sorted_most_recent_first() {
        let result = normalize_features(&[
            feature("old", 1_000, &json!([0.0, 0.0, 0.0]), &json!(1.0)),
            feature("new", 3_000, &json!([0.0, 0.0, 0.0]), &json!(1.0)),
            feature("mid", 2_000, &json!([0.0, 0.0, 0.0]), &json!(1.0)),
        ]);

        assert_eq!(ids(&result), ["new", "mid", "old"]);
        assert!(result.events.windows(2).all(|w| w[0].time >= w[1].time));
    }

    #[test]
    fn test_missing_magnitude_is_none() {
        let mut f = feature("a", 1000, &json!([0.0, 0.0, 0.0]), &Value::Null);
        let result = normalize_features(core::slice::from_ref(&f));
        assert_eq!(result.events[0].mag, None);

        let _ = f["properties"].as_object_mut().unwrap().remove("mag");
        let result = normalize_features(&[f]);
        assert_eq!(result.events[0].mag, None);
    }

    #[test]
    fn test_zero_and_negative_magnitudes_are_data() {
        let result = normalize_features(&[
            feature("zero", 2000, &json!([0.0, 0.0, 0.0]), &json!(0.0)),
            feature("neg", 1000, &json!([0.0, 0.0, 0.0]), &json!(-0.8)),
        ]);
        assert_eq!(result.events[0].mag, Some(0.0));
        assert_eq!(result.events[1].mag, Some(-0.8));
    }

    #[test]
    fn test_negative_depth_is_kept() {
        let result = normalize_features(&[feature("a", 1000, &json!([0.0, 0.0, -1.5]), &json!(1.0))]);
        assert!((result.events[0].depth_km - -1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_integer_coordinates_are_accepted() {
        let result = normalize_features(&[feature("a", 1000, &json!([10, -20, 5]), &json!(3))]);
        assert_eq!(result.skipped, 0);
        assert!((result.events[0].longitude - 10.0).abs() < f64::EPSILON);
        assert_eq!(result.events[0].mag, Some(3.0));
    }

    #[test]
    fn test_null_position_is_dropped_but_not_counted() {
        let result = normalize_features(&[
            feature("a", 1000, &json!([null, 2.0, 3.0]), &json!(1.0)),
            feature("b", 2000, &json!([1.0, null, 3.0]), &json!(1.0)),
            feature("c", 3000, &json!([1.0, 2.0, 3.0]), &json!(1.0)),
        ]);

        assert_eq!(ids(&result), ["c"]);
        assert_eq!(result.skipped, 0);
    }

    #[test]
    fn test_wrong_types_are_skipped() {
        let result = normalize_features(&[
            feature("lon", 1000, &json!(["x", 2.0, 3.0]), &json!(1.0)),
            feature("depth", 1000, &json!([1.0, 2.0, null]), &json!(1.0)),
            feature("mag", 1000, &json!([1.0, 2.0, 3.0]), &json!("big")),
            feature("ok", 1000, &json!([1.0, 2.0, 3.0]), &json!(1.0)),
        ]);

        assert_eq!(ids(&result), ["ok"]);
        assert_eq!(result.skipped, 3);
    }

    #[test]
    fn test_missing_structure_is_skipped() {
        let result = normalize_features(&[
            json!("not a feature"),
            json!({ "id": "no-props", "geometry": { "coordinates": [1.0, 2.0, 3.0] } }),
            json!({ "id": "no-geom", "properties": { "time": 1000 } }),
            json!({ "id": "null-props", "properties": null, "geometry": { "coordinates": [1.0, 2.0, 3.0] } }),
            json!({ "id": "no-coords", "properties": { "time": 1000 }, "geometry": {} }),
            json!({ "id": "no-time", "properties": {}, "geometry": { "coordinates": [1.0, 2.0, 3.0] } }),
        ]);

        assert!(result.events.is_empty());
        assert_eq!(result.skipped, 6);
    }

    #[test]
    fn test_optional_strings_may_be_absent() {
        let result = normalize_features(&[json!({
            "properties": { "time": 1000 },
            "geometry": { "coordinates": [1.0, 2.0, 3.0] }
        })]);

        let event = &result.events[0];
        assert_eq!(event.event_id, None);
        assert_eq!(event.place, None);
        assert_eq!(event.url, None);
        assert_eq!(event.mag, None);
    }

    #[test]
    fn test_numeric_id_is_rendered() {
        let result = normalize_features(&[json!({
            "id": 42,
            "properties": { "time": 1000 },
            "geometry": { "coordinates": [1.0, 2.0, 3.0] }
        })]);
        assert_eq!(result.events[0].event_id.as_deref(), Some("42"));
    }

    #[test]
    fn test_fractional_time_is_truncated_to_millis() {
        let result = normalize_features(&[json!({
            "properties": { "time": 1500.75 },
            "geometry": { "coordinates": [1.0, 2.0, 3.0] }
        })]);
        assert_eq!(result.events[0].time, DateTime::from_timestamp_millis(1500).unwrap());
    }

    #[test]
    fn test_malformed_feature_reason() {
        let err = extract_feature(&feature("a", 1000, &json!([1.0, 2.0]), &json!(1.0))).unwrap_err();
        assert_eq!(err.reason(), "coordinates list has 2 items, expected 3");
        assert_eq!(err.to_string(), err.reason());
    }
}
