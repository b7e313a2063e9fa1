use serde_json::{Map, Value};
use thiserror::Error;

/// Field holding the feature array of a GeoJSON `FeatureCollection`.
pub const FEATURES_KEY: &str = "features";

/// Why a parsed document was rejected as a feed payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("'features' key is missing")]
    MissingFeatures,

    #[error("'features' must be an array, found {0}")]
    FeaturesNotAnArray(&'static str),
}

/// A feed body that passed the shape check: a JSON object with a `features` array.
///
/// Individual features are not validated until normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFeedPayload {
    root: Map<String, Value>,
}

impl RawFeedPayload {
    /// Check the minimal feed shape and wrap the parsed document.
    ///
    /// Fails when the document is not an object holding a `features` array.
    pub fn from_value(value: Value) -> Result<Self, PayloadError> {
        let Value::Object(root) = value else {
            return Err(PayloadError::NotAnObject(json_kind(&value)));
        };

        match root.get(FEATURES_KEY) {
            Some(Value::Array(_)) => Ok(Self { root }),
            Some(other) => Err(PayloadError::FeaturesNotAnArray(json_kind(other))),
            None => Err(PayloadError::MissingFeatures),
        }
    }

    /// The raw feature records, in feed order.
    #[must_use]
    pub fn features(&self) -> &[Value] {
        self.root
            .get(FEATURES_KEY)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Access any other top-level field (e.g. `metadata`).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }
}

/// Short description of a JSON value's type for diagnostics.
pub(crate) const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
