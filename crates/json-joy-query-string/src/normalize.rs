//! The shape a value takes after an encode/decode round trip.

use serde_json::{Map, Value};

use crate::encoder::scalar_to_string;
use crate::options::NullPolicy;

/// Rewrite `value` into what decoding its encoding yields.
///
/// Scalar leaves become strings, leaves the encoder skips disappear, empty
/// containers disappear, and holes left inside arrays become `{}`
/// placeholders. A scalar root decodes under the empty key.
///
/// ```
/// use json_joy_query_string::{normalize, NullPolicy};
/// use serde_json::json;
///
/// let value = json!({"id": 7, "tags": [null, "x", null], "meta": {}});
/// assert_eq!(
///     normalize(&value, NullPolicy::Skip),
///     json!({"id": "7", "tags": [{}, "x"]})
/// );
/// ```
pub fn normalize(value: &Value, nulls: NullPolicy) -> Value {
    match value {
        Value::Array(_) | Value::Object(_) => {
            normalize_node(value, nulls).unwrap_or_else(|| Value::Object(Map::new()))
        }
        scalar => {
            let mut root = Map::new();
            if let Some(text) = scalar_to_string(scalar, nulls) {
                root.insert(String::new(), Value::String(text));
            }
            Value::Object(root)
        }
    }
}

/// `None` when the value contributes no entries.
fn normalize_node(value: &Value, nulls: NullPolicy) -> Option<Value> {
    match value {
        Value::Array(items) => {
            let mut out: Vec<Option<Value>> =
                items.iter().map(|item| normalize_node(item, nulls)).collect();
            while matches!(out.last(), Some(None)) {
                out.pop();
            }
            if out.is_empty() {
                return None;
            }
            Some(Value::Array(
                out.into_iter()
                    .map(|item| item.unwrap_or_else(|| Value::Object(Map::new())))
                    .collect(),
            ))
        }
        Value::Object(map) => {
            let out: Map<String, Value> = map
                .iter()
                .filter_map(|(key, item)| normalize_node(item, nulls).map(|v| (key.clone(), v)))
                .collect();
            (!out.is_empty()).then_some(Value::Object(out))
        }
        scalar => scalar_to_string(scalar, nulls).map(Value::String),
    }
}
