//! Structured value to query string.

use serde_json::{Number, Value};
use tracing::debug;

use crate::options::{EncodeOptions, NullPolicy};
use crate::path::{child_index_path, child_key_path};
use crate::percent::encode_uri_component;

/// Query string encoder.
///
/// Walks the value depth-first and emits one `path=value` entry per scalar
/// leaf, with the leaf value percent-encoded. With
/// [`EncodeOptions::percent_encode`] set, the entries below each top-level
/// member are joined and percent-encoded once more as a group.
///
/// ```
/// use json_joy_query_string::{EncodeOptions, QueryStringEncoder};
/// use serde_json::json;
///
/// let encoder = QueryStringEncoder::new(EncodeOptions::new().with_percent_encode(false));
/// let out = encoder.encode(&json!({"user": {"name": "Ann Lee", "id": 7}}));
/// assert_eq!(out, "user:name=Ann%20Lee&user:id=7");
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryStringEncoder {
    options: EncodeOptions,
}

impl QueryStringEncoder {
    pub fn new(options: EncodeOptions) -> Self {
        Self { options }
    }

    pub fn encode(&self, value: &Value) -> String {
        let prefix = self.options.prefix.as_str();
        let groups: Vec<String> = match value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .filter_map(|(i, item)| self.encode_group(item, &child_index_path(prefix, i)))
                .collect(),
            Value::Object(map) => map
                .iter()
                .filter_map(|(key, item)| self.encode_group(item, &child_key_path(prefix, key)))
                .collect(),
            scalar => self.encode_group(scalar, prefix).into_iter().collect(),
        };
        groups.join("&")
    }

    /// Entries of one top-level member, joined and optionally encoded again.
    fn encode_group(&self, value: &Value, path: &str) -> Option<String> {
        let mut entries = Vec::new();
        self.write_entries(value, path, &mut entries);
        if entries.is_empty() {
            return None;
        }
        let group = entries.join("&");
        if self.options.percent_encode {
            Some(encode_uri_component(&group))
        } else {
            Some(group)
        }
    }

    fn write_entries(&self, value: &Value, path: &str, out: &mut Vec<String>) {
        match value {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    self.write_entries(item, &child_index_path(path, i), out);
                }
            }
            Value::Object(map) => {
                for (key, item) in map {
                    self.write_entries(item, &child_key_path(path, key), out);
                }
            }
            scalar => match scalar_to_string(scalar, self.options.nulls) {
                Some(text) => out.push(format!("{path}={}", encode_uri_component(&text))),
                None => {
                    debug!(path, "skipping null leaf");
                }
            },
        }
    }
}

/// String form of a scalar leaf, following JavaScript string coercion.
///
/// Returns `None` for containers and for `null` under [`NullPolicy::Skip`].
pub(crate) fn scalar_to_string(value: &Value, nulls: NullPolicy) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(number_to_string(n)),
        Value::Null => match nulls {
            NullPolicy::Skip => None,
            NullPolicy::Literal => Some("null".to_owned()),
        },
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Floats print as `Number.prototype.toString` does: `1.0` is `1`, `1e21`
/// is `1e+21`.
fn number_to_string(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) => ryu_js::Buffer::new().format(f).to_owned(),
        None => n.to_string(),
    }
}
