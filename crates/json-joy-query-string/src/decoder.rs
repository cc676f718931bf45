//! Query string to structured value.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::options::DecodeOptions;
use crate::path::{parse_path_key, PathSegment};
use crate::percent::{decode_uri, decode_uri_component};
use crate::QueryStringError;

/// Query string decoder.
///
/// Fragments are folded in order into one root object. Leaves always decode
/// as strings; a later fragment for the same path key overwrites an earlier
/// one.
///
/// ```
/// use json_joy_query_string::{DecodeOptions, QueryStringDecoder};
/// use serde_json::json;
///
/// let decoder = QueryStringDecoder::new(DecodeOptions::new().with_double_decode(false));
/// let value = decoder.decode("tags[0]=a&tags[1]=b").unwrap();
/// assert_eq!(value, json!({"tags": ["a", "b"]}));
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryStringDecoder {
    options: DecodeOptions,
}

impl QueryStringDecoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn decode(&self, query: &str) -> Result<Value, QueryStringError> {
        let query = if self.options.double_decode {
            decode_uri(query)?
        } else {
            query.to_owned()
        };
        let mut budget = self.options.max_placeholders;
        decode_uri_component(&query)?
            .split('&')
            .try_fold(Value::Object(Map::new()), |mut root, fragment| {
                self.apply_fragment(&mut root, fragment, &mut budget)?;
                Ok::<_, QueryStringError>(root)
            })
    }

    fn apply_fragment(
        &self,
        root: &mut Value,
        fragment: &str,
        budget: &mut usize,
    ) -> Result<(), QueryStringError> {
        if fragment.is_empty() {
            debug!("skipping empty query fragment");
            return Ok(());
        }
        let fragment = decode_uri(fragment)?;
        let (raw_key, raw_value) = match fragment.split_once('=') {
            Some(pair) => pair,
            None => {
                debug!(fragment = %fragment, "query fragment has no `=`, using empty value");
                (fragment.as_str(), "")
            }
        };
        let key = decode_uri_component(raw_key)?;
        let value = decode_uri_component(raw_value)?;
        let path = parse_path_key(&key).map_err(|err| match err {
            QueryStringError::InvalidIndex { index, .. } => QueryStringError::InvalidIndex {
                fragment: fragment.clone(),
                index,
            },
            other => other,
        })?;
        if let Some(index) = path.iter().find_map(|segment| match segment {
            PathSegment::Index(i) if *i > self.options.max_index => Some(*i),
            _ => None,
        }) {
            return Err(QueryStringError::InvalidIndex {
                fragment,
                index: index.to_string(),
            });
        }
        trace!(key = %key, depth = path.len(), "assigning query fragment");
        assign(root, &path, Value::String(value), budget).map_err(|failure| match failure {
            AssignFailure::Conflict => QueryStringError::PathConflict {
                fragment,
                path: key,
            },
            AssignFailure::IndexOverflow(index) => QueryStringError::InvalidIndex {
                fragment,
                index: index.to_string(),
            },
            AssignFailure::PlaceholderLimit => QueryStringError::PlaceholderLimit {
                fragment,
                limit: self.options.max_placeholders,
            },
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssignFailure {
    /// The path addresses a value of the wrong shape.
    Conflict,
    /// The array length for this index does not fit `usize`.
    IndexOverflow(usize),
    PlaceholderLimit,
}

/// Walk `path` from `root`, creating placeholders on the way, and store
/// `value` at the end. Padding draws from `budget`.
fn assign(
    root: &mut Value,
    path: &[PathSegment],
    value: Value,
    budget: &mut usize,
) -> Result<(), AssignFailure> {
    let Some((last, parents)) = path.split_last() else {
        return Ok(());
    };
    let mut node = root;
    for segment in parents {
        node = match segment {
            PathSegment::Key(key) => as_object(node)?
                .entry(key.clone())
                .or_insert_with(placeholder),
            PathSegment::Index(index) => {
                let items = as_array(node)?;
                pad(items, *index, budget)?;
                &mut items[*index]
            }
        };
    }
    match last {
        PathSegment::Key(key) => {
            as_object(node)?.insert(key.clone(), value);
        }
        PathSegment::Index(index) => {
            let items = as_array(node)?;
            pad(items, *index, budget)?;
            items[*index] = value;
        }
    }
    Ok(())
}

fn placeholder() -> Value {
    Value::Object(Map::new())
}

fn is_placeholder(node: &Value) -> bool {
    matches!(node, Value::Object(map) if map.is_empty())
}

fn as_object(node: &mut Value) -> Result<&mut Map<String, Value>, AssignFailure> {
    match node {
        Value::Object(map) => Ok(map),
        _ => Err(AssignFailure::Conflict),
    }
}

/// A placeholder takes the array shape on its first index access.
fn as_array(node: &mut Value) -> Result<&mut Vec<Value>, AssignFailure> {
    if is_placeholder(node) {
        *node = Value::Array(Vec::new());
    }
    match node {
        Value::Array(items) => Ok(items),
        _ => Err(AssignFailure::Conflict),
    }
}

/// Grow `items` so that `index` is in bounds. Only the holes below `index`
/// count against `budget`; appending at the end is free.
fn pad(items: &mut Vec<Value>, index: usize, budget: &mut usize) -> Result<(), AssignFailure> {
    if index < items.len() {
        return Ok(());
    }
    let len = index
        .checked_add(1)
        .ok_or(AssignFailure::IndexOverflow(index))?;
    let holes = index - items.len();
    if holes > *budget {
        return Err(AssignFailure::PlaceholderLimit);
    }
    *budget -= holes;
    items.resize_with(len, placeholder);
    Ok(())
}
