//! Path-encoded query string codec.
//!
//! Encodes a JSON value into a flat `key=value&...` string whose keys locate
//! each leaf with `:` for object members and `[i]` for array elements, and
//! decodes such strings back into nested values.
//!
//! By default the encoder applies two percent-encoding layers (once per leaf
//! value, once per top-level group) and the decoder undoes both. Decoded
//! leaves are always strings.
//!
//! # Example
//!
//! ```
//! use json_joy_query_string::{decode, encode};
//! use serde_json::json;
//!
//! let value = json!({"user": {"name": "Ann Lee", "tags": ["a", "b"]}});
//! let query = encode(&value);
//! assert_eq!(
//!     query,
//!     "user%3Aname%3DAnn%2520Lee%26user%3Atags%5B0%5D%3Da%26user%3Atags%5B1%5D%3Db"
//! );
//! assert_eq!(decode(&query).unwrap(), value);
//! ```

mod decoder;
mod encoder;
mod error;
mod normalize;
mod options;
mod path;
mod percent;

use serde_json::Value;

pub use decoder::QueryStringDecoder;
pub use encoder::QueryStringEncoder;
pub use error::QueryStringError;
pub use normalize::normalize;
pub use options::{
    DecodeOptions, EncodeOptions, NullPolicy, DEFAULT_MAX_INDEX, DEFAULT_MAX_PLACEHOLDERS,
};
pub use path::{child_index_path, child_key_path, format_path_key, parse_path_key, PathSegment};
pub use percent::{decode_uri, decode_uri_component, encode_uri_component};

/// Encode with default options: double percent-encoding, no prefix, nulls
/// skipped.
pub fn encode(value: &Value) -> String {
    QueryStringEncoder::default().encode(value)
}

pub fn encode_with(value: &Value, options: &EncodeOptions) -> String {
    QueryStringEncoder::new(options.clone()).encode(value)
}

/// Decode with default options: double decoding.
///
/// # Errors
///
/// See [`QueryStringError`].
pub fn decode(query: &str) -> Result<Value, QueryStringError> {
    QueryStringDecoder::default().decode(query)
}

pub fn decode_with(query: &str, options: &DecodeOptions) -> Result<Value, QueryStringError> {
    QueryStringDecoder::new(options.clone()).decode(query)
}
