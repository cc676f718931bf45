//! Query string codec error type.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryStringError {
    /// Bracket content that is not a non-negative integer, an unclosed `[`,
    /// or an index above the configured maximum. `fragment` is the offending
    /// `key=value` fragment, or the bare path key when parsed on its own.
    #[error("invalid array index `{index}` in `{fragment}`")]
    InvalidIndex { fragment: String, index: String },
    /// Input that is not valid percent-encoded UTF-8.
    #[error("malformed percent-encoding in `{input}`")]
    EncodingMismatch { input: String },
    /// A path key that addresses an existing value with the wrong shape,
    /// e.g. `a:b` after `a[0]`, or `a:b` after `a=1`.
    #[error("path key `{path}` in `{fragment}` conflicts with an existing value")]
    PathConflict { fragment: String, path: String },
    /// Sparse indices padded more placeholder slots than one decode allows.
    #[error("`{fragment}` exceeds the limit of {limit} placeholder slots")]
    PlaceholderLimit { fragment: String, limit: usize },
}
