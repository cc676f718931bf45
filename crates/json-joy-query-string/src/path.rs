//! Path keys: `a:b[0]c` style locations inside a structured value.
//!
//! A path key is a sequence of segments. Object members are joined with `:`
//! and array indices are written as `[i]`. No `:` is written directly after
//! a `]`, but the parser accepts one there.

use crate::QueryStringError;

/// One step of a path key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object member access.
    Key(String),
    /// Array element access.
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_owned())
    }
}

/// Appends an object member to a path key.
///
/// The `:` separator is omitted at the root and after an index.
///
/// ```
/// use json_joy_query_string::child_key_path;
///
/// assert_eq!(child_key_path("", "a"), "a");
/// assert_eq!(child_key_path("a", "b"), "a:b");
/// assert_eq!(child_key_path("a[0]", "b"), "a[0]b");
/// ```
pub fn child_key_path(prefix: &str, key: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + key.len() + 1);
    out.push_str(prefix);
    if !prefix.is_empty() && !prefix.ends_with(']') {
        out.push(':');
    }
    out.push_str(key);
    out
}

/// Appends an array index to a path key.
pub fn child_index_path(prefix: &str, index: usize) -> String {
    format!("{prefix}[{index}]")
}

/// Format segments into a path key, as the encoder writes them.
///
/// ```
/// use json_joy_query_string::{format_path_key, PathSegment};
///
/// let path = [PathSegment::from("a"), PathSegment::Index(0), PathSegment::from("b")];
/// assert_eq!(format_path_key(&path), "a[0]b");
/// assert_eq!(format_path_key(&[]), "");
/// ```
pub fn format_path_key(path: &[PathSegment]) -> String {
    path.iter().fold(String::new(), |prefix, segment| match segment {
        PathSegment::Key(key) => child_key_path(&prefix, key),
        PathSegment::Index(index) => child_index_path(&prefix, *index),
    })
}

/// Parse a path key into segments.
///
/// Scans left to right; whichever of `:` and `[` comes next decides between
/// member and index access. An empty name before `:` is only a separator, and
/// an empty name before `[` indexes the current container. The empty key
/// parses as a single empty member name.
///
/// # Errors
///
/// [`QueryStringError::InvalidIndex`] if a `[` is not closed or the bracket
/// content is not a non-negative integer.
///
/// ```
/// use json_joy_query_string::{parse_path_key, PathSegment};
///
/// let expected = vec![
///     PathSegment::from("a"),
///     PathSegment::Index(0),
///     PathSegment::from("b"),
/// ];
/// assert_eq!(parse_path_key("a[0]:b").unwrap(), expected);
/// assert_eq!(parse_path_key("a[0]b").unwrap(), expected);
/// assert!(parse_path_key("a[x]").is_err());
/// ```
pub fn parse_path_key(key: &str) -> Result<Vec<PathSegment>, QueryStringError> {
    let mut segments = Vec::new();
    let mut rest = key;
    while !rest.is_empty() {
        let colon = rest.find(':');
        let bracket = rest.find('[');
        match (colon, bracket) {
            (Some(c), b) if b.map_or(true, |b| c < b) => {
                let name = &rest[..c];
                if !name.is_empty() {
                    segments.push(PathSegment::Key(name.to_owned()));
                }
                rest = &rest[c + 1..];
            }
            (_, Some(b)) => {
                let name = &rest[..b];
                let close = rest[b..].find(']').map(|offset| b + offset);
                let Some(close) = close else {
                    return Err(invalid_index(key, &rest[b + 1..]));
                };
                let content = &rest[b + 1..close];
                let index = parse_index(content).ok_or_else(|| invalid_index(key, content))?;
                if !name.is_empty() {
                    segments.push(PathSegment::Key(name.to_owned()));
                }
                segments.push(PathSegment::Index(index));
                rest = &rest[close + 1..];
            }
            _ => {
                segments.push(PathSegment::Key(rest.to_owned()));
                rest = "";
            }
        }
    }
    if segments.is_empty() {
        segments.push(PathSegment::Key(String::new()));
    }
    Ok(segments)
}

/// Digits only; leading zeros are accepted.
fn parse_index(content: &str) -> Option<usize> {
    if content.is_empty() || !content.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    content.parse().ok()
}

fn invalid_index(key: &str, index: &str) -> QueryStringError {
    QueryStringError::InvalidIndex {
        fragment: key.to_owned(),
        index: index.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> PathSegment {
        PathSegment::Key(name.to_owned())
    }

    fn idx(index: usize) -> PathSegment {
        PathSegment::Index(index)
    }

    #[test]
    fn test_child_paths() {
        assert_eq!(child_key_path("", ""), "");
        assert_eq!(child_key_path("user", "name"), "user:name");
        assert_eq!(child_key_path("tags[1]", "id"), "tags[1]id");
        assert_eq!(child_index_path("", 0), "[0]");
        assert_eq!(child_index_path("a:b", 12), "a:b[12]");
        assert_eq!(child_index_path("a[0]", 3), "a[0][3]");
    }

    #[test]
    fn test_parse_plain_and_nested_members() {
        assert_eq!(parse_path_key("a").unwrap(), vec![key("a")]);
        assert_eq!(parse_path_key("a:b:c").unwrap(), vec![key("a"), key("b"), key("c")]);
        // trailing separator adds nothing
        assert_eq!(parse_path_key("a:").unwrap(), vec![key("a")]);
    }

    #[test]
    fn test_parse_root_key() {
        assert_eq!(parse_path_key("").unwrap(), vec![key("")]);
        assert_eq!(parse_path_key(":").unwrap(), vec![key("")]);
    }

    #[test]
    fn test_parse_indices() {
        assert_eq!(parse_path_key("a[2]").unwrap(), vec![key("a"), idx(2)]);
        assert_eq!(parse_path_key("[0]").unwrap(), vec![idx(0)]);
        assert_eq!(
            parse_path_key("a[0][1]").unwrap(),
            vec![key("a"), idx(0), idx(1)]
        );
        assert_eq!(parse_path_key("a[007]").unwrap(), vec![key("a"), idx(7)]);
    }

    #[test]
    fn test_parse_separator_precedence() {
        assert_eq!(
            parse_path_key("a:b[0]:c").unwrap(),
            vec![key("a"), key("b"), idx(0), key("c")]
        );
        assert_eq!(
            parse_path_key("a:b[0]c").unwrap(),
            vec![key("a"), key("b"), idx(0), key("c")]
        );
        // `]` without `[` is part of a name
        assert_eq!(parse_path_key("x]y").unwrap(), vec![key("x]y")]);
    }

    #[test]
    fn test_parse_invalid_indices() {
        for (input, index) in [
            ("a[]", ""),
            ("a[-1]", "-1"),
            ("a[1.5]", "1.5"),
            ("a[b]", "b"),
            ("a[0", "0"),
            ("a[99999999999999999999999]", "99999999999999999999999"),
        ] {
            assert_eq!(
                parse_path_key(input),
                Err(QueryStringError::InvalidIndex {
                    fragment: input.to_owned(),
                    index: index.to_owned(),
                }),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_format_parse_roundtrip() {
        let keys = ["a", "a:b", "a[0]", "a[0]b", "a:b[3][4]c:d", "[0]", "[1]x"];
        for input in keys {
            let path = parse_path_key(input).unwrap();
            assert_eq!(format_path_key(&path), input, "failed roundtrip for {input:?}");
        }
    }
}
