//! Percent-encoding with the semantics of the ECMAScript URI functions.
//!
//! The wire format is produced and consumed by browsers, so the escaping
//! sets have to match `encodeURIComponent`, `decodeURIComponent` and
//! `decodeURI` exactly. Unlike the lenient decoding of the
//! `percent-encoding` crate, malformed escapes are errors here.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::QueryStringError;

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Escapes of these bytes survive `decodeURI`.
const URI_RESERVED: &[u8] = b";/?:@&=+$,#";

/// Percent-encodes `input` like `encodeURIComponent`.
///
/// ```
/// use json_joy_query_string::encode_uri_component;
///
/// assert_eq!(encode_uri_component("a b&c"), "a%20b%26c");
/// assert_eq!(encode_uri_component("(ok)!"), "(ok)!");
/// ```
pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// Decodes every escape in `input`, like `decodeURIComponent`.
pub fn decode_uri_component(input: &str) -> Result<String, QueryStringError> {
    validate_escapes(input)?;
    decode_chunk(input, input)
}

/// Decodes escapes in `input` except those of reserved URI characters, like
/// `decodeURI`. `%3D` stays `%3D`, `%20` becomes a space.
pub fn decode_uri(input: &str) -> Result<String, QueryStringError> {
    validate_escapes(input)?;
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        let byte = (hex_value(bytes[i + 1]) << 4) | hex_value(bytes[i + 2]);
        if URI_RESERVED.contains(&byte) {
            out.push_str(&decode_chunk(&input[start..i], input)?);
            out.push_str(&input[i..i + 3]);
            start = i + 3;
        }
        i += 3;
    }
    out.push_str(&decode_chunk(&input[start..], input)?);
    Ok(out)
}

fn decode_chunk(chunk: &str, input: &str) -> Result<String, QueryStringError> {
    percent_decode_str(chunk)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| mismatch(input))
}

/// Every `%` must be followed by two hex digits.
fn validate_escapes(input: &str) -> Result<(), QueryStringError> {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let well_formed = i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !well_formed {
                return Err(mismatch(input));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

fn mismatch(input: &str) -> QueryStringError {
    QueryStringError::EncodingMismatch {
        input: input.to_owned(),
    }
}
