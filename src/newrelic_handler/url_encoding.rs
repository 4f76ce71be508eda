//! Percent-encoding for credentials placed in the request query string.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters to percent-encode in URL query values.
///
/// This encodes all control characters plus characters with special meaning in
/// URLs (query separators, reserved characters), while leaving unreserved
/// characters (alphanumeric, `-`, `_`, `.`, `~`) as-is per RFC 3986.
const QUERY_VALUE_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'$')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b',')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}')
    .add(b'\'');

/// Percent-encode a query value. Spaces become `%20`.
pub(super) fn encode_query_value(s: &str) -> String {
    utf8_percent_encode(s, QUERY_VALUE_ENCODE_SET).to_string()
}
