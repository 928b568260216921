//! Percent-encoding for Atlas path segments.
//!
//! Database, collection and index names are user-chosen and end up inside
//! the request path, so each one is encoded as a single segment.

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters that must be percent-encoded in a path segment.
///
/// RFC 3986 reserved and unsafe characters, plus `%` so already-encoded
/// input is not decoded twice and `/` so a name cannot add path levels.
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'[')
    .add(b']');

/// Percent-encode a string for use as one URL path segment.
///
/// ```
/// use workshop_client::endpoints::url_encoding::encode_path_segment;
///
/// assert_eq!(encode_path_segment("sample_mflix"), "sample_mflix");
/// assert_eq!(encode_path_segment("my index"), "my%20index");
/// assert_eq!(encode_path_segment("a/b"), "a%2Fb");
/// ```
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_unchanged() {
        assert_eq!(encode_path_segment("vector_index"), "vector_index");
        assert_eq!(encode_path_segment("sample-mflix.v2"), "sample-mflix.v2");
    }

    #[test]
    fn test_slash_cannot_add_path_levels() {
        assert_eq!(encode_path_segment("../admin"), "..%2Fadmin");
    }

    #[test]
    fn test_percent_is_double_encoded() {
        assert_eq!(encode_path_segment("idx%20"), "idx%2520");
    }

    #[test]
    fn test_query_and_fragment_markers() {
        assert_eq!(encode_path_segment("idx?x=1#y"), "idx%3Fx=1%23y");
    }

    #[test]
    fn test_unicode_is_utf8_encoded() {
        assert_eq!(encode_path_segment("caf\u{00e9}"), "caf%C3%A9");
    }
}
