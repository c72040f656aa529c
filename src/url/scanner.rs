use regex::bytes::{Matches, Regex};
use std::sync::LazyLock;

/// Scheme-qualified URL pattern.
///
/// Requires a literal `http://` or `https://` followed by at least one
/// character from the unreserved/reserved URL set. Every byte the pattern can
/// match is ASCII, so matching on raw bytes is equivalent to matching on the
/// single-byte decoded text.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://[A-Za-z0-9\-._~:/?#\[\]@!$&'()*+,;=%]+")
        .expect("URL pattern is a valid regex")
});

/// Non-overlapping, left-to-right iterator over URL-like substrings of a
/// byte buffer.
///
/// Each match is as long as possible and scanning resumes right after its
/// end. Arbitrary binary input never fails: bytes are mapped one-to-one to
/// characters (ISO-8859-1), so a match is always representable.
pub struct UrlMatches<'h> {
    inner: Matches<'static, 'h>,
}

impl<'h> UrlMatches<'h> {
    /// Starts a scan over `haystack`
    pub fn new(haystack: &'h [u8]) -> Self {
        Self {
            inner: URL_PATTERN.find_iter(haystack),
        }
    }
}

impl Iterator for UrlMatches<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|m| decode_latin1(m.as_bytes()))
    }
}

/// Extracts every URL-like substring from a byte buffer
///
/// # Examples
///
/// ```
/// use apk_sieve::url::scan_bytes;
///
/// let bytes = b"\x00\x13https://api.example.com/v1/items\x00junk";
/// assert_eq!(scan_bytes(bytes), vec!["https://api.example.com/v1/items"]);
/// ```
pub fn scan_bytes(bytes: &[u8]) -> Vec<String> {
    UrlMatches::new(bytes).collect()
}

/// Decodes bytes with a single-byte-per-character mapping (ISO-8859-1)
///
/// Never fails; every byte value maps to the code point of the same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
