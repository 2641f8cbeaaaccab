//! Character encoding detection and transcoding of static response bodies.
//!
//! The `Content-Type` response header wins; otherwise the charset declared in
//! the document head is used, and UTF-8 is the default.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("valid regex")
});

/// Match the `charset=` parameter of a MIME type
#[allow(clippy::expect_used)]
static MIME_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i);\s*charset\s*=\s*["']?([^"'\s;]+)"#).expect("valid regex")
});

/// Number of leading bytes scanned for a `<meta>` charset declaration.
const SNIFF_LEN: usize = 1024;

/// Encoding named by the `charset` parameter of a `Content-Type` value.
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    MIME_CHARSET_RE
        .captures(content_type)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
}

/// Detect character encoding from HTML bytes.
///
/// Looks at `<meta charset>` and `<meta http-equiv="Content-Type">` in the
/// first 1024 bytes and defaults to UTF-8.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = &html[..html.len().min(SNIFF_LEN)];
    let head_str = String::from_utf8_lossy(head);

    CHARSET_META_RE
        .captures(&head_str)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode a response body to a UTF-8 string.
///
/// Invalid sequences are replaced with U+FFFD rather than failing.
#[must_use]
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(charset_from_content_type)
        .unwrap_or_else(|| detect_encoding(body));

    if encoding == UTF_8 {
        return String::from_utf8_lossy(body).into_owned();
    }

    let (decoded, _encoding_used, _had_errors) = encoding.decode(body);
    decoded.into_owned()
}

/// Whether a `Content-Type` value describes something the HTML parser can use.
///
/// A missing header is accepted; servers omit it often enough.
#[must_use]
pub fn is_markup_content_type(content_type: Option<&str>) -> bool {
    let Some(value) = content_type else {
        return true;
    };
    let mime = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    mime.is_empty()
        || mime == "text/html"
        || mime == "text/plain"
        || mime == "application/xhtml+xml"
        || mime.ends_with("/xml")
        || mime.ends_with("+xml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_utf8_from_meta_charset() {
        let html = br#"<html><head><meta charset="utf-8"></head><body>Test</body></html>"#;
        assert_eq!(detect_encoding(html), UTF_8);
    }

    #[test]
    fn detect_iso88591_from_meta_charset() {
        let html = br#"<html><head><meta charset="ISO-8859-1"></head><body>Test</body></html>"#;
        // encoding_rs maps ISO-8859-1 to windows-1252 per WHATWG
        assert_eq!(detect_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn detect_charset_from_http_equiv() {
        let html = br#"<html><head><meta http-equiv="Content-Type" content="text/html; charset=ISO-8859-1"></head><body>Test</body></html>"#;
        assert_eq!(detect_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn default_to_utf8_when_no_charset() {
        assert_eq!(detect_encoding(b"<html><body>Test</body></html>"), UTF_8);
    }

    #[test]
    fn header_charset_parsed() {
        let enc = charset_from_content_type("text/html; charset=Shift_JIS");
        assert_eq!(enc.map(Encoding::name), Some("Shift_JIS"));
        assert!(charset_from_content_type("text/html").is_none());
        assert!(charset_from_content_type("text/html; charset=\"utf-8\"").is_some());
    }

    #[test]
    fn header_charset_wins_over_meta() {
        let body = b"<html><head><meta charset=\"utf-8\"></head><body>Caf\xE9</body></html>";
        let decoded = decode_body(body, Some("text/html; charset=iso-8859-1"));
        assert!(decoded.contains("Café"));
    }

    #[test]
    fn meta_charset_used_without_header_charset() {
        let body = b"<html><head><meta charset=\"windows-1252\"></head><body>\x93Hello\x94</body></html>";
        let decoded = decode_body(body, Some("text/html"));
        assert!(decoded.contains("\u{201C}Hello\u{201D}"));
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let decoded = decode_body(b"<html><body>Test \xFF\xFE Invalid</body></html>", None);
        assert!(decoded.contains("Test"));
        assert!(decoded.contains('\u{FFFD}'));
    }

    #[test]
    fn markup_content_types() {
        assert!(is_markup_content_type(None));
        assert!(is_markup_content_type(Some("text/html; charset=utf-8")));
        assert!(is_markup_content_type(Some("application/xhtml+xml")));
        assert!(is_markup_content_type(Some("TEXT/HTML")));
        assert!(!is_markup_content_type(Some("application/pdf")));
        assert!(!is_markup_content_type(Some("image/png")));
        assert!(!is_markup_content_type(Some("application/json")));
    }
}
