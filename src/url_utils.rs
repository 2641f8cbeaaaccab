//! URL validation and link resolution.

use url::Url;

/// Schemes a browser leaves untouched when reading `a.href`.
const OPAQUE_PREFIXES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Check if a string is a valid absolute http(s) URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Parse a fetchable page URL, explaining why it is rejected.
///
/// # Errors
/// Returns a human-readable reason when `s` is not an absolute http(s) URL
/// with a host.
pub fn parse_page_url(s: &str) -> Result<Url, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("empty URL".to_string());
    }
    let url = Url::parse(trimmed).map_err(|e| e.to_string())?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!("unsupported scheme {:?}", url.scheme()));
    }
    if url.host().is_none() {
        return Err("missing host".to_string());
    }
    Ok(url)
}

/// Resolve an `href` the way a browser's `a.href` does.
///
/// Absolute URLs are returned as-is, relative ones are joined onto `base`,
/// and opaque schemes (`javascript:`, `mailto:`, ...) are kept verbatim.
/// A blank `href` points at the base itself, without its fragment.
/// Without a usable base the trimmed input is returned.
#[must_use]
pub fn resolve_href(href: &str, base: Option<&Url>) -> String {
    let href = href.trim();

    let lower = href.to_ascii_lowercase();
    if OPAQUE_PREFIXES.iter().any(|prefix| lower.starts_with(prefix)) {
        return href.to_string();
    }

    let (is_abs, _) = is_absolute_url(href);
    if is_abs {
        return href.to_string();
    }

    base.and_then(|base| base.join(href).ok())
        .map_or_else(|| href.to_string(), |resolved| resolved.to_string())
}
