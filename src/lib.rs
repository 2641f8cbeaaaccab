//! # seo-scout
//!
//! Adaptive page fetching and SEO structure extraction.
//!
//! Given a URL, seo-scout obtains the page's HTML (a plain HTTP fetch first,
//! a headless browser when the page needs scripts or the fetch fails) and
//! reads it into a flat [`ExtractedPageData`] record: title, meta tags,
//! heading hierarchy, canonical link, scripts with inline JSON-LD, a basic SEO
//! score and, for rendered pages, links, word count and body text.
//!
//! ## Quick Start
//!
//! ```rust
//! use seo_scout::extract_html;
//!
//! let html = r#"<html><head><title>Acme</title>
//! <meta name="description" content="We sell widgets"></head>
//! <body><h1>Widgets</h1></body></html>"#;
//!
//! let page = extract_html(html, "https://acme.example/");
//! assert_eq!(page.title, "Acme");
//! assert_eq!(page.seo_score.h1_count, 1);
//! assert!(!page.seo_score.missing_meta_description);
//! println!("{}", page.to_json()?);
//! # Ok::<(), seo_scout::Error>(())
//! ```
//!
//! Fetching a live page (requires the `render` feature for the browser
//! fallback):
//!
//! ```rust,no_run
//! # async fn run() -> seo_scout::Result<()> {
//! use seo_scout::{scrape_website, RenderHint};
//!
//! let page = scrape_website("https://example.com", RenderHint::Static).await?;
//! println!("{}", page.to_json_pretty()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **Static first**: one HTTP GET with browser headers and a 10 s timeout
//! - **Render fallback**: headless Chromium, network-idle wait, guaranteed teardown
//! - **One extraction path**: rendered DOM is reparsed into the same tree type
//! - **Collaborator contract**: [`SiteAnalysis`] / [`Competitor`] types and traits
//!
//! ## Cargo features
//!
//! - `render` (default): the [`RenderFetcher`] backed by `chromiumoxide`.

mod error;
mod options;
mod result;

/// Parsed document tree and DOM helpers.
pub mod dom;

/// Character encoding detection and transcoding.
pub mod encoding;

/// URL validation and link resolution.
pub mod url_utils;

/// Static and rendered fetching, and the fallback resolver.
pub mod fetch;

/// Structural extraction from a document tree.
pub mod extract;

/// SEO score measurements.
pub mod scoring;

/// Downstream analysis interfaces.
pub mod collaborators;

/// Fetch-then-extract pipeline.
pub mod scout;

// Public API - re-exports
pub use collaborators::{Competitor, CompetitorFinder, SiteAnalysis, SiteAnalyzer};
pub use dom::{DocumentTree, FetchOrigin};
pub use error::{Error, RenderError, RenderStage, Result, SoftFetchFailure};
pub use extract::{extract, extract_with_options};
#[cfg(feature = "render")]
pub use fetch::RenderFetcher;
pub use fetch::{DocumentResolver, FetchRequest, NoRenderer, RenderHint, StaticFetcher};
pub use options::{ExtractOptions, PageContent, RenderConfig, StaticFetchConfig, DEFAULT_USER_AGENT};
pub use result::{ExtractedPageData, HeaderBucket, LinkRecord, MetaTag, ScriptEntry, SeoScore};
pub use scout::Scout;

/// Extracts a page record from an HTML string.
///
/// The document is treated as statically fetched, so `links`, `wordCount`
/// and `bodyText` are left out. Use [`extract_html_with_options`] with
/// [`PageContent::Always`] to include them.
///
/// # Example
///
/// ```rust
/// use seo_scout::extract_html;
///
/// let page = extract_html("<title> Hello </title>", "https://example.com/");
/// assert_eq!(page.title, "Hello");
/// assert!(page.links.is_none());
/// ```
#[must_use]
pub fn extract_html(html: &str, url: &str) -> ExtractedPageData {
    extract_html_with_options(html, url, &ExtractOptions::default())
}

/// Extracts a page record from an HTML string with custom options.
///
/// # Example
///
/// ```rust
/// use seo_scout::{extract_html_with_options, ExtractOptions, PageContent};
///
/// let options = ExtractOptions {
///     max_heading_level: 2,
///     page_content: PageContent::Always,
///     ..ExtractOptions::default()
/// };
/// let page = extract_html_with_options("<body><h1>A</h1><h3>C</h3> one two</body>", "https://example.com/", &options);
/// assert_eq!(page.headers.len(), 2);
/// assert_eq!(page.word_count, Some(4));
/// ```
#[must_use]
pub fn extract_html_with_options(html: &str, url: &str, options: &ExtractOptions) -> ExtractedPageData {
    let tree = DocumentTree::parse(html, url, FetchOrigin::Static);
    extract::extract_with_options(&tree, url, options)
}

/// Extracts a page record from raw HTML bytes with encoding detection.
///
/// The charset is taken from `<meta charset>` or an `http-equiv`
/// `Content-Type` declaration; without one the bytes are read as UTF-8 and
/// invalid sequences become U+FFFD.
///
/// # Example
///
/// ```rust
/// use seo_scout::extract_bytes;
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"><title>Caf\xE9</title></head></html>";
/// let page = extract_bytes(html, "https://example.com/");
/// assert_eq!(page.title, "Café");
/// ```
#[must_use]
pub fn extract_bytes(html: &[u8], url: &str) -> ExtractedPageData {
    extract_html(&encoding::decode_body(html, None), url)
}

/// Fetches `url` with default settings and extracts its page record.
///
/// Static-first requests fall back to headless rendering when the HTTP fetch
/// yields nothing; [`RenderHint::Rendered`] skips the HTTP fetch.
///
/// # Errors
/// - [`Error::InvalidUrl`] for anything but an absolute http(s) URL.
/// - [`Error::Render`] when rendering was needed and failed.
/// - [`Error::HttpClient`] if the HTTP client cannot be initialised.
#[cfg(feature = "render")]
pub async fn scrape_website(url: &str, hint: RenderHint) -> Result<ExtractedPageData> {
    let scout = Scout::new(StaticFetchConfig::default(), RenderConfig::default(), ExtractOptions::default())?;
    scout.scrape(&FetchRequest::new(url, hint)).await
}
