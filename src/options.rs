//! Configuration for extraction and for both fetchers.
//!
//! Each component is built from its own plain struct; all fields are public
//! and `Default::default()` gives the standard settings.

use std::path::PathBuf;
use std::time::Duration;

/// Desktop Chrome user agent sent by the static fetcher.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/140.0.0.0 Safari/537.36";

/// Which documents get the page-content fields (`links`, `wordCount`, `bodyText`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageContent {
    /// Only documents captured by the render fetcher.
    #[default]
    Auto,
    /// Every document.
    Always,
    /// No document.
    Never,
}

/// Configuration options for structural extraction.
///
/// # Example
///
/// ```rust
/// use seo_scout::ExtractOptions;
///
/// let options = ExtractOptions {
///     max_heading_level: 3,
///     ..ExtractOptions::default()
/// };
/// assert_eq!(options.heading_tags(), vec!["h1", "h2", "h3"]);
/// ```
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Deepest heading level collected into the header bucket.
    ///
    /// Values outside `1..=6` are clamped.
    ///
    /// Default: `6`
    pub max_heading_level: u8,

    /// Maximum number of characters kept in `bodyText`.
    ///
    /// Default: `7000`
    pub body_text_limit: usize,

    /// When to collect links, word count and body text.
    ///
    /// Default: `PageContent::Auto`
    pub page_content: PageContent,
}

impl ExtractOptions {
    /// Heading tag names collected, `h1` first.
    #[must_use]
    pub fn heading_tags(&self) -> Vec<String> {
        let deepest = self.max_heading_level.clamp(1, 6);
        (1..=deepest).map(|level| format!("h{level}")).collect()
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_heading_level: 6,
            body_text_limit: 7000,
            page_content: PageContent::Auto,
        }
    }
}

/// Static fetcher settings.
#[derive(Debug, Clone)]
pub struct StaticFetchConfig {
    /// Hard limit on the whole request, body included.
    ///
    /// Default: 10 seconds
    pub timeout: Duration,

    /// `User-Agent` header value.
    ///
    /// Default: [`DEFAULT_USER_AGENT`]
    pub user_agent: String,

    /// `Accept-Language` header value.
    ///
    /// Default: `"en-US,en;q=0.9"`
    pub accept_language: String,

    /// Honour `HTTP_PROXY`/`HTTPS_PROXY`/`NO_PROXY` from the environment.
    ///
    /// Default: `true`
    pub use_env_proxy: bool,
}

impl Default for StaticFetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            use_env_proxy: true,
        }
    }
}

/// Render fetcher settings.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Chrome/Chromium binary. `None` lets the driver locate one.
    ///
    /// Default: `None`
    pub executable: Option<PathBuf>,

    /// Keep the Chromium sandbox enabled.
    ///
    /// Disabled by default so the browser starts inside containers and as root.
    ///
    /// Default: `false`
    pub sandbox: bool,

    /// In-flight request count at or below which the network counts as idle.
    ///
    /// Default: `2`
    pub idle_connections: usize,

    /// How long the network must stay idle before the page is captured.
    ///
    /// Default: 500 ms
    pub idle_window: Duration,

    /// Upper bound for navigation plus the idle wait.
    ///
    /// Default: 30 seconds
    pub navigation_timeout: Duration,

    /// Browser window size in pixels.
    ///
    /// Default: `(1920, 1080)`
    pub window_size: (u32, u32),
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            executable: None,
            sandbox: false,
            idle_connections: 2,
            idle_window: Duration::from_millis(500),
            navigation_timeout: Duration::from_secs(30),
            window_size: (1920, 1080),
        }
    }
}
