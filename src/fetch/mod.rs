//! Fetch strategy selection.
//!
//! A [`DocumentResolver`] owns one static source and one render source and
//! turns a [`FetchRequest`] into a [`DocumentTree`]:
//!
//! - `RenderHint::Rendered` goes straight to the render source.
//! - `RenderHint::Static` tries the static source first and falls back to the
//!   render source exactly once when it yields no document.
//!
//! Only render failures escape; static failures are values, not errors.

#[cfg(feature = "render")]
mod idle;
#[cfg(feature = "render")]
pub mod render;
pub mod static_fetch;

use tracing::{debug, info};

use crate::dom::DocumentTree;
use crate::error::{RenderError, RenderStage, SoftFetchFailure};

#[cfg(feature = "render")]
pub use render::RenderFetcher;
pub use static_fetch::StaticFetcher;

/// Caller's hint about how the page must be obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderHint {
    /// Try a plain HTTP fetch first.
    #[default]
    Static,
    /// The page needs its scripts executed.
    Rendered,
}

/// One extraction request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Target URL.
    pub url: String,
    /// How to obtain the document.
    pub render_hint: RenderHint,
}

impl FetchRequest {
    /// Create a request.
    #[must_use]
    pub fn new(url: impl Into<String>, render_hint: RenderHint) -> Self {
        Self {
            url: url.into(),
            render_hint,
        }
    }

    /// Static-first request.
    #[must_use]
    pub fn static_first(url: impl Into<String>) -> Self {
        Self::new(url, RenderHint::Static)
    }

    /// Render-only request.
    #[must_use]
    pub fn rendered(url: impl Into<String>) -> Self {
        Self::new(url, RenderHint::Rendered)
    }
}

/// Outcome of a static fetch.
#[derive(Debug)]
pub enum StaticFetch {
    /// The page was fetched and parsed.
    Document(DocumentTree),
    /// The request hit the configured timeout.
    TimedOut,
    /// Any other failure.
    Failed(SoftFetchFailure),
}

impl StaticFetch {
    /// The document, if one was fetched.
    #[must_use]
    pub fn into_document(self) -> Option<DocumentTree> {
        match self {
            Self::Document(tree) => Some(tree),
            Self::TimedOut | Self::Failed(_) => None,
        }
    }
}

/// Plain HTTP document source. Never fails past this boundary.
#[allow(async_fn_in_trait)]
pub trait StaticSource {
    /// Fetch and parse `url` without running scripts.
    async fn fetch_static(&self, url: &str) -> StaticFetch;
}

/// Headless browser document source.
#[allow(async_fn_in_trait)]
pub trait RenderSource {
    /// Load `url` in a browser, let it settle and return the rendered DOM.
    ///
    /// # Errors
    /// Any failure is fatal for the URL and reported with its stage.
    async fn fetch_rendered(&self, url: &str) -> Result<DocumentTree, RenderError>;
}

impl<T: StaticSource> StaticSource for &T {
    async fn fetch_static(&self, url: &str) -> StaticFetch {
        (**self).fetch_static(url).await
    }
}

impl<T: RenderSource> RenderSource for &T {
    async fn fetch_rendered(&self, url: &str) -> Result<DocumentTree, RenderError> {
        (**self).fetch_rendered(url).await
    }
}

/// Render source used when the crate is built without the `render` feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRenderer;

impl RenderSource for NoRenderer {
    async fn fetch_rendered(&self, url: &str) -> Result<DocumentTree, RenderError> {
        Err(RenderError::new(url, RenderStage::Launch, "rendering support is not compiled in"))
    }
}

/// Static-then-render document resolver.
#[derive(Debug, Clone)]
pub struct DocumentResolver<S, R> {
    static_source: S,
    render_source: R,
}

impl<S, R> DocumentResolver<S, R> {
    /// Build a resolver from its two sources.
    #[must_use]
    pub const fn new(static_source: S, render_source: R) -> Self {
        Self {
            static_source,
            render_source,
        }
    }

    /// The static source.
    pub const fn static_source(&self) -> &S {
        &self.static_source
    }

    /// The render source.
    pub const fn render_source(&self) -> &R {
        &self.render_source
    }
}

impl<S: StaticSource, R: RenderSource> DocumentResolver<S, R> {
    /// Obtain a document for `request`.
    ///
    /// # Errors
    /// Returns the render source's error when rendering is attempted and fails.
    pub async fn resolve_document(&self, request: &FetchRequest) -> Result<DocumentTree, RenderError> {
        let url = request.url.as_str();

        if request.render_hint == RenderHint::Rendered {
            debug!(url, "rendering as requested");
            return self.render_source.fetch_rendered(url).await;
        }

        let reason = match self.static_source.fetch_static(url).await {
            StaticFetch::Document(tree) => {
                debug!(url, "static fetch succeeded");
                return Ok(tree);
            }
            StaticFetch::TimedOut => "timed out".to_string(),
            StaticFetch::Failed(failure) => failure.to_string(),
        };

        info!(url, %reason, "static fetch yielded no document, falling back to rendering");
        self.render_source.fetch_rendered(url).await
    }
}
