//! The per-URL pipeline: validate, fetch (static first or rendered), extract.

use tracing::{debug, info_span, Instrument};

use crate::error::{Error, Result};
use crate::extract;
use crate::fetch::{DocumentResolver, FetchRequest, RenderSource, StaticSource};
use crate::options::ExtractOptions;
use crate::result::ExtractedPageData;
use crate::url_utils;

#[cfg(feature = "render")]
use crate::fetch::{RenderFetcher, StaticFetcher};
#[cfg(feature = "render")]
use crate::options::{RenderConfig, StaticFetchConfig};

/// Page scraper combining a [`DocumentResolver`] with extraction options.
///
/// Each call to [`Scout::scrape`] owns its document; nothing is shared between
/// calls, so one `Scout` can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Scout<S, R> {
    resolver: DocumentResolver<S, R>,
    options: ExtractOptions,
}

#[cfg(feature = "render")]
impl Scout<StaticFetcher, RenderFetcher> {
    /// Build a scout with the HTTP and headless-browser fetchers.
    ///
    /// # Errors
    /// Returns [`Error::HttpClient`] if the HTTP client cannot be built.
    pub fn new(static_config: StaticFetchConfig, render_config: RenderConfig, options: ExtractOptions) -> Result<Self> {
        let resolver = DocumentResolver::new(StaticFetcher::new(static_config)?, RenderFetcher::new(render_config));
        Ok(Self::from_parts(resolver, options))
    }
}

impl<S, R> Scout<S, R> {
    /// Build a scout from an existing resolver.
    #[must_use]
    pub const fn from_parts(resolver: DocumentResolver<S, R>, options: ExtractOptions) -> Self {
        Self { resolver, options }
    }

    /// The resolver.
    pub const fn resolver(&self) -> &DocumentResolver<S, R> {
        &self.resolver
    }

    /// Extraction options.
    pub const fn options(&self) -> &ExtractOptions {
        &self.options
    }
}

impl<S: StaticSource, R: RenderSource> Scout<S, R> {
    /// Fetch `request.url` and extract its page record.
    ///
    /// # Errors
    /// - [`Error::InvalidUrl`] if the URL is not an absolute http(s) URL;
    ///   nothing is fetched in that case.
    /// - [`Error::Render`] if rendering was needed and failed.
    pub async fn scrape(&self, request: &FetchRequest) -> Result<ExtractedPageData> {
        let url = url_utils::parse_page_url(&request.url).map_err(|reason| Error::InvalidUrl {
            url: request.url.clone(),
            reason,
        })?;

        let span = info_span!("scrape", url = %url, hint = ?request.render_hint);
        async {
            let tree = self.resolver.resolve_document(request).await?;
            debug!(origin = ?tree.origin(), served_from = tree.url(), "document resolved");
            Ok::<_, Error>(extract::extract_with_options(&tree, &request.url, &self.options))
        }
        .instrument(span)
        .await
    }
}
