//! Static Fetcher: one HTTP GET with browser-like headers and a hard timeout.
//!
//! Soft-fails: every failure becomes a [`StaticFetch`] variant and a warning
//! log line, so the resolver can fall back to rendering.

use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::{debug, warn};

use super::{StaticFetch, StaticSource};
use crate::dom::{DocumentTree, FetchOrigin};
use crate::encoding;
use crate::error::{Error, Result, SoftFetchFailure};
use crate::options::StaticFetchConfig;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// HTTP document source.
#[derive(Debug, Clone)]
pub struct StaticFetcher {
    client: reqwest::Client,
    config: StaticFetchConfig,
}

impl StaticFetcher {
    /// Build a fetcher and its HTTP client.
    ///
    /// # Errors
    /// Returns [`Error::HttpClient`] if a header value is invalid or the TLS
    /// backend cannot be initialised.
    pub fn new(config: StaticFetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language).map_err(|e| Error::HttpClient(e.to_string()))?,
        );

        let mut builder = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .timeout(config.timeout);
        if !config.use_env_proxy {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &StaticFetchConfig {
        &self.config
    }

    /// GET `url` and decode the body, returning `(final_url, html)`.
    async fn fetch_html(&self, url: &str) -> std::result::Result<(String, String), Failure> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Failure::Soft(SoftFetchFailure::Status(status.as_u16())));
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        if !encoding::is_markup_content_type(content_type.as_deref()) {
            return Err(Failure::Soft(SoftFetchFailure::Decode(format!(
                "unsupported content type {}",
                content_type.unwrap_or_default()
            ))));
        }

        let body = response.bytes().await?;
        debug!(url, final_url = %final_url, bytes = body.len(), "static response received");

        Ok((final_url, encoding::decode_body(&body, content_type.as_deref())))
    }
}

impl StaticSource for StaticFetcher {
    async fn fetch_static(&self, url: &str) -> StaticFetch {
        match self.fetch_html(url).await {
            Ok((final_url, html)) => StaticFetch::Document(DocumentTree::parse(&html, final_url, FetchOrigin::Static)),
            Err(Failure::TimedOut) => {
                warn!(url, timeout = ?self.config.timeout, "static fetch timed out");
                StaticFetch::TimedOut
            }
            Err(Failure::Soft(failure)) => {
                warn!(url, error = %failure, "static fetch failed");
                StaticFetch::Failed(failure)
            }
        }
    }
}

/// Internal failure before it is turned into a [`StaticFetch`].
#[derive(Debug)]
enum Failure {
    TimedOut,
    Soft(SoftFetchFailure),
}

impl From<reqwest::Error> for Failure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::TimedOut
        } else if err.is_body() || err.is_decode() {
            Self::Soft(SoftFetchFailure::Decode(err.to_string()))
        } else {
            Self::Soft(SoftFetchFailure::Transport(err.to_string()))
        }
    }
}
