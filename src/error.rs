//! Error types for seo-scout.
//!
//! Only one failure is absorbed inside the pipeline: a static fetch that does
//! not yield a document, which falls back to rendering. Those soft failures are
//! plain values ([`SoftFetchFailure`]), never [`Error`]s. Everything that reaches
//! [`Error`] is terminal for the URL being processed.

use std::fmt;

/// Error type for pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested URL is not an absolute http(s) URL.
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl {
        /// The rejected input.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The headless render path failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The HTTP client could not be constructed from its configuration.
    #[error("HTTP client setup failed: {0}")]
    HttpClient(String),

    /// An external collaborator answered with text that is not the expected JSON shape.
    #[error("malformed response from {collaborator}: {message}")]
    MalformedUpstreamResponse {
        /// Name of the collaborator (e.g. "site-analyzer").
        collaborator: String,
        /// Decoder message.
        message: String,
    },

    /// A page record could not be (de)serialized.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Stage of the render path at which a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStage {
    /// Browser configuration or process launch.
    Launch,
    /// Opening a tab.
    OpenPage,
    /// Navigating to the URL.
    Navigate,
    /// Waiting for network quiescence.
    NetworkIdle,
    /// Serializing the rendered DOM.
    Capture,
}

impl fmt::Display for RenderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Launch => "launch",
            Self::OpenPage => "open-page",
            Self::Navigate => "navigate",
            Self::NetworkIdle => "network-idle",
            Self::Capture => "capture",
        };
        f.write_str(name)
    }
}

/// Fatal render failure, tagged with the URL and stage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("render of {url} failed at {stage}: {message}")]
pub struct RenderError {
    /// URL being rendered.
    pub url: String,
    /// Where it failed.
    pub stage: RenderStage,
    /// Underlying error message.
    pub message: String,
}

impl RenderError {
    /// Build a render error from any displayable cause.
    pub fn new(url: impl Into<String>, stage: RenderStage, cause: impl fmt::Display) -> Self {
        Self {
            url: url.into(),
            stage,
            message: cause.to_string(),
        }
    }
}

/// Why a static fetch produced no document.
///
/// Timeouts are reported separately by [`crate::fetch::StaticFetch::TimedOut`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SoftFetchFailure {
    /// The server answered with a non-2xx status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// DNS, connect, TLS or other transport error.
    #[error("transport error: {0}")]
    Transport(String),

    /// The body could not be read or is not an HTML document.
    #[error("unusable response body: {0}")]
    Decode(String),
}
