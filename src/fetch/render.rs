//! Render Fetcher: headless Chromium over the DevTools protocol.
//!
//! Every call launches its own browser, opens one page, waits for the network
//! to settle and captures the serialized DOM. The browser is closed on every
//! exit path, including failed navigation and capture.

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{EventLoadingFailed, EventLoadingFinished, EventRequestWillBeSent};
use chromiumoxide::Page;
use futures_lite::StreamExt;
use std::future::Future;
use tokio::task::JoinHandle;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};

use super::idle::{wait_for_idle, NetworkEvent};
use super::RenderSource;
use crate::dom::{DocumentTree, FetchOrigin};
use crate::error::{RenderError, RenderStage};
use crate::options::RenderConfig;

/// Headless browser document source.
#[derive(Debug, Clone, Default)]
pub struct RenderFetcher {
    config: RenderConfig,
}

impl RenderFetcher {
    /// Create a fetcher. Nothing is launched until the first fetch.
    #[must_use]
    pub const fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn browser_config(&self) -> Result<BrowserConfig, String> {
        let (width, height) = self.config.window_size;
        let mut builder = BrowserConfig::builder()
            .window_size(width, height)
            .request_timeout(self.config.navigation_timeout)
            .args(["--disable-dev-shm-usage", "--disable-gpu", "--no-first-run", "--disable-extensions"]);

        if !self.config.sandbox {
            builder = builder.no_sandbox().arg("--disable-setuid-sandbox");
        }
        if let Some(executable) = &self.config.executable {
            builder = builder.chrome_executable(executable);
        }

        builder.build()
    }

    /// Navigate, wait for quiescence and serialize the page.
    ///
    /// Returns `(final_url, html)`.
    async fn capture(&self, page: Page, url: &str) -> Result<(String, String), RenderError> {
        let started = page
            .event_listener::<EventRequestWillBeSent>()
            .await
            .map_err(|e| RenderError::new(url, RenderStage::OpenPage, e))?;
        let finished = page
            .event_listener::<EventLoadingFinished>()
            .await
            .map_err(|e| RenderError::new(url, RenderStage::OpenPage, e))?;
        let failed = page
            .event_listener::<EventLoadingFailed>()
            .await
            .map_err(|e| RenderError::new(url, RenderStage::OpenPage, e))?;

        let events = started
            .map(|event| NetworkEvent::Started(event.request_id.inner().clone()))
            .or(finished.map(|event| NetworkEvent::Finished(event.request_id.inner().clone())))
            .or(failed.map(|event| NetworkEvent::Finished(event.request_id.inner().clone())))
            .boxed();

        let deadline = Instant::now() + self.config.navigation_timeout;

        match timeout_at(deadline, page.goto(url)).await {
            Ok(Ok(_)) => debug!(url, "navigation committed"),
            Ok(Err(e)) => return Err(RenderError::new(url, RenderStage::Navigate, e)),
            Err(_) => {
                return Err(RenderError::new(
                    url,
                    RenderStage::Navigate,
                    format!("no load event within {:?}", self.config.navigation_timeout),
                ))
            }
        }

        let settled = timeout_at(
            deadline,
            wait_for_idle(events, self.config.idle_connections, self.config.idle_window),
        )
        .await
        .map_err(|_| {
            RenderError::new(
                url,
                RenderStage::NetworkIdle,
                format!(
                    "network not idle within {:?} (limit {} in flight)",
                    self.config.navigation_timeout, self.config.idle_connections
                ),
            )
        })?;
        debug!(url, in_flight = settled, "network idle");

        let html = page
            .content()
            .await
            .map_err(|e| RenderError::new(url, RenderStage::Capture, e))?;
        let final_url = page
            .url()
            .await
            .map_err(|e| RenderError::new(url, RenderStage::Capture, e))?
            .unwrap_or_else(|| url.to_string());

        Ok((final_url, html))
    }
}

impl RenderSource for RenderFetcher {
    async fn fetch_rendered(&self, url: &str) -> Result<DocumentTree, RenderError> {
        let config = self
            .browser_config()
            .map_err(|e| RenderError::new(url, RenderStage::Launch, e))?;

        debug!(url, "launching headless browser");
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| RenderError::new(url, RenderStage::Launch, e))?;
        let handler_task = tokio::spawn(async move { while handler.next().await.is_some() {} });
        let session = BrowserSession {
            browser,
            handler_task,
            url: url.to_string(),
        };

        let (final_url, html) = run_session(session, url, |page| self.capture(page, url)).await?;
        debug!(url, final_url = %final_url, bytes = html.len(), "rendered page captured");
        Ok(DocumentTree::parse(&html, final_url, FetchOrigin::Rendered))
    }
}

/// A launched browser that can open one page and must be shut down.
trait Session {
    type Page: Clone;

    async fn open_page(&self) -> Result<Self::Page, String>;

    async fn close_page(&self, page: Self::Page);

    async fn shutdown(self);
}

/// Open a page, run `capture` on it, then close the page and the browser,
/// whatever `capture` returned.
async fn run_session<S, T, F, Fut>(session: S, url: &str, capture: F) -> Result<T, RenderError>
where
    S: Session,
    F: FnOnce(S::Page) -> Fut,
    Fut: Future<Output = Result<T, RenderError>>,
{
    let outcome = match session.open_page().await {
        Ok(page) => {
            let captured = capture(page.clone()).await;
            session.close_page(page).await;
            captured
        }
        Err(e) => Err(RenderError::new(url, RenderStage::OpenPage, e)),
    };

    session.shutdown().await;
    outcome
}

struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    url: String,
}

impl Session for BrowserSession {
    type Page = Page;

    async fn open_page(&self) -> Result<Page, String> {
        self.browser.new_page("about:blank").await.map_err(|e| e.to_string())
    }

    async fn close_page(&self, page: Page) {
        if let Err(e) = page.close().await {
            debug!(url = %self.url, error = %e, "page close failed");
        }
    }

    async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!(url = %self.url, error = %e, "browser close failed");
        }
        if let Err(e) = self.browser.wait().await {
            warn!(url = %self.url, error = %e, "browser process did not exit cleanly");
        }
        self.handler_task.abort();
    }
}
