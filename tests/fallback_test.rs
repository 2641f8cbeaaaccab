use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use seo_scout::fetch::{RenderSource, StaticFetch, StaticSource};
use seo_scout::{
    DocumentResolver, DocumentTree, Error, ExtractOptions, FetchOrigin, FetchRequest, RenderError, RenderStage, Scout,
    SoftFetchFailure, StaticFetchConfig, StaticFetcher,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const RENDERED_PAGE: &str = r#"<html><head><title>Rendered</title></head>
<body><h1>App</h1><p>Loaded by script</p><a href="/next">Next</a></body></html>"#;

struct TimingOutStatic;

impl StaticSource for TimingOutStatic {
    async fn fetch_static(&self, _url: &str) -> StaticFetch {
        StaticFetch::TimedOut
    }
}

#[derive(Default)]
struct CountingRender {
    calls: AtomicUsize,
}

impl RenderSource for CountingRender {
    async fn fetch_rendered(&self, url: &str) -> Result<DocumentTree, RenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(DocumentTree::parse(RENDERED_PAGE, url, FetchOrigin::Rendered))
    }
}

struct BrokenRender;

impl RenderSource for BrokenRender {
    async fn fetch_rendered(&self, url: &str) -> Result<DocumentTree, RenderError> {
        Err(RenderError::new(url, RenderStage::Navigate, "net::ERR_NAME_NOT_RESOLVED"))
    }
}

async fn serve_once_per_connection(response: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap_or_else(|e| panic!("bind failed: {e}"));
    let addr = listener.local_addr().unwrap_or_else(|e| panic!("no local addr: {e}"));

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{addr}/")
}

fn static_fetcher() -> StaticFetcher {
    StaticFetcher::new(StaticFetchConfig {
        timeout: Duration::from_secs(5),
        use_env_proxy: false,
        ..StaticFetchConfig::default()
    })
    .unwrap_or_else(|e| panic!("client setup failed: {e}"))
}

#[tokio::test]
async fn static_timeout_matches_direct_render() {
    let resolver = DocumentResolver::new(TimingOutStatic, CountingRender::default());
    let scout = Scout::from_parts(resolver, ExtractOptions::default());
    let url = "https://spa.example/";

    let via_fallback = scout.scrape(&FetchRequest::static_first(url)).await;
    let direct = scout.scrape(&FetchRequest::rendered(url)).await;

    match (via_fallback, direct) {
        (Ok(a), Ok(b)) => {
            assert_eq!(a, b);
            assert_eq!(a.title, "Rendered");
            assert_eq!(a.word_count, Some(5));
        }
        other => panic!("expected two records, got {other:?}"),
    }
    assert_eq!(scout.resolver().render_source().calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn http_error_status_falls_back_to_render() {
    let url = serve_once_per_connection("HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;
    let resolver = DocumentResolver::new(static_fetcher(), CountingRender::default());

    let outcome = resolver.static_source().fetch_static(&url).await;
    assert!(matches!(outcome, StaticFetch::Failed(SoftFetchFailure::Status(503))));

    let tree = resolver
        .resolve_document(&FetchRequest::static_first(url.as_str()))
        .await
        .unwrap_or_else(|e| panic!("fallback failed: {e}"));

    assert_eq!(tree.origin(), FetchOrigin::Rendered);
    assert_eq!(resolver.render_source().calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn served_html_skips_render() {
    let url = serve_once_per_connection(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nConnection: close\r\n\r\n<title>Served</title><h1>Hi</h1><a href=\"/a\">a</a>",
    )
    .await;
    let scout = Scout::from_parts(
        DocumentResolver::new(static_fetcher(), CountingRender::default()),
        ExtractOptions::default(),
    );

    let page = scout
        .scrape(&FetchRequest::static_first(url.as_str()))
        .await
        .unwrap_or_else(|e| panic!("scrape failed: {e}"));

    assert_eq!(page.title, "Served");
    assert_eq!(page.seo_score.h1_count, 1);
    assert!(page.links.is_none());
    assert_eq!(scout.resolver().render_source().calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn render_failure_surfaces_url_and_stage() {
    let scout = Scout::from_parts(DocumentResolver::new(TimingOutStatic, BrokenRender), ExtractOptions::default());

    let err = scout.scrape(&FetchRequest::static_first("https://gone.example/")).await.err();

    match err {
        Some(Error::Render(e)) => {
            assert_eq!(e.stage, RenderStage::Navigate);
            assert_eq!(e.url, "https://gone.example/");
            assert!(e.to_string().contains("navigate"));
        }
        other => panic!("expected a render error, got {other:?}"),
    }
}
