//! Scrape a live page, falling back to headless Chromium when needed.
//!
//! Run with: `cargo run --example scrape -- https://example.com [--render]`

use seo_scout::{scrape_website, RenderHint};

#[tokio::main]
async fn main() -> Result<(), seo_scout::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "seo_scout=debug".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let url = args.next().unwrap_or_else(|| "https://example.com".to_string());
    let hint = if args.any(|arg| arg == "--render") {
        RenderHint::Rendered
    } else {
        RenderHint::Static
    };

    let page = scrape_website(&url, hint).await?;

    println!("{}", page.to_json_pretty()?);
    println!(
        "h1: {}, title: {} chars, description: {} chars",
        page.seo_score.h1_count, page.seo_score.title_length, page.seo_score.meta_description_length
    );

    Ok(())
}
