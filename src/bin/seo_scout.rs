//! Command line entry point: scrape one URL and print its page record as JSON.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use seo_scout::{ExtractOptions, FetchRequest, PageContent, RenderHint, Scout, StaticFetchConfig};

#[derive(Parser)]
#[command(name = "seo-scout", version, about = "Fetch a page and extract its SEO structure as JSON")]
struct Cli {
    /// Page to scrape (absolute http or https URL)
    url: String,

    /// Skip the plain HTTP fetch and render with headless Chromium
    #[arg(long)]
    render: bool,

    /// Deepest heading level collected (1-6)
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u8).range(1..=6))]
    max_heading_level: u8,

    /// Static fetch timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Chrome/Chromium executable (default: auto-detect)
    #[arg(long, value_name = "PATH")]
    chrome: Option<PathBuf>,

    /// Keep the Chromium sandbox enabled
    #[arg(long)]
    sandbox: bool,

    /// Which pages get links, word count and body text
    #[arg(long, value_enum, default_value_t = ContentMode::Auto)]
    page_content: ContentMode,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ContentMode {
    /// Rendered pages only
    Auto,
    Always,
    Never,
}

impl From<ContentMode> for PageContent {
    fn from(mode: ContentMode) -> Self {
        match mode {
            ContentMode::Auto => Self::Auto,
            ContentMode::Always => Self::Always,
            ContentMode::Never => Self::Never,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let static_config = StaticFetchConfig {
        timeout: Duration::from_secs(cli.timeout),
        ..StaticFetchConfig::default()
    };
    let options = ExtractOptions {
        max_heading_level: cli.max_heading_level,
        page_content: cli.page_content.into(),
        ..ExtractOptions::default()
    };
    let hint = if cli.render { RenderHint::Rendered } else { RenderHint::Static };
    let request = FetchRequest::new(cli.url.as_str(), hint);

    #[cfg(feature = "render")]
    let scout = {
        let render_config = seo_scout::RenderConfig {
            executable: cli.chrome,
            sandbox: cli.sandbox,
            ..seo_scout::RenderConfig::default()
        };
        Scout::new(static_config, render_config, options)?
    };

    #[cfg(not(feature = "render"))]
    let scout = {
        if cli.chrome.is_some() || cli.sandbox {
            tracing::warn!("built without the render feature; browser options are ignored");
        }
        Scout::from_parts(
            seo_scout::DocumentResolver::new(seo_scout::StaticFetcher::new(static_config)?, seo_scout::NoRenderer),
            options,
        )
    };

    let page = scout
        .scrape(&request)
        .await
        .with_context(|| format!("failed to scrape {}", cli.url))?;

    let json = if cli.pretty { page.to_json_pretty()? } else { page.to_json()? };
    println!("{json}");

    Ok(())
}
