//! Extract an SEO record from an inline HTML page.
//!
//! Run with: `cargo run --example extract_html`

use seo_scout::{extract_html, extract_html_with_options, ExtractOptions, PageContent};

fn main() -> Result<(), seo_scout::Error> {
    let html = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <title>Acme Widgets - Hand-made in Leeds</title>
            <meta name="description" content="Acme builds durable widgets for workshops and schools.">
            <meta property="og:title" content="Acme Widgets">
            <link rel="canonical" href="https://acme.example/">
            <script type="application/ld+json">{"@type":"Organization","name":"Acme"}</script>
            <script src="/static/app.js"></script>
        </head>
        <body>
            <nav><a href="/">Home</a> <a href="/catalogue">Catalogue</a></nav>
            <h1>Widgets that last</h1>
            <h2>Workshop range</h2>
            <p>Steel widgets with a ten year guarantee.</p>
            <h2>School range</h2>
            <p>Rounded edges, bright colours. <a href="mailto:sales@acme.example">Ask sales</a></p>
        </body>
        </html>
    "#;

    println!("=== Static record ===\n");
    let page = extract_html(html, "https://acme.example/");
    println!("{}", page.to_json_pretty()?);

    println!("\n=== With page content, h1-h2 only ===\n");
    let options = ExtractOptions {
        max_heading_level: 2,
        page_content: PageContent::Always,
        ..ExtractOptions::default()
    };
    let page = extract_html_with_options(html, "https://acme.example/", &options);

    println!("Words: {:?}", page.word_count);
    for link in page.links.unwrap_or_default() {
        println!("Link: {} -> {}", link.text, link.href);
    }
    println!("Score: {:?}", page.seo_score);

    Ok(())
}
