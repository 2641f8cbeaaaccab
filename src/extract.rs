//! Structural extraction.
//!
//! Reads a [`DocumentTree`] into an [`ExtractedPageData`] record: title, meta
//! tags, headings, canonical link, scripts, SEO score and, for documents that
//! carry page content, links, word count and body text. Deterministic for a
//! given tree; every stored string is trimmed.

use url::Url;

use crate::dom::{self, DocumentTree, FetchOrigin, Selection};
use crate::options::{ExtractOptions, PageContent};
use crate::result::{ExtractedPageData, HeaderBucket, LinkRecord, MetaTag, ScriptEntry};
use crate::scoring;
use crate::url_utils;

const JSON_LD_TYPE: &str = "application/ld+json";
const CANONICAL_SELECTOR: &str = r#"link[rel="canonical"]"#;

/// Extract a page record with default options.
#[must_use]
pub fn extract(tree: &DocumentTree, url: &str) -> ExtractedPageData {
    extract_with_options(tree, url, &ExtractOptions::default())
}

/// Extract a page record.
///
/// `url` is recorded as the record's URL; relative links are resolved against
/// the URL the tree was served from.
#[must_use]
pub fn extract_with_options(tree: &DocumentTree, url: &str, options: &ExtractOptions) -> ExtractedPageData {
    let mut data = ExtractedPageData {
        url: url.trim().to_string(),
        title: tree.title(),
        meta_tags: extract_meta_tags(tree),
        headers: extract_headers(tree, &options.heading_tags()),
        canonical: extract_canonical(tree),
        scripts: extract_scripts(tree),
        seo_score: scoring::score(tree),
        ..ExtractedPageData::default()
    };

    if wants_page_content(tree.origin(), options.page_content) {
        let body_text = tree.body_text();
        data.word_count = Some(count_words(&body_text));
        data.body_text = Some(truncate_chars(&body_text, options.body_text_limit));
        data.links = Some(extract_links(tree));
    }

    data
}

const fn wants_page_content(origin: FetchOrigin, mode: PageContent) -> bool {
    match mode {
        PageContent::Always => true,
        PageContent::Never => false,
        PageContent::Auto => matches!(origin, FetchOrigin::Rendered),
    }
}

/// Every `<meta>` element, `name`/`property` and `content`/`value` fallbacks applied.
#[must_use]
pub fn extract_meta_tags(tree: &DocumentTree) -> Vec<MetaTag> {
    dom::each_element(&tree.select("meta"))
        .map(|meta| MetaTag {
            name: dom::non_empty_attribute(&meta, "name")
                .or_else(|| dom::non_empty_attribute(&meta, "property")),
            content: dom::non_empty_attribute(&meta, "content")
                .or_else(|| dom::non_empty_attribute(&meta, "value")),
        })
        .collect()
}

/// Trimmed heading texts for each tag, in document order.
///
/// Every requested tag gets an entry, empty when nothing matches.
#[must_use]
pub fn extract_headers(tree: &DocumentTree, tags: &[String]) -> HeaderBucket {
    tags.iter()
        .map(|tag| {
            let texts: Vec<String> = dom::each_element(&tree.select(tag))
                .map(|heading| trimmed_text(&heading))
                .collect();
            (tag.clone(), texts)
        })
        .collect()
}

/// `href` of the first canonical link; `None` when absent or blank.
#[must_use]
pub fn extract_canonical(tree: &DocumentTree) -> Option<String> {
    let link = tree.select(CANONICAL_SELECTOR).first();
    dom::non_empty_attribute(&link, "href")
}

/// Every `<script>` element; inline bodies kept for JSON-LD only.
#[must_use]
pub fn extract_scripts(tree: &DocumentTree) -> Vec<ScriptEntry> {
    dom::each_element(&tree.select("script"))
        .map(|script| {
            let script_type = dom::non_empty_attribute(&script, "type");
            let content = (script_type.as_deref() == Some(JSON_LD_TYPE))
                .then(|| dom::inner_html(&script).trim().to_string());
            ScriptEntry {
                src: dom::non_empty_attribute(&script, "src"),
                script_type,
                content,
            }
        })
        .collect()
}

/// Every `<a>` element with its `href` resolved against the document base.
#[must_use]
pub fn extract_links(tree: &DocumentTree) -> Vec<LinkRecord> {
    let base = document_base(tree);

    dom::each_element(&tree.select("a"))
        .map(|anchor| LinkRecord {
            href: dom::get_attribute(&anchor, "href")
                .map(|href| url_utils::resolve_href(&href, base.as_ref()))
                .unwrap_or_default(),
            text: trimmed_text(&anchor),
            rel: dom::non_empty_attribute(&anchor, "rel").unwrap_or_default(),
        })
        .collect()
}

/// Base URL for link resolution: `<base href>` resolved against the tree URL.
fn document_base(tree: &DocumentTree) -> Option<Url> {
    let page = Url::parse(tree.url()).ok();
    let base_href = dom::non_empty_attribute(&tree.select("base[href]").first(), "href");

    match (page, base_href) {
        (Some(page), Some(href)) => page.join(&href).ok().or(Some(page)),
        (None, Some(href)) => Url::parse(&href).ok(),
        (page, None) => page,
    }
}

/// Number of whitespace-delimited, non-empty tokens.
#[must_use]
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// First `limit` characters of `text`, trailing whitespace removed.
#[must_use]
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => text[..cut].trim_end().to_string(),
        None => text.to_string(),
    }
}

fn trimmed_text(sel: &Selection) -> String {
    dom::text_content(sel).trim().to_string()
}
