//! Basic SEO heuristics over a document tree.
//!
//! Pure and synchronous: counts `<h1>` elements and measures the title and
//! meta description. Lengths are in characters, measured after trimming.

use crate::dom::{self, DocumentTree};
use crate::result::SeoScore;

/// Selector for the description meta tag.
const META_DESCRIPTION_SELECTOR: &str = r#"meta[name="description"]"#;

/// Score a document.
#[must_use]
pub fn score(tree: &DocumentTree) -> SeoScore {
    let h1_count = tree.select("h1").length();
    let title_length = tree.title().chars().count();
    let meta_description_length = meta_description(tree).chars().count();

    SeoScore::from_measurements(h1_count, title_length, meta_description_length)
}

/// Trimmed `content` of the first description meta tag, or an empty string.
#[must_use]
pub fn meta_description(tree: &DocumentTree) -> String {
    let meta = tree.select(META_DESCRIPTION_SELECTOR).first();
    dom::get_attribute(&meta, "content")
        .map(|content| content.trim().to_string())
        .unwrap_or_default()
}
