//! Document Tree Abstraction
//!
//! Wraps a `dom_query` document behind [`DocumentTree`], the one tree type
//! every fetch path produces and the extractor consumes. Rendered pages are
//! serialized by the browser and reparsed here, so there is a single
//! extraction implementation regardless of where the HTML came from.

use dom_query::NodeRef;

// Re-export core types for external use
pub use dom_query::{Document, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

/// How a [`DocumentTree`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    /// Plain HTTP response body, no scripts executed.
    Static,
    /// DOM serialized from a headless browser after scripts ran.
    Rendered,
}

/// Read-only handle over a parsed HTML document.
///
/// The tree owns its document; nothing borrowed from it outlives extraction
/// because every extracted value is copied into owned `String`s.
pub struct DocumentTree {
    document: Document,
    url: String,
    origin: FetchOrigin,
}

impl DocumentTree {
    /// Parse `html` served from `url`.
    #[must_use]
    pub fn parse(html: &str, url: impl Into<String>, origin: FetchOrigin) -> Self {
        Self {
            document: parse(html),
            url: url.into(),
            origin,
        }
    }

    /// URL the document was served from (after redirects).
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch path that produced this tree.
    #[must_use]
    pub const fn origin(&self) -> FetchOrigin {
        self.origin
    }

    /// Underlying `dom_query` document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Select all elements matching a CSS selector, in document order.
    #[must_use]
    pub fn select(&self, selector: &str) -> Selection<'_> {
        self.document.select(selector)
    }

    /// Trimmed text of the first `<title>` element, or an empty string.
    #[must_use]
    pub fn title(&self) -> String {
        let title = self.document.select("title").first();
        text_content(&title).trim().to_string()
    }

    /// Approximate rendered text of `<body>`.
    ///
    /// Script-like subtrees are skipped, block boundaries become line breaks,
    /// runs of whitespace inside a line collapse to one space, and blank lines
    /// are dropped.
    #[must_use]
    pub fn body_text(&self) -> String {
        let body = self.document.select("body");
        let Some(root) = body.nodes().first() else {
            return String::new();
        };

        let mut raw = String::new();
        collect_visible_text(root, &mut raw);
        normalize_lines(&raw)
    }
}

impl std::fmt::Debug for DocumentTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentTree")
            .field("url", &self.url)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get an attribute, trimmed, treating an empty value as absent.
#[must_use]
pub fn non_empty_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(NodeRef::node_name)
        .map(|t| t.to_string())
}

// === Text Content ===

/// Get all text content of node and descendants
///
/// Returns `StrTendril` for zero-copy passing. Use `.to_string()` only when
/// you need owned storage.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Get inner HTML content
#[inline]
#[must_use]
pub fn inner_html(sel: &Selection) -> StrTendril {
    sel.inner_html()
}

// === Querying ===

/// Iterate each matched element as its own single-node selection.
pub fn each_element<'a, 'b>(sel: &'b Selection<'a>) -> impl Iterator<Item = Selection<'a>> + 'b {
    sel.nodes().iter().map(|node| Selection::from(*node))
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Visible Text ===

/// Subtrees whose text never renders.
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template", "head", "iframe", "object"];

/// Elements that start and end on their own line.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "details", "dialog", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "option", "p", "pre", "section", "summary", "table",
    "tr", "ul",
];

/// Elements separated from their neighbours by a space (table cells).
const CELL_TAGS: &[&str] = &["td", "th"];

fn matches_tag(name: &str, tags: &[&str]) -> bool {
    tags.iter().any(|tag| name.eq_ignore_ascii_case(tag))
}

fn collect_visible_text(node: &NodeRef, out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            out.push_str(&child.text());
            continue;
        }
        if !child.is_element() {
            continue;
        }
        let Some(name) = child.node_name() else {
            continue;
        };
        if matches_tag(&name, HIDDEN_TAGS) {
            continue;
        }

        let separator = if matches_tag(&name, BLOCK_TAGS) {
            Some('\n')
        } else if matches_tag(&name, CELL_TAGS) {
            Some(' ')
        } else {
            None
        };

        if let Some(sep) = separator {
            out.push(sep);
        }
        collect_visible_text(&child, out);
        if let Some(sep) = separator {
            out.push(sep);
        }
    }
}

fn normalize_lines(raw: &str) -> String {
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
