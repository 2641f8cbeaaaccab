//! Result types for extraction output.
//!
//! [`ExtractedPageData`] is a plain owned snapshot of a page. It serializes to
//! a camelCase JSON object, the form handed to downstream collaborators.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Heading texts by tag (`"h1"`, `"h2"`, ...), each in document order.
pub type HeaderBucket = BTreeMap<String, Vec<String>>;

/// One `<meta>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTag {
    /// `name` attribute, falling back to `property`.
    pub name: Option<String>,

    /// `content` attribute, falling back to `value`.
    pub content: Option<String>,
}

/// One `<script>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEntry {
    /// `src` attribute.
    pub src: Option<String>,

    /// `type` attribute.
    #[serde(rename = "type")]
    pub script_type: Option<String>,

    /// Inline body, only for `application/ld+json` scripts.
    pub content: Option<String>,
}

/// One `<a>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Resolved `href`, empty when the anchor has none.
    pub href: String,

    /// Anchor text.
    pub text: String,

    /// `rel` attribute, empty when absent.
    pub rel: String,
}

/// Basic SEO diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoScore {
    /// Number of `<h1>` elements.
    pub h1_count: usize,

    /// Characters in the trimmed title.
    pub title_length: usize,

    /// Characters in the trimmed meta description.
    pub meta_description_length: usize,

    /// `h1_count == 0`.
    pub missing_h1: bool,

    /// `meta_description_length == 0`.
    pub missing_meta_description: bool,
}

impl SeoScore {
    /// Build a score from raw measurements, deriving both flags.
    #[must_use]
    pub const fn from_measurements(h1_count: usize, title_length: usize, meta_description_length: usize) -> Self {
        Self {
            h1_count,
            title_length,
            meta_description_length,
            missing_h1: h1_count == 0,
            missing_meta_description: meta_description_length == 0,
        }
    }
}

/// Structured record extracted from one page.
///
/// `links`, `word_count` and `body_text` are only present for documents that
/// carry page content (rendered documents by default) and are omitted from
/// the JSON otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedPageData {
    /// URL the caller asked for.
    pub url: String,

    /// Trimmed page title, empty when missing.
    pub title: String,

    /// Every `<meta>` element in document order.
    pub meta_tags: Vec<MetaTag>,

    /// Heading texts per level; every configured level is present.
    pub headers: HeaderBucket,

    /// `<link rel="canonical">` target.
    pub canonical: Option<String>,

    /// Every `<script>` element in document order.
    pub scripts: Vec<ScriptEntry>,

    /// SEO diagnostics.
    pub seo_score: SeoScore,

    /// Every `<a>` element in document order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<LinkRecord>>,

    /// Whitespace-delimited words in the full body text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,

    /// Body text, truncated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_text: Option<String>,
}

impl ExtractedPageData {
    /// Compact JSON form.
    ///
    /// # Errors
    /// Returns [`crate::Error::Serialization`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON form.
    ///
    /// # Errors
    /// Returns [`crate::Error::Serialization`] if encoding fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a record previously produced by [`Self::to_json`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Serialization`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn seo_score_flags_follow_measurements() {
        let score = SeoScore::from_measurements(0, 4, 0);
        assert!(score.missing_h1);
        assert!(score.missing_meta_description);

        let score = SeoScore::from_measurements(2, 10, 16);
        assert!(!score.missing_h1);
        assert!(!score.missing_meta_description);
    }

    #[test]
    fn seo_score_uses_camel_case_keys() {
        let value = serde_json::to_value(SeoScore::from_measurements(1, 4, 16)).unwrap_or_default();
        assert_eq!(
            value,
            json!({
                "h1Count": 1,
                "titleLength": 4,
                "metaDescriptionLength": 16,
                "missingH1": false,
                "missingMetaDescription": false
            })
        );
    }

    #[test]
    fn static_record_omits_page_content_but_keeps_null_canonical() {
        let data = ExtractedPageData {
            url: "https://example.com".into(),
            ..ExtractedPageData::default()
        };
        let value = serde_json::to_value(&data).unwrap_or_default();

        assert_eq!(value["canonical"], serde_json::Value::Null);
        assert!(value.get("canonical").is_some());
        assert!(value.get("links").is_none());
        assert!(value.get("wordCount").is_none());
        assert!(value.get("bodyText").is_none());
        assert!(value.get("metaTags").is_some());
        assert!(value.get("seoScore").is_some());
    }

    #[test]
    fn script_type_serializes_as_type() {
        let entry = ScriptEntry {
            src: None,
            script_type: Some("module".into()),
            content: None,
        };
        let value = serde_json::to_value(entry).unwrap_or_default();
        assert_eq!(value, json!({"src": null, "type": "module", "content": null}));
    }
}
