//! Interfaces to the downstream collaborators that consume page records.
//!
//! A [`SiteAnalyzer`] turns the JSON of an [`ExtractedPageData`] into a
//! [`SiteAnalysis`]; a [`CompetitorFinder`] turns that analysis into a list of
//! [`Competitor`]s. Only the data contract lives here. Implementations (model
//! prompting, web search) belong to the caller.
//!
//! [`ExtractedPageData`]: crate::ExtractedPageData

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Summary of what a site is about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteAnalysis {
    /// One-paragraph description of the business.
    pub website_summary: String,

    /// Keywords representing the site's main topics.
    pub core_keywords: Vec<String>,
}

impl SiteAnalysis {
    /// Decode a collaborator reply.
    ///
    /// Surrounding whitespace and a Markdown code fence around the JSON are
    /// tolerated.
    ///
    /// # Errors
    /// Returns [`Error::MalformedUpstreamResponse`] naming `collaborator` when
    /// the reply is not a JSON object of this shape.
    pub fn from_response(collaborator: &str, text: &str) -> Result<Self> {
        decode_reply(collaborator, text)
    }
}

/// A competing site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competitor {
    /// Display name, usually the result title.
    pub name: String,

    /// Site URL. Unique within one result set.
    pub url: String,
}

impl Competitor {
    /// Decode a collaborator reply holding a JSON array of competitors.
    ///
    /// # Errors
    /// Returns [`Error::MalformedUpstreamResponse`] naming `collaborator` when
    /// the reply is not such an array.
    pub fn list_from_response(collaborator: &str, text: &str) -> Result<Vec<Self>> {
        decode_reply(collaborator, text)
    }
}

/// Produces a [`SiteAnalysis`] from a serialized page record.
#[allow(async_fn_in_trait)]
pub trait SiteAnalyzer {
    /// Analyze `page_json`, the output of [`ExtractedPageData::to_json`].
    ///
    /// [`ExtractedPageData::to_json`]: crate::ExtractedPageData::to_json
    ///
    /// # Errors
    /// Implementations report unusable replies as
    /// [`Error::MalformedUpstreamResponse`].
    async fn analyze(&self, page_json: &str) -> Result<SiteAnalysis>;
}

/// Finds competitors for an analyzed site.
#[allow(async_fn_in_trait)]
pub trait CompetitorFinder {
    /// Look up competitors for `analysis`.
    ///
    /// # Errors
    /// Implementations report unusable replies as
    /// [`Error::MalformedUpstreamResponse`].
    async fn find_competitors(&self, analysis: &SiteAnalysis) -> Result<Vec<Competitor>>;
}

fn decode_reply<T: DeserializeOwned>(collaborator: &str, text: &str) -> Result<T> {
    serde_json::from_str(strip_code_fence(text)).map_err(|e| Error::MalformedUpstreamResponse {
        collaborator: collaborator.to_string(),
        message: e.to_string(),
    })
}

/// Body of a ```` ```json ```` fenced block, or the trimmed input.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line.
    body.split_once('\n').map_or(body, |(_, inner)| inner).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_analysis() {
        let reply = r#"{"websiteSummary":"Acme sells widgets.","coreKeywords":["widgets","acme"]}"#;

        let analysis = SiteAnalysis::from_response("site-analyzer", reply)
            .unwrap_or_else(|e| panic!("decode failed: {e}"));

        assert_eq!(analysis.website_summary, "Acme sells widgets.");
        assert_eq!(analysis.core_keywords, vec!["widgets", "acme"]);
    }

    #[test]
    fn decodes_fenced_analysis() {
        let reply = "```json\n{\"websiteSummary\":\"s\",\"coreKeywords\":[]}\n```\n";

        let analysis = SiteAnalysis::from_response("site-analyzer", reply);

        assert!(analysis.is_ok_and(|a| a.website_summary == "s" && a.core_keywords.is_empty()));
    }

    #[test]
    fn prose_reply_is_malformed() {
        let err = SiteAnalysis::from_response("site-analyzer", "Sure! Here is the analysis you asked for.").err();

        match err {
            Some(Error::MalformedUpstreamResponse { collaborator, .. }) => assert_eq!(collaborator, "site-analyzer"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_field_is_malformed() {
        let err = SiteAnalysis::from_response("site-analyzer", r#"{"websiteSummary":"only this"}"#).err();

        assert!(matches!(err, Some(Error::MalformedUpstreamResponse { .. })));
    }

    #[test]
    fn decodes_competitor_list() {
        let reply = r#"[{"name":"Widget Co","url":"https://widget.example"}]"#;

        let competitors = Competitor::list_from_response("competitor-finder", reply)
            .unwrap_or_else(|e| panic!("decode failed: {e}"));

        assert_eq!(
            competitors,
            vec![Competitor {
                name: "Widget Co".into(),
                url: "https://widget.example".into(),
            }]
        );
    }

    #[test]
    fn analysis_serializes_camel_case() {
        let analysis = SiteAnalysis {
            website_summary: "s".into(),
            core_keywords: vec!["k".into()],
        };

        let json = serde_json::to_string(&analysis).unwrap_or_default();

        assert_eq!(json, r#"{"websiteSummary":"s","coreKeywords":["k"]}"#);
    }

    #[test]
    fn fence_without_info_string() {
        assert_eq!(strip_code_fence("```\n[]\n```"), "[]");
        assert_eq!(strip_code_fence("  {}  "), "{}");
        assert_eq!(strip_code_fence("```unterminated"), "```unterminated");
    }
}
