use seo_scout::{extract, extract_html, DocumentTree, ExtractedPageData, FetchOrigin, SiteAnalysis};
use serde_json::Value;

const PAGE: &str = r#"<html><head>
<title>Acme</title>
<meta name="description" content="We sell widgets">
<link rel="canonical" href="https://acme.example/">
<script type="application/ld+json">{"@type":"Organization"}</script>
</head><body><h1>Welcome</h1><h2>Range</h2><a href="/shop">Shop</a></body></html>"#;

fn to_value(page: &ExtractedPageData) -> Value {
    let json = page.to_json().unwrap_or_else(|e| panic!("serialize failed: {e}"));
    serde_json::from_str(&json).unwrap_or_else(|e| panic!("invalid JSON: {e}"))
}

#[test]
fn static_record_uses_camel_case_and_omits_page_content() {
    let value = to_value(&extract_html(PAGE, "https://acme.example/"));

    assert_eq!(value["title"], "Acme");
    assert_eq!(value["canonical"], "https://acme.example/");
    assert_eq!(value["seoScore"]["h1Count"], 1);
    assert_eq!(value["seoScore"]["metaDescriptionLength"], 15);
    assert_eq!(value["seoScore"]["missingH1"], false);
    assert_eq!(value["metaTags"][0]["name"], "description");
    assert_eq!(value["scripts"][0]["type"], "application/ld+json");
    assert_eq!(value["headers"]["h2"][0], "Range");
    assert!(value.get("links").is_none());
    assert!(value.get("wordCount").is_none());
    assert!(value.get("bodyText").is_none());
}

#[test]
fn missing_canonical_serializes_as_null() {
    let value = to_value(&extract_html("<title>x</title>", "https://acme.example/"));

    assert!(value["canonical"].is_null());
}

#[test]
fn rendered_record_round_trips() {
    let tree = DocumentTree::parse(PAGE, "https://acme.example/", FetchOrigin::Rendered);
    let page = extract(&tree, "https://acme.example/");

    let json = page.to_json_pretty().unwrap_or_else(|e| panic!("serialize failed: {e}"));
    let back = ExtractedPageData::from_json(&json).unwrap_or_else(|e| panic!("deserialize failed: {e}"));

    assert_eq!(back, page);
    assert_eq!(back.links.as_ref().map(Vec::len), Some(1));
}

#[test]
fn static_record_round_trips() {
    let page = extract_html(PAGE, "https://acme.example/");

    let back = page
        .to_json()
        .and_then(|json| ExtractedPageData::from_json(&json))
        .unwrap_or_else(|e| panic!("round trip failed: {e}"));

    assert_eq!(back, page);
}

#[test]
fn malformed_record_is_a_serialization_error() {
    let err = ExtractedPageData::from_json("{\"url\": 3}").err();

    assert!(matches!(err, Some(seo_scout::Error::Serialization(_))));
}

#[test]
fn analysis_reply_decodes_for_downstream_use() {
    let reply = r#"{"websiteSummary":"Acme sells widgets.","coreKeywords":["widgets","workshop","schools"]}"#;

    let analysis = SiteAnalysis::from_response("site-analyzer", reply)
        .unwrap_or_else(|e| panic!("decode failed: {e}"));

    assert_eq!(analysis.core_keywords.len(), 3);
}
