//! Wikipedia REST API Data Transfer Objects
//!
//! These types match what `page/summary/{title}` returns.
//! DO NOT use these types outside the wikipedia module.
//!
//! API Reference: https://en.wikipedia.org/api/rest_v1/

use serde::{Deserialize, Serialize};

/// Page summary response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SummaryResponse {
    /// Page type ("standard", "disambiguation", ...)
    #[serde(rename = "type", default)]
    pub page_type: String,
    #[serde(default)]
    pub title: String,
    pub displaytitle: Option<String>,
    /// Plain-text lead section
    #[serde(default)]
    pub extract: String,
    pub extract_html: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_standard_summary() {
        let json = r#"{
            "type": "standard",
            "title": "Nirvana (band)",
            "displaytitle": "<span>Nirvana (band)</span>",
            "pageid": 21231,
            "extract": "Nirvana was an American rock band formed in Aberdeen, Washington, in 1987.",
            "extract_html": "<p><b>Nirvana</b> was an American rock band</p>",
            "lang": "en"
        }"#;

        let summary: SummaryResponse = serde_json::from_str(json).expect("Should parse summary");

        assert_eq!(summary.page_type, "standard");
        assert_eq!(summary.title, "Nirvana (band)");
        assert!(summary.extract.starts_with("Nirvana was"));
    }

    #[test]
    fn test_parse_summary_without_extract() {
        let json = r#"{"type": "disambiguation", "title": "Nirvana"}"#;
        let summary: SummaryResponse = serde_json::from_str(json).expect("Should parse");
        assert_eq!(summary.page_type, "disambiguation");
        assert!(summary.extract.is_empty());
        assert!(summary.extract_html.is_none());
    }
}
