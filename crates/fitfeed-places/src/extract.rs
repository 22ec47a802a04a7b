//! Place identifier extraction from Google Maps URLs.
//!
//! Pure string matching with no I/O. Three patterns are tried in fixed
//! priority order; the first that matches supplies the identifier, and every
//! match is still reported so an operator can compare them.

use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;
use serde::Serialize;

/// Prefix turning a Knowledge Graph short id into a candidate place id.
pub const KNOWLEDGE_GRAPH_PREFIX: &str = "ChIJ";

static FTID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ftid=([^&#]+)").expect("valid ftid regex"));

// Unanchored on purpose: also matches `query_place_id=` in search links.
static PLACE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"place_id=([^&#]+)").expect("valid place_id regex"));

// `!16s/g/<id>` inside the data blob, raw or percent-encoded.
static KNOWLEDGE_GRAPH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)16s(?:/|%2F)g(?:/|%2F)([A-Za-z0-9_-]+)").expect("valid knowledge graph regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    Ftid,
    PlaceIdParam,
    KnowledgeGraphId,
    NotFound,
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionMethod::Ftid => write!(f, "ftid"),
            ExtractionMethod::PlaceIdParam => write!(f, "place_id_param"),
            ExtractionMethod::KnowledgeGraphId => write!(f, "knowledge_graph_id"),
            ExtractionMethod::NotFound => write!(f, "not_found"),
        }
    }
}

/// One pattern that matched, with the identifier it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionMatch {
    pub method: ExtractionMethod,
    pub place_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub place_id: Option<String>,
    pub method: ExtractionMethod,
    /// All matches in priority order; the first one is the winner.
    pub matches: Vec<ExtractionMatch>,
}

impl ExtractionResult {
    #[must_use]
    pub fn is_found(&self) -> bool {
        self.method != ExtractionMethod::NotFound
    }
}

/// Extracts a place identifier from a Google Maps URL.
///
/// Priority: `ftid=` parameter, then `place_id=` parameter, then a Knowledge
/// Graph short id (`16s/g/<id>`) converted with [`KNOWLEDGE_GRAPH_PREFIX`].
#[must_use]
pub fn extract_from_url(url: &str) -> ExtractionResult {
    let mut matches = Vec::new();

    if let Some(value) = capture(&FTID_RE, url) {
        matches.push(ExtractionMatch {
            method: ExtractionMethod::Ftid,
            place_id: value,
        });
    }
    if let Some(value) = capture(&PLACE_ID_RE, url) {
        matches.push(ExtractionMatch {
            method: ExtractionMethod::PlaceIdParam,
            place_id: value,
        });
    }
    if let Some(value) = capture(&KNOWLEDGE_GRAPH_RE, url) {
        matches.push(ExtractionMatch {
            method: ExtractionMethod::KnowledgeGraphId,
            place_id: format!("{KNOWLEDGE_GRAPH_PREFIX}{value}"),
        });
    }

    let (place_id, method) = matches.first().map_or((None, ExtractionMethod::NotFound), |m| {
        (Some(m.place_id.clone()), m.method)
    });

    ExtractionResult {
        place_id,
        method,
        matches,
    }
}

fn capture(re: &Regex, haystack: &str) -> Option<String> {
    let raw = re.captures(haystack)?.get(1)?.as_str();
    let decoded = percent_decode_str(raw).decode_utf8_lossy().into_owned();
    Some(decoded).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_ftid() {
        let result = extract_from_url("https://www.google.com/maps?ftid=ABC123&hl=de");
        assert_eq!(result.method, ExtractionMethod::Ftid);
        assert_eq!(result.place_id.as_deref(), Some("ABC123"));
    }

    #[test]
    fn ftid_wins_over_later_place_id_param() {
        let result =
            extract_from_url("https://www.google.com/maps?ftid=ABC123&place_id=ChIJother");
        assert_eq!(result.method, ExtractionMethod::Ftid);
        assert_eq!(result.place_id.as_deref(), Some("ABC123"));
        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.matches[1].method, ExtractionMethod::PlaceIdParam);
        assert_eq!(result.matches[1].place_id, "ChIJother");
    }

    #[test]
    fn extracts_place_id_param() {
        let result = extract_from_url(
            "https://www.google.com/maps/search/?api=1&query=Studio&query_place_id=ChIJN1t_tDeuEmsRUsoyG83frY4",
        );
        assert_eq!(result.method, ExtractionMethod::PlaceIdParam);
        assert_eq!(
            result.place_id.as_deref(),
            Some("ChIJN1t_tDeuEmsRUsoyG83frY4")
        );
    }

    #[test]
    fn extracts_knowledge_graph_id_with_prefix() {
        let result = extract_from_url(
            "https://www.google.com/maps/place/Studio/@52.5,13.4,17z/data=!3m1!4b1!4m6!3m5!1s0x0:0x0!8m2!3d52.5!4d13.4!16s/g/11c5xyz_ab?entry=ttu",
        );
        assert_eq!(result.method, ExtractionMethod::KnowledgeGraphId);
        assert_eq!(result.place_id.as_deref(), Some("ChIJ11c5xyz_ab"));
    }

    #[test]
    fn extracts_percent_encoded_knowledge_graph_id() {
        let result = extract_from_url("https://www.google.com/maps/place/data=!16s%2Fg%2F11abcDEF");
        assert_eq!(result.method, ExtractionMethod::KnowledgeGraphId);
        assert_eq!(result.place_id.as_deref(), Some("ChIJ11abcDEF"));
    }

    #[test]
    fn decodes_percent_encoded_ftid() {
        let result = extract_from_url("https://maps.google.com/?ftid=0x47a851%3A0x9b1e");
        assert_eq!(result.place_id.as_deref(), Some("0x47a851:0x9b1e"));
    }

    #[test]
    fn returns_not_found_without_patterns() {
        let result = extract_from_url("https://www.google.com/maps/@52.52,13.40,15z");
        assert_eq!(result.method, ExtractionMethod::NotFound);
        assert!(result.place_id.is_none());
        assert!(result.matches.is_empty());
        assert!(!result.is_found());
    }

    #[test]
    fn empty_parameter_value_is_not_a_match() {
        let result = extract_from_url("https://www.google.com/maps?ftid=&place_id=ChIJabc");
        assert_eq!(result.method, ExtractionMethod::PlaceIdParam);
        assert_eq!(result.place_id.as_deref(), Some("ChIJabc"));
    }

    #[test]
    fn method_serializes_as_snake_case() {
        let json = serde_json::to_value(extract_from_url("no patterns here")).unwrap();
        assert_eq!(json["method"], "not_found");
        assert!(json["placeId"].is_null());
    }
}
