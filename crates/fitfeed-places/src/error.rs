use thiserror::Error;

/// Errors returned by the Google Places client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// A required credential or identifier was not configured.
    #[error("missing configuration: {}", missing.join(", "))]
    Configuration { missing: Vec<&'static str> },

    /// The upstream answered with a non-2xx HTTP status.
    #[error("Google API returned HTTP {status}")]
    UpstreamHttp { status: u16, body: String },

    /// HTTP 200, but the payload's own `status` field reports a failure.
    #[error("Google Places API error {status}: {message}")]
    UpstreamApi { status: String, message: String },

    /// Network or TLS failure. The request URL is stripped since it carries the key.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl PlacesError {
    /// Operator-facing remediation text for the failures that have one.
    #[must_use]
    pub fn remediation_hint(&self) -> Option<&'static str> {
        match self {
            PlacesError::Configuration { .. } => Some(
                "set GOOGLE_PLACES_API_KEY and GOOGLE_PLACE_ID in the server environment",
            ),
            PlacesError::UpstreamHttp { status: 400, .. } => Some(
                "the place identifier is invalid or expired; re-resolve it with `fitfeed-cli locate`",
            ),
            PlacesError::UpstreamHttp {
                status: 401 | 403, ..
            } => Some("the API key is invalid or lacks permission for the Places API"),
            PlacesError::UpstreamHttp { status: 429, .. } => {
                Some("the Places API quota is exhausted; retry later or raise the quota")
            }
            PlacesError::UpstreamApi { status, .. } => match status.as_str() {
                "INVALID_REQUEST" | "NOT_FOUND" => Some(
                    "the place identifier is invalid or expired; re-resolve it with `fitfeed-cli locate`",
                ),
                "REQUEST_DENIED" => {
                    Some("the API key is invalid or the Places API is not enabled for it")
                }
                "OVER_QUERY_LIMIT" => {
                    Some("the Places API quota is exhausted; retry later or raise the quota")
                }
                _ => None,
            },
            _ => None,
        }
    }
}

/// Errors returned by the Place ID resolver tooling.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("could not resolve redirect for {url}: {source}")]
    RedirectResolution {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("no place candidates found for queries {tried_queries:?}")]
    NoCandidatesFound { tried_queries: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_hint_mentions_invalid_identifier() {
        let err = PlacesError::UpstreamHttp {
            status: 400,
            body: String::new(),
        };
        assert!(err
            .remediation_hint()
            .is_some_and(|h| h.contains("invalid or expired")));
    }

    #[test]
    fn permission_hint_differs_from_bad_request_hint() {
        let bad_request = PlacesError::UpstreamHttp {
            status: 400,
            body: String::new(),
        };
        let forbidden = PlacesError::UpstreamHttp {
            status: 403,
            body: String::new(),
        };
        assert_ne!(bad_request.remediation_hint(), forbidden.remediation_hint());
    }

    #[test]
    fn server_error_has_no_hint() {
        let err = PlacesError::UpstreamHttp {
            status: 503,
            body: String::new(),
        };
        assert!(err.remediation_hint().is_none());
    }

    #[test]
    fn configuration_error_lists_missing_settings() {
        let err = PlacesError::Configuration {
            missing: vec!["api_key", "place_id"],
        };
        assert_eq!(err.to_string(), "missing configuration: api_key, place_id");
    }
}
