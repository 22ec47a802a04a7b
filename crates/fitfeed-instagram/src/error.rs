use thiserror::Error;

/// Errors returned by the Instagram Graph client.
#[derive(Debug, Error)]
pub enum InstagramError {
    #[error("missing configuration: {}", missing.join(", "))]
    Configuration { missing: Vec<&'static str> },

    #[error("Instagram API returned HTTP {status}")]
    UpstreamHttp { status: u16, body: String },

    /// HTTP 200 with an `error` object in the payload.
    #[error("Instagram API error {status}: {message}")]
    UpstreamApi { status: String, message: String },

    /// Network or TLS failure. The request URL is stripped since it carries the token.
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

impl InstagramError {
    #[must_use]
    pub fn remediation_hint(&self) -> Option<&'static str> {
        match self {
            InstagramError::Configuration { .. } => Some(
                "set INSTAGRAM_ACCESS_TOKEN and INSTAGRAM_USER_ID in the server environment",
            ),
            InstagramError::UpstreamHttp {
                status: 400 | 401, ..
            } => Some("the access token is invalid or expired; generate a new long-lived token"),
            InstagramError::UpstreamHttp { status: 403, .. } => {
                Some("the access token lacks the instagram_graph_user_media permission")
            }
            InstagramError::UpstreamHttp { status: 429, .. } => {
                Some("the Instagram rate limit was hit; retry later")
            }
            InstagramError::UpstreamApi { status, .. } if status == "OAuthException" => {
                Some("the access token is invalid or expired; generate a new long-lived token")
            }
            _ => None,
        }
    }
}
