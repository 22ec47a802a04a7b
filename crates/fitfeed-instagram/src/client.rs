//! HTTP client for the Instagram Graph media listing.

use std::time::Duration;

use fitfeed_core::config::DEFAULT_INSTAGRAM_API_BASE_URL;
use fitfeed_core::redact_prefix;
use reqwest::{Client, Url};

use crate::error::InstagramError;
use crate::normalize::{normalize_media, MediaItem};
use crate::query::MediaQuery;
use crate::types::MediaListResponse;

const MEDIA_FIELDS: &str = "id,caption,media_type,media_url,thumbnail_url,permalink,timestamp";

/// Client for `GET /{user-id}/media`.
///
/// One upstream call per fetch, no retry, no caching.
pub struct InstagramClient {
    client: Client,
    base_url: Url,
}

impl InstagramClient {
    /// # Errors
    ///
    /// Returns [`InstagramError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, InstagramError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_INSTAGRAM_API_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`InstagramError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`InstagramError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute hierarchical URL.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, InstagramError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()
            .map_err(InstagramError::Http)?;

        let parsed =
            Url::parse(base_url.trim_end_matches('/')).map_err(|e| InstagramError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            })?;
        if parsed.cannot_be_a_base() {
            return Err(InstagramError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Fetches the most recent media for `query.user_id()`, newest first as
    /// returned upstream, with placeholder engagement attached.
    ///
    /// # Errors
    ///
    /// - [`InstagramError::UpstreamHttp`] on a non-2xx status (status preserved).
    /// - [`InstagramError::UpstreamApi`] if a 200 payload carries an `error` object.
    /// - [`InstagramError::Http`] on network failure or timeout.
    /// - [`InstagramError::Deserialize`] if the body does not match the expected shape.
    pub async fn fetch_media_feed(&self, query: &MediaQuery) -> Result<Vec<MediaItem>, InstagramError> {
        let url = self.media_url(query)?;

        tracing::info!(
            user_id = %redact_prefix(query.user_id(), 6),
            access_token = %redact_prefix(query.access_token(), 6),
            limit = query.limit(),
            "fetching instagram media"
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| InstagramError::Http(e.without_url()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| InstagramError::Http(e.without_url()))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Instagram API request failed");
            return Err(InstagramError::UpstreamHttp {
                status: status.as_u16(),
                body,
            });
        }

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| InstagramError::Deserialize {
                context: "media list".to_owned(),
                source: e,
            })?;
        check_api_error(&value)?;

        let listing: MediaListResponse =
            serde_json::from_value(value).map_err(|e| InstagramError::Deserialize {
                context: "media list".to_owned(),
                source: e,
            })?;

        let items = normalize_listing(listing);
        tracing::info!(items = items.len(), "instagram media fetched");
        Ok(items)
    }

    /// `{base}/{user_id}/media?fields=..&limit=..&access_token=..`
    fn media_url(&self, query: &MediaQuery) -> Result<Url, InstagramError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| InstagramError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: "URL cannot be used as a base".to_owned(),
            })?
            .pop_if_empty()
            .push(query.user_id())
            .push("media");
        url.query_pairs_mut()
            .append_pair("fields", MEDIA_FIELDS)
            .append_pair("limit", &query.limit().to_string())
            .append_pair("access_token", query.access_token());
        Ok(url)
    }
}

/// Kept synchronous so the thread-local RNG never lives across an `.await`.
fn normalize_listing(listing: MediaListResponse) -> Vec<MediaItem> {
    let mut rng = rand::rng();
    listing
        .data
        .into_iter()
        .map(|media| normalize_media(media, &mut rng))
        .collect()
}

fn check_api_error(body: &serde_json::Value) -> Result<(), InstagramError> {
    let Some(error) = body.get("error") else {
        return Ok(());
    };
    let field = |name: &str| {
        error
            .get(name)
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned)
    };
    let status = field("type").unwrap_or_else(|| "UnknownError".to_owned());
    let message = field("message").unwrap_or_else(|| "no error message returned".to_owned());
    tracing::warn!(status = %status, message = %message, "Instagram API reported an error");
    Err(InstagramError::UpstreamApi { status, message })
}
