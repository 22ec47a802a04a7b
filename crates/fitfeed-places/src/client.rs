//! HTTP client for the Google Places web service.
//!
//! Wraps `reqwest` with Places-specific status handling: non-2xx responses
//! surface as [`PlacesError::UpstreamHttp`], while failures Google reports
//! inside an HTTP 200 envelope surface as [`PlacesError::UpstreamApi`].
//! Nothing is retried or cached; each call hits the upstream once.

use std::time::Duration;

use fitfeed_core::config::DEFAULT_GOOGLE_API_BASE_URL;
use fitfeed_core::redact_prefix;
use reqwest::{Client, Url};

use crate::error::{PlacesError, ResolverError};
use crate::normalize::{normalize_candidate, normalize_feed, PlaceCandidate, ReviewFeedResult};
use crate::query::ReviewQuery;
use crate::types::{PlaceDetailsResponse, TextSearchResponse};

/// Fields requested from `details/json`; anything else is billed but unused.
const DETAILS_FIELDS: &str = "name,rating,user_ratings_total,reviews";

/// Characters of an identifier or key that may appear in logs.
const LOG_PREFIX_LEN: usize = 8;

/// Client for the Google Places web service.
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    details_url: Url,
    text_search_url: Url,
}

impl PlacesClient {
    /// Creates a client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_GOOGLE_API_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// `timeout_secs` bounds every call, including redirect resolution.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`PlacesError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()
            .map_err(PlacesError::Http)?;

        // Exactly one trailing slash, so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let invalid = |reason: String| PlacesError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason,
        };
        let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
        let details_url = base
            .join("details/json")
            .map_err(|e| invalid(e.to_string()))?;
        let text_search_url = base
            .join("textsearch/json")
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            client,
            details_url,
            text_search_url,
        })
    }

    /// Fetches the reviews and rating aggregates for `query.place_id()`.
    ///
    /// Exactly one upstream request is made.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::UpstreamHttp`] on a non-2xx status (status preserved).
    /// - [`PlacesError::UpstreamApi`] if the envelope `status` is not `OK`.
    /// - [`PlacesError::Http`] on network failure or timeout.
    /// - [`PlacesError::Deserialize`] if the body does not match the expected shape.
    pub async fn fetch_reviews(&self, query: &ReviewQuery) -> Result<ReviewFeedResult, PlacesError> {
        let mut params = vec![
            ("place_id", query.place_id()),
            ("fields", DETAILS_FIELDS),
        ];
        if !query.language().is_empty() {
            params.push(("language", query.language()));
        }
        let url = build_url(&self.details_url, query.api_key(), &params);

        tracing::info!(
            place_id = %redact_prefix(query.place_id(), LOG_PREFIX_LEN),
            api_key = %redact_prefix(query.api_key(), LOG_PREFIX_LEN),
            language = query.language(),
            "fetching place reviews"
        );

        let body = self.request_json(&url, "place details").await?;
        check_api_status(&body, &["OK"])?;

        let envelope: PlaceDetailsResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: "place details".to_owned(),
                source: e,
            })?;

        let feed = normalize_feed(envelope.result);
        tracing::info!(
            status = %envelope.status,
            reviews = feed.reviews.len(),
            total_reviews = feed.stats.total_review_count,
            "place reviews fetched"
        );
        Ok(feed)
    }

    /// Runs one text search and returns candidates in upstream relevance order.
    ///
    /// `ZERO_RESULTS` is a successful empty answer, not an error.
    ///
    /// # Errors
    ///
    /// Same variants as [`PlacesClient::fetch_reviews`].
    pub async fn text_search(
        &self,
        api_key: &str,
        query: &str,
    ) -> Result<Vec<PlaceCandidate>, PlacesError> {
        let url = build_url(&self.text_search_url, api_key, &[("query", query)]);
        tracing::debug!(query, "running place text search");

        let body = self.request_json(&url, "text search").await?;
        check_api_status(&body, &["OK", "ZERO_RESULTS"])?;

        let envelope: TextSearchResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("text search(query={query})"),
                source: e,
            })?;

        Ok(envelope
            .results
            .into_iter()
            .filter_map(normalize_candidate)
            .collect())
    }

    /// Follows redirects from a share link with a `HEAD` request and returns
    /// the final address. The final status is not inspected.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError::RedirectResolution`] on network failure,
    /// timeout, too many redirects, or an unparseable URL.
    pub async fn resolve_short_link(&self, short_url: &str) -> Result<String, ResolverError> {
        let response = self.client.head(short_url).send().await.map_err(|e| {
            ResolverError::RedirectResolution {
                url: short_url.to_owned(),
                source: e,
            }
        })?;

        let resolved = response.url().to_string();
        tracing::debug!(short_url, resolved = %resolved, status = %response.status(), "resolved short link");
        Ok(resolved)
    }

    /// Sends a GET request, maps a non-2xx status to
    /// [`PlacesError::UpstreamHttp`], and parses the body as JSON.
    async fn request_json(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<serde_json::Value, PlacesError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| PlacesError::Http(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PlacesError::Http(e.without_url()))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), context, "Google API request failed");
            return Err(PlacesError::UpstreamHttp {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// Appends the key and parameters to an endpoint URL, percent-encoding values.
fn build_url(endpoint: &Url, api_key: &str, extra: &[(&str, &str)]) -> Url {
    let mut url = endpoint.clone();
    {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in extra {
            pairs.append_pair(k, v);
        }
        pairs.append_pair("key", api_key);
    }
    url
}

/// Checks the envelope `status` field against the accepted values.
fn check_api_status(body: &serde_json::Value, accepted: &[&str]) -> Result<(), PlacesError> {
    let status = body
        .get("status")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("UNKNOWN");

    if accepted.contains(&status) {
        return Ok(());
    }

    let message = body
        .get("error_message")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("no error message returned")
        .to_owned();
    tracing::warn!(status, message = %message, "Google Places API reported an error");
    Err(PlacesError::UpstreamApi {
        status: status.to_owned(),
        message,
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
