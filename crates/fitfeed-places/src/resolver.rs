//! Operator-side Place ID discovery.
//!
//! Combines short-link resolution, URL extraction and an ordered text-search
//! fallback. Searches run strictly one query at a time: the next query is
//! only issued once the previous one came back empty or failed, so the
//! first query (in declared order) with results always wins.

use fitfeed_core::redact_prefix;
use reqwest::Url;
use serde::Serialize;

use crate::client::PlacesClient;
use crate::error::ResolverError;
use crate::extract::{extract_from_url, ExtractionResult};
use crate::normalize::PlaceCandidate;

/// Hosts whose links must be expanded before extraction.
const SHORT_LINK_HOSTS: &[&str] = &["maps.app.goo.gl", "goo.gl", "g.page", "g.co"];

/// Result of [`PlaceResolver::search_candidates`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    pub matched_query: String,
    pub tried_queries: Vec<String>,
    pub candidates: Vec<PlaceCandidate>,
}

impl SearchOutcome {
    /// The first candidate in upstream order. Not necessarily the best rated
    /// or the closest match.
    #[must_use]
    pub fn recommended_place_id(&self) -> Option<&str> {
        self.candidates.first().map(|c| c.place_id.as_str())
    }
}

/// Result of [`PlaceResolver::locate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocateOutcome {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_url: Option<String>,
    pub extraction: ExtractionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchOutcome>,
}

impl LocateOutcome {
    /// Extraction wins over search; search is only consulted when extraction
    /// found nothing.
    #[must_use]
    pub fn recommended_place_id(&self) -> Option<&str> {
        self.extraction
            .place_id
            .as_deref()
            .or_else(|| self.search.as_ref()?.recommended_place_id())
    }
}

/// Returns `true` for Google share links that redirect to a full Maps URL.
#[must_use]
pub fn is_short_link(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
        .is_some_and(|host| SHORT_LINK_HOSTS.contains(&host.as_str()))
}

pub struct PlaceResolver {
    client: PlacesClient,
    api_key: String,
}

impl PlaceResolver {
    #[must_use]
    pub fn new(client: PlacesClient, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
        }
    }

    /// Expands a share link to the full Maps URL it redirects to.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError::RedirectResolution`] on network failure.
    pub async fn resolve_short_link(&self, short_url: &str) -> Result<String, ResolverError> {
        self.client.resolve_short_link(short_url).await
    }

    /// Tries each query in order and stops at the first that yields at least
    /// one candidate.
    ///
    /// A failed upstream call counts as "no results" for that query; the
    /// search moves on rather than aborting.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError::NoCandidatesFound`] listing every query tried
    /// when none produced a candidate (including when `queries` is empty).
    pub async fn search_candidates<S: AsRef<str>>(
        &self,
        queries: &[S],
    ) -> Result<SearchOutcome, ResolverError> {
        let mut tried_queries = Vec::with_capacity(queries.len());

        for (index, query) in queries.iter().enumerate() {
            let query = query.as_ref();
            tried_queries.push(query.to_owned());
            tracing::info!(index, query, "trying place search query");

            let candidates = match self.client.text_search(&self.api_key, query).await {
                Ok(candidates) => candidates,
                Err(e) => {
                    tracing::warn!(index, query, error = %e, "place search failed; trying next query");
                    continue;
                }
            };

            if candidates.is_empty() {
                tracing::info!(index, query, "no candidates for query");
                continue;
            }

            tracing::info!(
                index,
                query,
                candidates = candidates.len(),
                recommended = %redact_prefix(&candidates[0].place_id, 12),
                "place candidates found"
            );
            return Ok(SearchOutcome {
                matched_query: query.to_owned(),
                tried_queries,
                candidates,
            });
        }

        tracing::warn!(tried = tried_queries.len(), "all place search queries exhausted");
        Err(ResolverError::NoCandidatesFound { tried_queries })
    }

    /// Full operator pipeline: expand a share link if needed, extract from
    /// the URL, and fall back to `fallback_queries` when extraction finds
    /// nothing.
    ///
    /// With no fallback queries a `not_found` extraction is returned as is;
    /// the operator decides what to try next.
    ///
    /// # Errors
    ///
    /// - [`ResolverError::RedirectResolution`] if a share link cannot be expanded.
    /// - [`ResolverError::NoCandidatesFound`] if the fallback search comes up empty.
    pub async fn locate<S: AsRef<str>>(
        &self,
        input: &str,
        fallback_queries: &[S],
    ) -> Result<LocateOutcome, ResolverError> {
        let resolved_url = if is_short_link(input) {
            Some(self.resolve_short_link(input).await?)
        } else {
            None
        };

        let extraction = extract_from_url(resolved_url.as_deref().unwrap_or(input));
        tracing::info!(method = %extraction.method, "url extraction finished");

        let search = if extraction.is_found() || fallback_queries.is_empty() {
            None
        } else {
            Some(self.search_candidates(fallback_queries).await?)
        };

        Ok(LocateOutcome {
            input: input.to_owned(),
            resolved_url,
            extraction,
            search,
        })
    }
}
