//! Place-ID command handlers for the CLI.
//!
//! Every handler prints a single pretty-printed JSON document on stdout.
//! `extract` runs offline; the others call Google and need
//! `GOOGLE_PLACES_API_KEY`, except `resolve`, which only follows redirects.

use fitfeed_core::AppConfig;
use fitfeed_places::{
    extract_from_url, PlaceResolver, PlacesClient, PlacesError, ReviewFeedResult, ReviewQuery,
};
use serde::Serialize;

/// Summary printed by `verify`.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifyReport {
    pub place_id: String,
    pub business_name: String,
    pub average_rating: f64,
    pub total_reviews: u64,
    pub returned_reviews: usize,
}

impl VerifyReport {
    pub(crate) fn from_feed(place_id: &str, feed: &ReviewFeedResult) -> Self {
        Self {
            place_id: place_id.to_owned(),
            business_name: feed.stats.business_name.clone(),
            average_rating: feed.stats.average_rating,
            total_reviews: feed.stats.total_review_count,
            returned_reviews: feed.reviews.len(),
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn build_client(config: &AppConfig) -> anyhow::Result<PlacesClient> {
    PlacesClient::with_base_url(
        config.upstream_timeout_secs,
        &config.user_agent,
        &config.google_api_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build Google Places client: {e}"))
}

fn build_resolver(config: &AppConfig) -> anyhow::Result<PlaceResolver> {
    let api_key = config
        .google_places_api_key
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("GOOGLE_PLACES_API_KEY is not set; cannot search places"))?;
    Ok(PlaceResolver::new(build_client(config)?, api_key))
}

/// Attaches the remediation hint, when there is one, to a Places error.
fn explain(error: &PlacesError) -> anyhow::Error {
    match error.remediation_hint() {
        Some(hint) => anyhow::anyhow!("{error} (hint: {hint})"),
        None => anyhow::anyhow!("{error}"),
    }
}

pub(crate) fn run_extract(url: &str) -> anyhow::Result<()> {
    let result = extract_from_url(url);
    if !result.is_found() {
        tracing::warn!("no place identifier found in URL; try `locate` with --query");
    }
    print_json(&result)
}

pub(crate) async fn run_resolve(config: &AppConfig, short_url: &str) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let full_url = client.resolve_short_link(short_url).await?;
    print_json(&serde_json::json!({
        "input": short_url,
        "resolvedUrl": full_url,
        "extraction": extract_from_url(&full_url),
    }))
}

pub(crate) async fn run_search(config: &AppConfig, queries: &[String]) -> anyhow::Result<()> {
    let resolver = build_resolver(config)?;
    let outcome = resolver.search_candidates(queries).await?;
    print_json(&serde_json::json!({
        "recommendedPlaceId": outcome.recommended_place_id(),
        "outcome": outcome,
    }))
}

pub(crate) async fn run_locate(
    config: &AppConfig,
    url: &str,
    queries: &[String],
) -> anyhow::Result<()> {
    let resolver = build_resolver(config)?;
    let outcome = resolver.locate(url, queries).await?;
    if outcome.recommended_place_id().is_none() {
        tracing::warn!("no place identifier located; add --query with the business name");
    }
    print_json(&serde_json::json!({
        "recommendedPlaceId": outcome.recommended_place_id(),
        "outcome": outcome,
    }))
}

/// Fetches details for `place_id` (or the configured `GOOGLE_PLACE_ID`) the
/// same way the reviews endpoint does.
pub(crate) async fn run_verify(config: &AppConfig, place_id: Option<&str>) -> anyhow::Result<()> {
    let place_id = place_id.or(config.google_place_id.as_deref());
    let query = ReviewQuery::new(
        config.google_places_api_key.as_deref(),
        place_id,
        &config.reviews_language,
    )
    .map_err(|e| explain(&e))?;

    let client = build_client(config)?;
    let feed = client.fetch_reviews(&query).await.map_err(|e| explain(&e))?;

    print_json(&VerifyReport::from_feed(query.place_id(), &feed))
}
