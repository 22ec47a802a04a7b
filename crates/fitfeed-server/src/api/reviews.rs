use axum::{
    extract::{Query, State},
    Extension, Json,
};
use fitfeed_core::redact_prefix;
use fitfeed_places::{NormalizedReview, ReviewQuery, ReviewStats};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::middleware::RequestId;

use super::{map_places_error, ApiError, AppState, ResponseMeta};

const PLACE_ID_PREFIX_LEN: usize = 10;
const API_KEY_PREFIX_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub(super) struct ReviewsParams {
    /// Operator override of the configured place id, for trying a candidate
    /// before committing it to the environment.
    pub test_place_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ReviewsMeta {
    /// Always equals `data.len()`; compare `stats.totalReviews` for the
    /// upstream-wide count.
    total: usize,
    place_id: String,
    #[serde(flatten)]
    response: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub(super) struct ReviewsResponse {
    success: bool,
    data: Vec<NormalizedReview>,
    stats: ReviewStats,
    meta: ReviewsMeta,
}

pub(super) async fn get_reviews(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<ReviewsParams>,
) -> Result<Json<ReviewsResponse>, ApiError> {
    let config = &state.config;
    let override_id = params
        .test_place_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let place_id = override_id.or(config.google_place_id.as_deref());
    let api_key = config.google_places_api_key.as_deref();

    let debug = json!({
        "hasApiKey": api_key.is_some(),
        "hasPlaceId": place_id.is_some(),
        "placeIdOverride": override_id.is_some(),
        "placeId": place_id.map(|p| redact_prefix(p, PLACE_ID_PREFIX_LEN)),
        "apiKey": api_key.map(|k| redact_prefix(k, API_KEY_PREFIX_LEN)),
    });
    let expose_internal = config.is_development();

    let query = ReviewQuery::new(api_key, place_id, &config.reviews_language)
        .map_err(|e| map_places_error(req_id.0.clone(), &e, debug.clone(), expose_internal))?;

    tracing::info!(
        request_id = %req_id.0,
        place_id = %redact_prefix(query.place_id(), PLACE_ID_PREFIX_LEN),
        overridden = override_id.is_some(),
        "serving reviews"
    );

    let feed = state
        .places
        .fetch_reviews(&query)
        .await
        .map_err(|e| map_places_error(req_id.0.clone(), &e, debug, expose_internal))?;

    Ok(Json(ReviewsResponse {
        success: true,
        meta: ReviewsMeta {
            total: feed.reviews.len(),
            place_id: redact_prefix(query.place_id(), PLACE_ID_PREFIX_LEN),
            response: ResponseMeta::new(req_id.0),
        },
        data: feed.reviews,
        stats: feed.stats,
    }))
}
