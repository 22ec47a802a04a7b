//! Google Places web service response types.
//!
//! Every response is a `{"status": "...", ...}` envelope. Fields the
//! normalizer can default are modelled as `Option` or `#[serde(default)]` so
//! a sparse payload still deserializes.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// details
// ---------------------------------------------------------------------------

/// Envelope for `details/json`.
#[derive(Debug, Deserialize)]
pub struct PlaceDetailsResponse {
    pub status: String,
    #[serde(default)]
    pub result: PlaceDetails,
}

/// The subset of place details requested through the `fields` parameter.
#[derive(Debug, Default, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub name: Option<String>,
    /// Aggregate star rating across all reviews, not just the returned page.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u64>,
    /// At most five reviews; the API does not paginate them.
    #[serde(default)]
    pub reviews: Vec<GoogleReview>,
}

/// A single review record as returned inside place details.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct GoogleReview {
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_url: Option<String>,
    #[serde(default)]
    pub profile_photo_url: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub relative_time_description: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// Unix epoch seconds.
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub translated: Option<bool>,
}

// ---------------------------------------------------------------------------
// textsearch
// ---------------------------------------------------------------------------

/// Envelope for `textsearch/json`.
#[derive(Debug, Deserialize)]
pub struct TextSearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<TextSearchResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TextSearchResult {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u64>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub business_status: Option<String>,
}
