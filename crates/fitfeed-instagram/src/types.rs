//! Instagram Graph API response types for `/{user-id}/media`.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct MediaListResponse {
    #[serde(default)]
    pub data: Vec<GraphMedia>,
}

/// One media object. Which fields are present depends on the requested
/// `fields` and the media type; a record missing any of them still maps.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct GraphMedia {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub caption: Option<String>,
    /// `IMAGE`, `VIDEO` or `CAROUSEL_ALBUM`.
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub media_url: Option<String>,
    /// Only present for videos.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
    /// ISO 8601, e.g. `2024-04-02T18:30:00+0000`.
    #[serde(default)]
    pub timestamp: Option<String>,
}
