//! Maps Graph media objects onto the gallery contract.

use rand::Rng;
use serde::Serialize;

use crate::engagement::synthetic_engagement;
use crate::types::GraphMedia;

/// A gallery item as served to the frontend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    pub caption: String,
    pub media_type: String,
    pub media_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub permalink: String,
    pub timestamp: String,
    /// Placeholder, see [`crate::engagement`].
    pub like_count: u32,
    /// Placeholder, see [`crate::engagement`].
    pub comment_count: u32,
    /// Always `true`: the counts above are generated, not fetched.
    pub engagement_is_synthetic: bool,
}

/// Maps one Graph media object, attaching placeholder engagement drawn from `rng`.
pub fn normalize_media<R: Rng>(media: GraphMedia, rng: &mut R) -> MediaItem {
    let engagement = synthetic_engagement(rng);
    MediaItem {
        id: media.id,
        caption: media.caption.unwrap_or_default(),
        media_type: media.media_type.unwrap_or_else(|| "IMAGE".to_owned()),
        media_url: media.media_url.unwrap_or_default(),
        thumbnail_url: media.thumbnail_url.filter(|s| !s.is_empty()),
        permalink: media.permalink.unwrap_or_default(),
        timestamp: media.timestamp.unwrap_or_default(),
        like_count: engagement.like_count,
        comment_count: engagement.comment_count,
        engagement_is_synthetic: true,
    }
}
