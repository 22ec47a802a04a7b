use axum::{extract::State, Extension, Json};
use fitfeed_core::redact_prefix;
use fitfeed_instagram::{MediaItem, MediaQuery};
use serde::Serialize;
use serde_json::json;

use crate::middleware::RequestId;

use super::{map_instagram_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MediaMeta {
    total: usize,
    /// Like/comment counts in `data` are generated placeholders.
    synthetic_engagement: bool,
    #[serde(flatten)]
    response: ResponseMeta,
}

pub(super) async fn get_media(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<MediaItem>, MediaMeta>>, ApiError> {
    let config = &state.config;
    let token = config.instagram_access_token.as_deref();
    let user_id = config.instagram_user_id.as_deref();

    let debug = json!({
        "hasAccessToken": token.is_some(),
        "hasUserId": user_id.is_some(),
        "accessToken": token.map(|t| redact_prefix(t, 6)),
    });
    let expose_internal = config.is_development();

    let query = MediaQuery::new(token, user_id, config.instagram_media_limit)
        .map_err(|e| map_instagram_error(req_id.0.clone(), &e, debug.clone(), expose_internal))?;

    let items = state
        .instagram
        .fetch_media_feed(&query)
        .await
        .map_err(|e| map_instagram_error(req_id.0.clone(), &e, debug, expose_internal))?;

    Ok(Json(ApiResponse {
        success: true,
        meta: MediaMeta {
            total: items.len(),
            synthetic_engagement: true,
            response: ResponseMeta::new(req_id.0),
        },
        data: items,
    }))
}
