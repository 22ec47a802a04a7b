mod instagram;
mod reviews;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use fitfeed_core::AppConfig;
use fitfeed_instagram::{InstagramClient, InstagramError};
use fitfeed_places::{PlacesClient, PlacesError};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id;

/// Upstream bodies echoed into `debug` are cut to this many characters.
const MAX_DEBUG_BODY_CHARS: usize = 500;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub places: Arc<PlacesClient>,
    pub instagram: Arc<InstagramClient>,
}

impl AppState {
    /// Builds the upstream clients once from process configuration.
    pub fn from_config(config: Arc<AppConfig>) -> anyhow::Result<Self> {
        let places = PlacesClient::with_base_url(
            config.upstream_timeout_secs,
            &config.user_agent,
            &config.google_api_base_url,
        )?;
        let instagram = InstagramClient::with_base_url(
            config.upstream_timeout_secs,
            &config.user_agent,
            &config.instagram_api_base_url,
        )?;
        Ok(Self {
            config,
            places: Arc::new(places),
            instagram: Arc::new(instagram),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize, M: Serialize> {
    pub success: bool,
    pub data: T,
    pub meta: M,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    pub request_id: String,
    pub fetched_at: DateTime<Utc>,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            fetched_at: Utc::now(),
        }
    }
}

/// Upstream status echoed in an error body: an HTTP code, or the status
/// string an API reported inside a 200 payload.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum UpstreamStatus {
    Http(u16),
    Api(String),
}

/// JSON error envelope. Every adapter failure ends up here; nothing escapes
/// a handler as an unhandled fault.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    #[serde(skip)]
    pub http_status: StatusCode,
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UpstreamStatus>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<serde_json::Value>,
    pub request_id: String,
}

impl ApiError {
    pub fn new(
        http_status: StatusCode,
        request_id: impl Into<String>,
        error: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            http_status,
            success: false,
            error: error.into(),
            status: None,
            message: message.into(),
            hint: None,
            debug: None,
            request_id: request_id.into(),
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: UpstreamStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_hint(mut self, hint: Option<&str>) -> Self {
        self.hint = hint.map(str::to_owned);
        self
    }

    #[must_use]
    pub fn with_debug(mut self, debug: serde_json::Value) -> Self {
        self.debug = Some(debug);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.http_status, Json(self)).into_response()
    }
}

/// Adds `key` to a JSON debug object, creating the object if needed.
fn debug_insert(debug: &mut serde_json::Value, key: &str, value: serde_json::Value) {
    if let Some(map) = debug.as_object_mut() {
        map.insert(key.to_owned(), value);
    }
}

fn truncate_body(body: &str) -> String {
    body.chars().take(MAX_DEBUG_BODY_CHARS).collect()
}

/// Passes an upstream HTTP status through; falls back to 502 for codes axum
/// cannot represent.
fn passthrough_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY)
}

/// Converts a [`PlacesError`] into the error envelope.
///
/// `debug` carries non-secret context from the handler; internal error text
/// is only added when `expose_internal` is set (development).
pub(super) fn map_places_error(
    request_id: String,
    error: &PlacesError,
    mut debug: serde_json::Value,
    expose_internal: bool,
) -> ApiError {
    let hint = error.remediation_hint();
    match error {
        PlacesError::Configuration { missing } => {
            tracing::error!(missing = ?missing, "Google Places adapter is not configured");
            ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                request_id,
                "Configuration error",
                "Google Places API key or Place ID not configured",
            )
            .with_hint(hint)
            .with_debug(debug)
        }
        PlacesError::UpstreamHttp { status, body } => {
            tracing::error!(status, "Google Places request failed");
            if expose_internal {
                debug_insert(
                    &mut debug,
                    "upstreamBody",
                    serde_json::Value::String(truncate_body(body)),
                );
            }
            ApiError::new(
                passthrough_status(*status),
                request_id,
                "Google API request failed",
                hint.unwrap_or("the Google Places API rejected the request"),
            )
            .with_status(UpstreamStatus::Http(*status))
            .with_hint(hint)
            .with_debug(debug)
        }
        PlacesError::UpstreamApi { status, message } => {
            tracing::error!(status = %status, message = %message, "Google Places API error");
            ApiError::new(
                StatusCode::BAD_REQUEST,
                request_id,
                "Google Places API error",
                message.clone(),
            )
            .with_status(UpstreamStatus::Api(status.clone()))
            .with_hint(hint)
            .with_debug(debug)
        }
        other => internal_error(request_id, other, debug, expose_internal, "failed to fetch reviews"),
    }
}

/// Converts an [`InstagramError`] into the error envelope.
pub(super) fn map_instagram_error(
    request_id: String,
    error: &InstagramError,
    mut debug: serde_json::Value,
    expose_internal: bool,
) -> ApiError {
    let hint = error.remediation_hint();
    match error {
        InstagramError::Configuration { missing } => {
            tracing::error!(missing = ?missing, "Instagram adapter is not configured");
            ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                request_id,
                "Configuration error",
                "Instagram access token or user ID not configured",
            )
            .with_hint(hint)
            .with_debug(debug)
        }
        InstagramError::UpstreamHttp { status, body } => {
            tracing::error!(status, "Instagram request failed");
            if expose_internal {
                debug_insert(
                    &mut debug,
                    "upstreamBody",
                    serde_json::Value::String(truncate_body(body)),
                );
            }
            ApiError::new(
                passthrough_status(*status),
                request_id,
                "Instagram API request failed",
                hint.unwrap_or("the Instagram API rejected the request"),
            )
            .with_status(UpstreamStatus::Http(*status))
            .with_hint(hint)
            .with_debug(debug)
        }
        InstagramError::UpstreamApi { status, message } => {
            tracing::error!(status = %status, message = %message, "Instagram API error");
            ApiError::new(
                StatusCode::BAD_REQUEST,
                request_id,
                "Instagram API error",
                message.clone(),
            )
            .with_status(UpstreamStatus::Api(status.clone()))
            .with_hint(hint)
            .with_debug(debug)
        }
        other => internal_error(request_id, other, debug, expose_internal, "failed to fetch media"),
    }
}

fn internal_error(
    request_id: String,
    error: &dyn std::error::Error,
    mut debug: serde_json::Value,
    expose_internal: bool,
    message: &str,
) -> ApiError {
    tracing::error!(error = %error, "{message}");
    let api_error = ApiError::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        request_id,
        "Internal server error",
        message,
    );
    if expose_internal {
        debug_insert(
            &mut debug,
            "details",
            serde_json::Value::String(error.to_string()),
        );
        api_error.with_debug(debug)
    } else {
        api_error
    }
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({ "error": "Method not allowed" })),
    )
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
}

async fn health() -> Json<HealthData> {
    Json(HealthData { status: "ok" })
}

/// Every `OPTIONS` request is answered here with 200 and an empty body, so
/// the router never sees one. Must sit inside `request_id`.
fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route(
            "/reviews",
            get(reviews::get_reviews).fallback(method_not_allowed),
        )
        .route(
            "/instagram",
            get(instagram::get_media).fallback(method_not_allowed),
        )
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(request_id))
                .layer(build_cors()),
        )
        .with_state(state)
}
