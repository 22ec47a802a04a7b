use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_GOOGLE_API_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
pub const DEFAULT_INSTAGRAM_API_BASE_URL: &str = "https://graph.instagram.com";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank secrets count as unset so `.env` templates with `KEY=` behave.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("FITFEED_ENV", "development"))?;

    let bind_addr = or_default("FITFEED_BIND_ADDR", "0.0.0.0:8888")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("FITFEED_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("FITFEED_LOG_LEVEL", "info");

    let upstream_timeout_secs = or_default("FITFEED_UPSTREAM_TIMEOUT_SECS", "10")
        .parse::<u64>()
        .map_err(|e| invalid("FITFEED_UPSTREAM_TIMEOUT_SECS", e.to_string()))?;
    if upstream_timeout_secs == 0 {
        return Err(invalid(
            "FITFEED_UPSTREAM_TIMEOUT_SECS",
            "must be at least 1 second".to_string(),
        ));
    }
    let user_agent = or_default("FITFEED_USER_AGENT", "fitfeed/0.1 (review-proxy)");

    let instagram_media_limit = or_default("FITFEED_INSTAGRAM_MEDIA_LIMIT", "12")
        .parse::<u32>()
        .map_err(|e| invalid("FITFEED_INSTAGRAM_MEDIA_LIMIT", e.to_string()))?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        upstream_timeout_secs,
        user_agent,
        google_api_base_url: or_default("FITFEED_GOOGLE_API_BASE_URL", DEFAULT_GOOGLE_API_BASE_URL),
        google_places_api_key: optional("GOOGLE_PLACES_API_KEY"),
        google_place_id: optional("GOOGLE_PLACE_ID"),
        reviews_language: or_default("FITFEED_REVIEWS_LANGUAGE", "en"),
        instagram_api_base_url: or_default(
            "FITFEED_INSTAGRAM_API_BASE_URL",
            DEFAULT_INSTAGRAM_API_BASE_URL,
        ),
        instagram_access_token: optional("INSTAGRAM_ACCESS_TOKEN"),
        instagram_user_id: optional("INSTAGRAM_USER_ID"),
        instagram_media_limit,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "FITFEED_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
