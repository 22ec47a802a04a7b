use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide settings, read once at startup and handed to each adapter.
///
/// The upstream credentials are optional here: a missing key must not stop
/// the server from booting. Each adapter reports its own missing settings
/// per request as a configuration error.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub upstream_timeout_secs: u64,
    pub user_agent: String,
    pub google_api_base_url: String,
    pub google_places_api_key: Option<String>,
    pub google_place_id: Option<String>,
    pub reviews_language: String,
    pub instagram_api_base_url: String,
    pub instagram_access_token: Option<String>,
    pub instagram_user_id: Option<String>,
    pub instagram_media_limit: u32,
}

impl AppConfig {
    /// Internal error details are only echoed to callers in development.
    #[must_use]
    pub fn is_development(&self) -> bool {
        self.env == Environment::Development
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("google_api_base_url", &self.google_api_base_url)
            .field(
                "google_places_api_key",
                &self.google_places_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("google_place_id", &self.google_place_id)
            .field("reviews_language", &self.reviews_language)
            .field("instagram_api_base_url", &self.instagram_api_base_url)
            .field(
                "instagram_access_token",
                &self.instagram_access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("instagram_user_id", &self.instagram_user_id)
            .field("instagram_media_limit", &self.instagram_media_limit)
            .finish()
    }
}
