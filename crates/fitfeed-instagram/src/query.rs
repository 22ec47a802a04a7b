use crate::error::InstagramError;

/// Validated input for a media-feed fetch.
#[derive(Clone)]
pub struct MediaQuery {
    access_token: String,
    user_id: String,
    limit: u32,
}

impl MediaQuery {
    /// Builds a query from configured values. Blank strings count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`InstagramError::Configuration`] naming every missing setting.
    pub fn new(
        access_token: Option<&str>,
        user_id: Option<&str>,
        limit: u32,
    ) -> Result<Self, InstagramError> {
        let access_token = access_token.map(str::trim).filter(|s| !s.is_empty());
        let user_id = user_id.map(str::trim).filter(|s| !s.is_empty());

        let mut missing = Vec::new();
        if access_token.is_none() {
            missing.push("access_token");
        }
        if user_id.is_none() {
            missing.push("user_id");
        }

        match (access_token, user_id) {
            (Some(access_token), Some(user_id)) => Ok(Self {
                access_token: access_token.to_owned(),
                user_id: user_id.to_owned(),
                limit: limit.max(1),
            }),
            _ => Err(InstagramError::Configuration { missing }),
        }
    }

    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }
}

impl std::fmt::Debug for MediaQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaQuery")
            .field("access_token", &"[redacted]")
            .field("user_id", &self.user_id)
            .field("limit", &self.limit)
            .finish()
    }
}
