use crate::error::PlacesError;

/// Validated input for a review fetch.
///
/// Only constructible through [`ReviewQuery::new`], so holding one proves
/// both the API key and the place identifier are present.
#[derive(Clone)]
pub struct ReviewQuery {
    api_key: String,
    place_id: String,
    language: String,
}

impl ReviewQuery {
    /// Builds a query from configured values. Blank strings count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Configuration`] naming every missing setting.
    pub fn new(
        api_key: Option<&str>,
        place_id: Option<&str>,
        language: &str,
    ) -> Result<Self, PlacesError> {
        let api_key = api_key.map(str::trim).filter(|s| !s.is_empty());
        let place_id = place_id.map(str::trim).filter(|s| !s.is_empty());

        match (api_key, place_id) {
            (Some(api_key), Some(place_id)) => Ok(Self {
                api_key: api_key.to_owned(),
                place_id: place_id.to_owned(),
                language: language.trim().to_owned(),
            }),
            (api_key, place_id) => {
                let mut missing = Vec::new();
                if api_key.is_none() {
                    missing.push("api_key");
                }
                if place_id.is_none() {
                    missing.push("place_id");
                }
                Err(PlacesError::Configuration { missing })
            }
        }
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn place_id(&self) -> &str {
        &self.place_id
    }

    /// Language hint passed upstream; empty means "let Google decide".
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }
}

impl std::fmt::Debug for ReviewQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewQuery")
            .field("api_key", &"[redacted]")
            .field("place_id", &self.place_id)
            .field("language", &self.language)
            .finish()
    }
}
