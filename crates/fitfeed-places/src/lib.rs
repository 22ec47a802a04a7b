//! Google Places integration: the review feed adapter and the operator-side
//! Place ID resolver.

pub mod client;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod query;
pub mod resolver;
pub mod types;

pub use client::PlacesClient;
pub use error::{PlacesError, ResolverError};
pub use extract::{extract_from_url, ExtractionMatch, ExtractionMethod, ExtractionResult};
pub use normalize::{
    normalize_feed, normalize_review, NormalizedReview, PlaceCandidate, ReviewFeedResult,
    ReviewStats,
};
pub use query::ReviewQuery;
pub use resolver::{is_short_link, LocateOutcome, PlaceResolver, SearchOutcome};
