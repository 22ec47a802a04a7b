//! Instagram Graph API media feed for the website's gallery.

pub mod client;
pub mod engagement;
pub mod error;
pub mod normalize;
pub mod query;
pub mod types;

pub use client::InstagramClient;
pub use engagement::{synthetic_engagement, SyntheticEngagement};
pub use error::InstagramError;
pub use normalize::{normalize_media, MediaItem};
pub use query::MediaQuery;
