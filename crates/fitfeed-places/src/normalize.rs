//! Maps Google Places payloads onto the stable feed contract served to the
//! website.
//!
//! The mapping is total: every upstream record yields exactly one output
//! record, and absent upstream fields become empty strings, `false` or `0`.

use serde::Serialize;

use crate::types::{GoogleReview, PlaceDetails, TextSearchResult};

/// A review as served to the frontend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedReview {
    /// The upstream `time`, rendered as a decimal string.
    pub id: String,
    pub author_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo_url: Option<String>,
    /// Star rating in `1..=5`. `0` means unrated: the upstream record carried
    /// no rating, and consumers must not render it as a star value.
    pub rating: u8,
    pub text: String,
    pub relative_time_description: String,
    pub timestamp_epoch_seconds: i64,
    pub language: String,
    pub is_translated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub average_rating: f64,
    /// Google's total review count, which usually exceeds the returned page.
    #[serde(rename = "totalReviews")]
    pub total_review_count: u64,
    pub business_name: String,
}

/// Reviews in upstream order plus the place-level aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewFeedResult {
    pub reviews: Vec<NormalizedReview>,
    pub stats: ReviewStats,
}

/// A place returned by text search, in upstream relevance order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceCandidate {
    pub place_id: String,
    pub name: String,
    pub formatted_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u64>,
    pub types: Vec<String>,
    pub business_status: String,
}

/// Maps one upstream review to the output contract.
#[must_use]
pub fn normalize_review(review: GoogleReview) -> NormalizedReview {
    let timestamp = review.time.unwrap_or(0);
    NormalizedReview {
        id: timestamp.to_string(),
        author_name: review.author_name.unwrap_or_default(),
        author_url: non_empty(review.author_url),
        profile_photo_url: non_empty(review.profile_photo_url),
        rating: review.rating.map_or(0, clamp_rating),
        text: review.text.unwrap_or_default(),
        relative_time_description: review.relative_time_description.unwrap_or_default(),
        timestamp_epoch_seconds: timestamp,
        language: review.language.unwrap_or_default(),
        is_translated: review.translated.unwrap_or(false),
    }
}

/// Maps a place-details result to a feed, preserving upstream review order.
#[must_use]
pub fn normalize_feed(details: PlaceDetails) -> ReviewFeedResult {
    let reviews = details
        .reviews
        .into_iter()
        .map(normalize_review)
        .collect();

    ReviewFeedResult {
        reviews,
        stats: ReviewStats {
            average_rating: details.rating.unwrap_or(0.0),
            total_review_count: details.user_ratings_total.unwrap_or(0),
            business_name: details.name.unwrap_or_default(),
        },
    }
}

/// Maps a text-search hit to a candidate. Hits without a place id are useless
/// to the resolver and are dropped.
pub(crate) fn normalize_candidate(result: TextSearchResult) -> Option<PlaceCandidate> {
    let place_id = non_empty(result.place_id)?;

    let mut types: Vec<String> = Vec::with_capacity(result.types.len());
    for t in result.types {
        if !types.contains(&t) {
            types.push(t);
        }
    }

    Some(PlaceCandidate {
        place_id,
        name: result.name.unwrap_or_default(),
        formatted_address: result.formatted_address.unwrap_or_default(),
        rating: result.rating,
        user_ratings_total: result.user_ratings_total,
        types,
        business_status: result.business_status.unwrap_or_default(),
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_rating(raw: f64) -> u8 {
    raw.round().clamp(1.0, 5.0) as u8
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_review() -> GoogleReview {
        GoogleReview {
            author_name: Some("Jana K.".to_owned()),
            author_url: Some(
                "https://www.google.com/maps/contrib/1234567890/reviews".to_owned(),
            ),
            profile_photo_url: Some("https://lh3.googleusercontent.com/a/photo".to_owned()),
            language: Some("de".to_owned()),
            rating: Some(5.0),
            relative_time_description: Some("vor 2 Wochen".to_owned()),
            text: Some("Bestes Training, super Betreuung!".to_owned()),
            time: Some(1_712_345_678),
            translated: Some(false),
        }
    }

    #[test]
    fn normalize_review_maps_every_field() {
        let review = normalize_review(full_review());
        assert_eq!(review.id, "1712345678");
        assert_eq!(review.author_name, "Jana K.");
        assert_eq!(
            review.author_url.as_deref(),
            Some("https://www.google.com/maps/contrib/1234567890/reviews")
        );
        assert_eq!(review.rating, 5);
        assert_eq!(review.text, "Bestes Training, super Betreuung!");
        assert_eq!(review.relative_time_description, "vor 2 Wochen");
        assert_eq!(review.timestamp_epoch_seconds, 1_712_345_678);
        assert_eq!(review.language, "de");
        assert!(!review.is_translated);
    }

    #[test]
    fn normalize_review_defaults_absent_fields() {
        let review = normalize_review(GoogleReview::default());
        assert_eq!(review.id, "0");
        assert_eq!(review.author_name, "");
        assert!(review.author_url.is_none());
        assert!(review.profile_photo_url.is_none());
        assert_eq!(review.rating, 0);
        assert_eq!(review.text, "");
        assert_eq!(review.relative_time_description, "");
        assert_eq!(review.language, "");
        assert!(!review.is_translated);
    }

    #[test]
    fn normalize_review_omits_absent_author_url_when_serialized() {
        let json = serde_json::to_value(normalize_review(GoogleReview::default())).unwrap();
        assert!(json.get("authorUrl").is_none());
        assert_eq!(json["authorName"], "");
        assert_eq!(json["isTranslated"], false);
    }

    #[test]
    fn normalize_review_treats_blank_author_url_as_absent() {
        let mut raw = full_review();
        raw.author_url = Some(String::new());
        assert!(normalize_review(raw).author_url.is_none());
    }

    #[test]
    fn unrated_review_stays_distinct_from_lowest_star() {
        let unrated = normalize_review(GoogleReview::default());
        let low = normalize_review(GoogleReview {
            rating: Some(0.4),
            ..GoogleReview::default()
        });
        assert_eq!(unrated.rating, 0);
        assert_eq!(low.rating, 1);
    }

    #[test]
    fn normalize_review_clamps_out_of_range_rating() {
        let mut raw = full_review();
        raw.rating = Some(7.0);
        assert_eq!(normalize_review(raw).rating, 5);

        let mut raw = full_review();
        raw.rating = Some(0.2);
        assert_eq!(normalize_review(raw).rating, 1);
    }

    #[test]
    fn normalize_feed_preserves_upstream_order() {
        let mut older = full_review();
        older.time = Some(100);
        let mut newer = full_review();
        newer.time = Some(200);

        let feed = normalize_feed(PlaceDetails {
            name: Some("Coach Studio".to_owned()),
            rating: Some(4.9),
            user_ratings_total: Some(87),
            reviews: vec![older, newer],
        });

        let ids: Vec<&str> = feed.reviews.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["100", "200"]);
        assert_eq!(feed.stats.business_name, "Coach Studio");
        assert_eq!(feed.stats.total_review_count, 87);
        assert!((feed.stats.average_rating - 4.9).abs() < f64::EPSILON);
    }

    #[test]
    fn normalize_feed_defaults_stats_when_absent() {
        let feed = normalize_feed(PlaceDetails::default());
        assert!(feed.reviews.is_empty());
        assert_eq!(feed.stats.business_name, "");
        assert_eq!(feed.stats.total_review_count, 0);
        assert!(feed.stats.average_rating.abs() < f64::EPSILON);
    }

    #[test]
    fn review_stats_serializes_total_reviews_key() {
        let json = serde_json::to_value(normalize_feed(PlaceDetails::default()).stats).unwrap();
        assert_eq!(json["totalReviews"], 0);
        assert!(json.get("averageRating").is_some());
    }

    #[test]
    fn normalize_candidate_drops_results_without_place_id() {
        assert!(normalize_candidate(TextSearchResult::default()).is_none());
    }

    #[test]
    fn normalize_candidate_dedups_types_in_order() {
        let candidate = normalize_candidate(TextSearchResult {
            place_id: Some("ChIJabc".to_owned()),
            types: vec![
                "gym".to_owned(),
                "health".to_owned(),
                "gym".to_owned(),
                "point_of_interest".to_owned(),
            ],
            ..TextSearchResult::default()
        })
        .expect("candidate");
        assert_eq!(candidate.types, ["gym", "health", "point_of_interest"]);
        assert_eq!(candidate.business_status, "");
    }
}
