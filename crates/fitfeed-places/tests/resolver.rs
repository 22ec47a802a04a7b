//! Integration tests for `PlaceResolver` using wiremock HTTP mocks.
//!
//! Call counts are asserted with `Mock::expect` and checked by
//! `MockServer::verify`, so the short-circuit contract is observable.

use fitfeed_places::{ExtractionMethod, PlaceResolver, PlacesClient, ResolverError};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_resolver(base_url: &str) -> PlaceResolver {
    let client = PlacesClient::with_base_url(5, "fitfeed-test/0.1", base_url)
        .expect("client construction should not fail");
    PlaceResolver::new(client, "test-key")
}

fn zero_results() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "status": "ZERO_RESULTS", "results": [] }))
}

fn two_candidates() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "status": "OK",
        "results": [
            {
                "place_id": "ChIJfirst",
                "name": "Coach Studio",
                "formatted_address": "Torstr. 1, 10119 Berlin",
                "rating": 4.2,
                "user_ratings_total": 12,
                "types": ["gym", "health"],
                "business_status": "OPERATIONAL"
            },
            {
                "place_id": "ChIJsecond",
                "name": "Coach Studio Mitte",
                "formatted_address": "Invalidenstr. 5, 10115 Berlin",
                "rating": 4.9,
                "types": ["gym"],
                "business_status": "OPERATIONAL"
            }
        ]
    }))
}

async fn mount_query(server: &MockServer, query: &str, response: ResponseTemplate, calls: u64) {
    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .and(query_param("query", query))
        .and(query_param("key", "test-key"))
        .respond_with(response)
        .expect(calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn search_candidates_stops_at_first_query_with_results() {
    let server = MockServer::start().await;
    mount_query(&server, "q1", zero_results(), 1).await;
    mount_query(&server, "q2", two_candidates(), 1).await;
    mount_query(&server, "q3", two_candidates(), 0).await;

    let outcome = test_resolver(&server.uri())
        .search_candidates(&["q1", "q2", "q3"])
        .await
        .expect("q2 should produce candidates");

    assert_eq!(outcome.matched_query, "q2");
    assert_eq!(outcome.tried_queries, ["q1", "q2"]);
    assert_eq!(outcome.candidates.len(), 2);
    assert_eq!(outcome.candidates[0].place_id, "ChIJfirst");
    assert_eq!(outcome.candidates[1].place_id, "ChIJsecond");
    // First returned, not highest rated.
    assert_eq!(outcome.recommended_place_id(), Some("ChIJfirst"));

    server.verify().await;
}

#[tokio::test]
async fn search_candidates_reports_every_tried_query_when_exhausted() {
    let server = MockServer::start().await;
    for q in ["q1", "q2", "q3"] {
        mount_query(&server, q, zero_results(), 1).await;
    }

    let err = test_resolver(&server.uri())
        .search_candidates(&["q1", "q2", "q3"])
        .await
        .unwrap_err();

    assert!(
        matches!(err, ResolverError::NoCandidatesFound { ref tried_queries } if tried_queries == &["q1", "q2", "q3"]),
        "got: {err:?}"
    );
    server.verify().await;
}

#[tokio::test]
async fn search_candidates_continues_after_upstream_failure() {
    let server = MockServer::start().await;
    mount_query(&server, "q1", ResponseTemplate::new(500), 1).await;
    mount_query(
        &server,
        "q2",
        ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "denied"
        })),
        1,
    )
    .await;
    mount_query(&server, "q3", two_candidates(), 1).await;

    let outcome = test_resolver(&server.uri())
        .search_candidates(&["q1", "q2", "q3"])
        .await
        .expect("q3 should still be tried");

    assert_eq!(outcome.matched_query, "q3");
    assert_eq!(outcome.tried_queries, ["q1", "q2", "q3"]);
    server.verify().await;
}

#[tokio::test]
async fn search_candidates_with_no_queries_makes_no_calls() {
    let server = MockServer::start().await;
    mount_query(&server, "q1", two_candidates(), 0).await;

    let queries: [&str; 0] = [];
    let err = test_resolver(&server.uri())
        .search_candidates(&queries)
        .await
        .unwrap_err();

    assert!(
        matches!(err, ResolverError::NoCandidatesFound { ref tried_queries } if tried_queries.is_empty())
    );
    server.verify().await;
}

#[tokio::test]
async fn resolve_short_link_follows_redirects() {
    let server = MockServer::start().await;
    let target = format!("{}/maps/place/Studio?ftid=0xabc:0xdef", server.uri());

    Mock::given(method("HEAD"))
        .and(path("/share/AbCd"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", target.as_str()))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/maps/place/Studio"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let resolver = test_resolver(&server.uri());
    let resolved = resolver
        .resolve_short_link(&format!("{}/share/AbCd", server.uri()))
        .await
        .expect("redirect should resolve");

    assert_eq!(resolved, target);
    let extraction = fitfeed_places::extract_from_url(&resolved);
    assert_eq!(extraction.method, ExtractionMethod::Ftid);
    assert_eq!(extraction.place_id.as_deref(), Some("0xabc:0xdef"));
}

#[tokio::test]
async fn resolve_short_link_reports_network_failure() {
    let resolver = test_resolver("http://127.0.0.1:9");
    let err = resolver
        .resolve_short_link("http://127.0.0.1:9/unreachable")
        .await
        .unwrap_err();

    assert!(
        matches!(err, ResolverError::RedirectResolution { ref url, .. } if url == "http://127.0.0.1:9/unreachable"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn locate_falls_back_to_search_when_url_has_no_identifier() {
    let server = MockServer::start().await;
    mount_query(&server, "Coach Studio Berlin", two_candidates(), 1).await;

    let outcome = test_resolver(&server.uri())
        .locate(
            "https://www.google.com/maps/@52.52,13.40,15z",
            &["Coach Studio Berlin"],
        )
        .await
        .expect("search fallback should succeed");

    assert_eq!(outcome.extraction.method, ExtractionMethod::NotFound);
    assert!(outcome.resolved_url.is_none());
    assert_eq!(outcome.recommended_place_id(), Some("ChIJfirst"));
    server.verify().await;
}

#[tokio::test]
async fn locate_skips_search_when_extraction_succeeds() {
    let server = MockServer::start().await;
    mount_query(&server, "Coach Studio Berlin", two_candidates(), 0).await;

    let outcome = test_resolver(&server.uri())
        .locate(
            "https://www.google.com/maps?place_id=ChIJdirect",
            &["Coach Studio Berlin"],
        )
        .await
        .expect("extraction should succeed");

    assert!(outcome.search.is_none());
    assert_eq!(outcome.recommended_place_id(), Some("ChIJdirect"));
    server.verify().await;
}
