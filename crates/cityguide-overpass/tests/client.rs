//! Integration tests for `OverpassClient`.
//!
//! Uses `wiremock` to stand up one local HTTP server per mirror so no real
//! network traffic is made. Covers the happy path, every failover trigger
//! (transport error, bad status, non-JSON content type, unparsable body),
//! ordering and short-circuit behaviour, and the exhaustion paths of
//! `execute` and `fetch_pois`.

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cityguide_core::PoiCategory;
use cityguide_overpass::{OverpassClient, OverpassError};

/// Builds an `OverpassClient` suitable for tests: 5-second timeout,
/// descriptive UA.
fn test_client(endpoints: Vec<String>) -> OverpassClient {
    OverpassClient::with_endpoints(endpoints, 5, "cityguide-test/0.1")
        .expect("failed to build test OverpassClient")
}

/// Wraps an `elements` array in the response envelope the mirrors emit.
fn overpass_body(elements: serde_json::Value) -> serde_json::Value {
    json!({
        "version": 0.6,
        "generator": "Overpass API",
        "elements": elements
    })
}

/// Minimal valid cafe node fixture.
fn cafe_node(id: i64, name: &str) -> serde_json::Value {
    json!({
        "type": "node",
        "id": id,
        "lat": 47.376_732,
        "lon": 8.541_57,
        "tags": {"amenity": "cafe", "name": name}
    })
}

// ---------------------------------------------------------------------------
// Happy path: one healthy mirror
// ---------------------------------------------------------------------------

#[tokio::test]
async fn execute_posts_the_urlencoded_query_and_returns_elements() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("content-type", "application/x-www-form-urlencoded; charset=UTF-8"))
        .and(header("accept", "application/json"))
        // "[out:json][timeout:25];" percent-encoded.
        .and(body_string_contains("data=%5Bout%3Ajson%5D%5Btimeout%3A25%5D%3B"))
        .and(body_string_contains("Bern"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&overpass_body(json!([cafe_node(1, "Adriano's"), cafe_node(2, "Einstein")]))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(vec![server.uri()]);
    let result = client.execute(&cityguide_overpass::build_query("Bern", &[])).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert_eq!(result.unwrap().len(), 2, "expected both elements back");
}

// ---------------------------------------------------------------------------
// Failover: mirrors are tried in order, each failure mode advances
// ---------------------------------------------------------------------------

#[tokio::test]
async fn mirrors_fail_over_in_configured_order() {
    let bad_status = MockServer::start().await;
    let html_page = MockServer::start().await;
    let healthy = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(504).set_body_raw("<html>Gateway Timeout</html>", "text/html"))
        .expect(1)
        .mount(&bad_status)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>too busy</html>", "text/html"))
        .expect(1)
        .mount(&html_page)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&overpass_body(json!([cafe_node(3, "Turm")]))))
        .expect(1)
        .mount(&healthy)
        .await;

    let client = test_client(vec![bad_status.uri(), html_page.uri(), healthy.uri()]);
    let result = client.execute("out;").await;

    assert!(result.is_ok(), "expected the third mirror to answer, got: {result:?}");
    assert_eq!(result.unwrap().len(), 1);
}

#[tokio::test]
async fn unparsable_json_body_fails_over() {
    let garbage = MockServer::start().await;
    let healthy = MockServer::start().await;

    // JSON content type, but the body does not parse.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{ \"elements\": [", "application/json"))
        .expect(1)
        .mount(&garbage)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&overpass_body(json!([]))))
        .expect(1)
        .mount(&healthy)
        .await;

    let client = test_client(vec![garbage.uri(), healthy.uri()]);
    let result = client.execute("out;").await;

    assert!(result.is_ok(), "expected failover past the garbage body, got: {result:?}");
}

#[tokio::test]
async fn connection_errors_fail_over() {
    let healthy = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&overpass_body(json!([cafe_node(4, "Odeon")]))))
        .expect(1)
        .mount(&healthy)
        .await;

    // Port 1 is never listening; the connect fails immediately.
    let client = test_client(vec!["http://127.0.0.1:1".to_string(), healthy.uri()]);
    let result = client.execute("out;").await;

    assert!(result.is_ok(), "expected failover past the dead mirror, got: {result:?}");
    assert_eq!(result.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Short circuit: the first structurally valid response wins
// ---------------------------------------------------------------------------

#[tokio::test]
async fn first_valid_response_short_circuits_even_when_empty() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&overpass_body(json!([]))))
        .expect(1)
        .mount(&first)
        .await;

    // Must never be contacted, even though it has data.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&overpass_body(json!([cafe_node(5, "Ghost")]))))
        .expect(0)
        .mount(&second)
        .await;

    let client = test_client(vec![first.uri(), second.uri()]);
    let result = client.execute("out;").await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert!(result.unwrap().is_empty(), "an empty element list is still a success");
}

#[tokio::test]
async fn json_without_an_elements_key_reads_as_an_empty_success() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({"remark": "runtime error: query timed out"})))
        .expect(1)
        .mount(&first)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&overpass_body(json!([cafe_node(6, "Ghost")]))))
        .expect(0)
        .mount(&second)
        .await;

    let client = test_client(vec![first.uri(), second.uri()]);
    let result = client.execute("out;").await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert!(result.unwrap().is_empty(), "a missing elements key is not a failover trigger");
}

// ---------------------------------------------------------------------------
// Exhaustion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn execute_reports_exhaustion_with_the_last_cause() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&first)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&second)
        .await;

    let client = test_client(vec![first.uri(), second.uri()]);
    let result = client.execute("out;").await;

    match result.unwrap_err() {
        OverpassError::Exhausted { attempts, last } => {
            assert_eq!(attempts, 2, "both mirrors should have been attempted");
            match *last {
                OverpassError::UnexpectedStatus { status, .. } => {
                    assert_eq!(status, 404, "last cause should come from the final mirror");
                }
                other => panic!("expected UnexpectedStatus as the last cause, got: {other:?}"),
            }
        }
        other => panic!("expected OverpassError::Exhausted, got: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// fetch_pois: the never-failing entry point
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_pois_returns_normalized_records() {
    let server = MockServer::start().await;

    let elements = json!([
        cafe_node(26_862_771, "Grande"),
        {
            "type": "way",
            "id": 38_110_919,
            "center": {"lat": 47.366_6, "lon": 8.541_2},
            "tags": {"leisure": "park", "name": "Rieterpark"}
        },
        {
            "type": "node",
            "id": 99,
            "lat": 47.37,
            "lon": 8.54,
            "tags": {"amenity": "toilets"}
        }
    ]);

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&overpass_body(elements)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(vec![server.uri()]);
    let pois = client.fetch_pois("Zürich", &["all"]).await;

    assert_eq!(pois.len(), 2, "the unnamed toilet element should be dropped");

    assert_eq!(pois[0].id, 26_862_771);
    assert_eq!(pois[0].name, "Grande");
    assert_eq!(pois[0].category, PoiCategory::Cafe);
    assert!((pois[0].lat - 47.376_732).abs() < f64::EPSILON);

    assert_eq!(pois[1].name, "Rieterpark");
    assert_eq!(pois[1].category, PoiCategory::Activity);
    assert!((pois[1].lng - 8.541_2).abs() < f64::EPSILON, "way coordinates come from the center");
}

#[tokio::test]
async fn fetch_pois_resolves_city_aliases_in_the_query() {
    let server = MockServer::start().await;

    // "Geneva" must be queried under its administrative name.
    Mock::given(method("POST"))
        .and(body_string_contains("Gen%C3%A8ve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&overpass_body(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(vec![server.uri()]);
    let pois = client.fetch_pois("Geneva", &[]).await;

    assert!(pois.is_empty());
}

#[tokio::test]
async fn fetch_pois_degrades_to_an_empty_list_when_every_mirror_fails() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&first)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>down</html>", "text/html"))
        .expect(1)
        .mount(&second)
        .await;

    let client = test_client(vec![first.uri(), second.uri()]);
    let pois = client.fetch_pois("Bern", &["cafe"]).await;

    assert!(pois.is_empty(), "total failure must degrade to an empty list, not an error");
}
