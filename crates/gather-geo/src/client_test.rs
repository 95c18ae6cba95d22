use super::*;

fn test_client(base_url: &str) -> GoogleMapsClient {
    GoogleMapsClient::with_base_url("test-key", 5, "gather-test/0.1", base_url)
        .expect("client construction should not fail")
}

#[test]
fn build_url_joins_endpoint_and_appends_key() {
    let client = test_client("https://maps.googleapis.com/maps/api");
    let url = client
        .build_url("geocode/json", &[("latlng", "30.1,-97.2")])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://maps.googleapis.com/maps/api/geocode/json?latlng=30.1%2C-97.2&key=test-key"
    );
}

#[test]
fn build_url_tolerates_trailing_slash() {
    let client = test_client("https://maps.googleapis.com/maps/api/");
    let url = client
        .build_url("place/details/json", &[("place_id", "abc")])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://maps.googleapis.com/maps/api/place/details/json?place_id=abc&key=test-key"
    );
}

#[test]
fn build_url_encodes_query_text() {
    let client = test_client("https://maps.googleapis.com/maps/api");
    let url = client
        .build_url("place/autocomplete/json", &[("input", "café & bar")])
        .unwrap();
    assert!(
        url.as_str().contains("input=caf%C3%A9+%26+bar"),
        "input should be percent-encoded: {url}"
    );
}

#[test]
fn with_base_url_rejects_garbage() {
    let result = GoogleMapsClient::with_base_url("k", 5, "ua", "not a url");
    assert!(matches!(result, Err(GeoError::InvalidBaseUrl { .. })));
}

#[test]
fn with_country_lowercases_and_drops_blank() {
    let client = test_client("https://example.test").with_country(Some("US"));
    assert_eq!(client.country.as_deref(), Some("us"));
    let client = test_client("https://example.test").with_country(Some(" "));
    assert!(client.country.is_none());
}

#[test]
fn check_status_accepts_ok_and_zero_results() {
    assert!(GoogleMapsClient::check_status(&serde_json::json!({"status": "OK"})).is_ok());
    assert!(
        GoogleMapsClient::check_status(&serde_json::json!({"status": "ZERO_RESULTS"})).is_ok()
    );
}

#[test]
fn check_status_surfaces_error_message() {
    let body = serde_json::json!({
        "status": "REQUEST_DENIED",
        "error_message": "The provided API key is invalid."
    });
    let err = GoogleMapsClient::check_status(&body).unwrap_err();
    match err {
        GeoError::ApiStatus { status, message } => {
            assert_eq!(status, "REQUEST_DENIED");
            assert_eq!(message, "The provided API key is invalid.");
        }
        other => panic!("expected ApiStatus, got {other:?}"),
    }
}
