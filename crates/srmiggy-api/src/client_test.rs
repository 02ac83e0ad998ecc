use super::*;

fn test_client(base_url: &str) -> ApiClient {
    ApiClient::with_base_url(base_url, 30, "srmiggy-test/0.1")
        .expect("client construction should not fail")
}

#[test]
fn endpoint_appends_to_api_prefix() {
    let client = test_client("http://localhost:8080/api");
    let url = client.endpoint(&["menu", "vendor", "7"], &[]);
    assert_eq!(url.as_str(), "http://localhost:8080/api/menu/vendor/7");
}

#[test]
fn endpoint_tolerates_trailing_slash_and_bare_host() {
    let client = test_client("http://localhost:8080/api/");
    assert_eq!(
        client.endpoint(&["vendors"], &[]).as_str(),
        "http://localhost:8080/api/vendors"
    );

    let client = test_client("http://localhost:8080");
    assert_eq!(
        client.endpoint(&["slots"], &[]).as_str(),
        "http://localhost:8080/slots"
    );
}

#[test]
fn endpoint_encodes_query_pairs() {
    let client = test_client("http://localhost:8080/api");
    let url = client.endpoint(&["payments", "create-order"], &[("orderId", "42")]);
    assert_eq!(
        url.as_str(),
        "http://localhost:8080/api/payments/create-order?orderId=42"
    );

    let url = client.endpoint(&["admin", "orders", "3", "status"], &[("status", "OUT FOR")]);
    assert!(
        url.as_str().ends_with("status?status=OUT+FOR"),
        "query should be form-encoded: {url}"
    );
}

#[test]
fn non_http_base_url_is_rejected() {
    let err = ApiClient::with_base_url("ftp://example.com/api", 30, "ua").unwrap_err();
    assert!(matches!(err, ApiError::InvalidBaseUrl { .. }));

    let err = ApiClient::with_base_url("not a url", 30, "ua").unwrap_err();
    assert!(matches!(err, ApiError::InvalidBaseUrl { .. }));
}

#[test]
fn blank_token_is_dropped() {
    let client = test_client("http://localhost:8080/api").with_token(Some("  ".to_owned()));
    assert!(!client.has_token());
    let client = client.with_token(Some("jwt".to_owned()));
    assert!(client.has_token());
}

#[test]
fn server_message_prefers_message_then_error() {
    assert_eq!(
        server_message(r#"{"message": "Slot is full", "error": "Bad Request"}"#).as_deref(),
        Some("Slot is full")
    );
    assert_eq!(
        server_message(r#"{"message": "", "error": "Bad Request"}"#).as_deref(),
        Some("Bad Request")
    );
    assert_eq!(server_message(r#"{"status": 400}"#), None);
}

#[test]
fn server_message_handles_plain_and_empty_bodies() {
    assert_eq!(
        server_message("Insufficient wallet balance").as_deref(),
        Some("Insufficient wallet balance")
    );
    assert_eq!(server_message("   "), None);
    assert_eq!(server_message("<html><body>502</body></html>"), None);
}

#[test]
fn user_message_uses_server_text_when_present() {
    let err = ApiError::Rejected {
        status: 400,
        message: Some("Ordering is closed".to_owned()),
    };
    assert_eq!(err.user_message(), "Ordering is closed");
    assert_eq!(err.server_message(), Some("Ordering is closed"));
    assert_eq!(
        err.to_string(),
        "request rejected with HTTP 400: Ordering is closed"
    );

    let err = ApiError::Rejected {
        status: 500,
        message: None,
    };
    assert_eq!(err.user_message(), "Request failed (HTTP 500).");
    assert_eq!(err.to_string(), "request rejected with HTTP 500");
}
