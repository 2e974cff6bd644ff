/*
[INPUT]:  Mock session responses
[OUTPUT]: Test results for session establishment and renewal
[POS]:    Integration tests - authentication
[UPDATE]: When the session exchange or token flow changes
*/

mod common;

use common::{
    TEST_API_KEY, TEST_TOKEN, authed_client, error_envelope, setup_mock_server, success_envelope,
    test_client,
};
use kiteconnect_adapter::ErrorCategory;
use sha2::{Digest, Sha256};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn checksum(api_key: &str, token: &str, secret: &str) -> String {
    hex::encode(Sha256::digest(format!("{api_key}{token}{secret}")))
}

#[tokio::test]
async fn test_generate_session_sends_checksum_form() {
    let server = setup_mock_server().await;
    let expected_checksum = checksum(TEST_API_KEY, "request_token_abc", "api_secret_xyz");

    let body = success_envelope(serde_json::json!({
        "user_id": "AB1234",
        "user_name": "Test User",
        "user_shortname": "Test",
        "email": "test@example.com",
        "broker": "ZERODHA",
        "api_key": TEST_API_KEY,
        "access_token": "durable_access_token",
        "refresh_token": "",
        "public_token": "public_token",
        "login_time": "2024-01-01 09:00:00"
    }));

    Mock::given(method("POST"))
        .and(path("/session/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains(format!("api_key={TEST_API_KEY}")))
        .and(body_string_contains("request_token=request_token_abc"))
        .and(body_string_contains(format!("checksum={expected_checksum}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let session = client
        .generate_session("request_token_abc", "api_secret_xyz")
        .await
        .expect("generate_session failed");

    assert_eq!(session.user_id, "AB1234");
    assert_eq!(session.access_token, "durable_access_token");

    // the original client stays unauthenticated; the caller derives the
    // authenticated one from the returned token
    assert!(client.token().is_none());
    let authed = client.with_token(&session.access_token);
    assert_eq!(authed.token(), Some("durable_access_token"));
}

#[tokio::test]
async fn test_generate_session_failure_surfaces_classified_error() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/session/token"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(error_envelope("TokenException", "Invalid checksum")),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .generate_session("request_token_abc", "wrong_secret")
        .await
        .unwrap_err();

    assert_eq!(err.category, ErrorCategory::Token);
    assert_eq!(err.status, 403);
    assert!(client.token().is_none());
}

#[tokio::test]
async fn test_renew_session() {
    let server = setup_mock_server().await;
    let body = success_envelope(serde_json::json!({
        "user_id": "AB1234",
        "access_token": "new_access_token",
        "refresh_token": "new_refresh_token"
    }));

    Mock::given(method("POST"))
        .and(path("/session/refresh_token"))
        .and(body_string_contains("refresh_token=old_refresh_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let tokens = client
        .renew_session("old_refresh_token", "api_secret_xyz")
        .await
        .expect("renew_session failed");

    assert_eq!(tokens.access_token, "new_access_token");
    assert_eq!(tokens.refresh_token, "new_refresh_token");
}

#[tokio::test]
async fn test_invalidate_session() {
    let server = setup_mock_server().await;
    Mock::given(method("DELETE"))
        .and(path("/session/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_envelope(serde_json::json!(true))))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let invalidated = client.invalidate_session().await.expect("invalidate failed");
    assert!(invalidated);

    let requests = server.received_requests().await.expect("requests recorded");
    let query = requests[0].url.query().unwrap_or("");
    assert!(query.contains(&format!("access_token={TEST_TOKEN}")));
}

#[tokio::test]
async fn test_invalidate_session_without_token_fails_locally() {
    let server = setup_mock_server().await;
    let client = test_client(&server);

    let err = client.invalidate_session().await.unwrap_err();
    assert_eq!(err.category, ErrorCategory::Input);

    let requests = server.received_requests().await.expect("requests recorded");
    assert!(requests.is_empty());
}
