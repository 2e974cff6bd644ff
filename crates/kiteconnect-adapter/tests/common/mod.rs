/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for kiteconnect-adapter tests

use kiteconnect_adapter::{ClientConfig, KiteClient};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test_api_key";
pub const TEST_TOKEN: &str = "test_access_token";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Unauthenticated client pointed at the mock server
pub fn test_client(server: &MockServer) -> KiteClient {
    let mut config = ClientConfig::new(TEST_API_KEY);
    config.base_url = server.uri();
    KiteClient::new(config).expect("client init")
}

/// Authenticated client pointed at the mock server
#[allow(dead_code)]
pub fn authed_client(server: &MockServer) -> KiteClient {
    test_client(server).with_token(TEST_TOKEN)
}

/// Wrap a JSON payload in the success envelope
#[allow(dead_code)]
pub fn success_envelope(data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "status": "success",
        "data": data,
    })
}

/// Build an error envelope body
#[allow(dead_code)]
pub fn error_envelope(error_type: &str, message: &str) -> serde_json::Value {
    serde_json::json!({
        "status": "error",
        "error_type": error_type,
        "message": message,
        "data": null,
    })
}
