/*
[INPUT]:  Request tokens, API secret and session credentials
[OUTPUT]: User sessions, token renewals and profile data
[POS]:    HTTP layer - session establishment and user endpoints
[UPDATE]: When the session exchange or user endpoints change
*/

use reqwest::Method;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::http::client::NO_PARAMS;
use crate::http::endpoints;
use crate::http::error::{ErrorCategory, KiteError};
use crate::http::{KiteClient, Result};
use crate::types::{UserProfile, UserSession, UserSessionTokens};

impl KiteClient {
    /// Exchange a one-time request token for a durable session.
    ///
    /// POST /session/token
    ///
    /// The checksum is the SHA-256 hex digest of api_key + request_token +
    /// api_secret. On success the caller holds the access token; derive an
    /// authenticated client with [`KiteClient::with_token`]. On failure
    /// this client stays unauthenticated and the error is surfaced as-is.
    pub async fn generate_session(
        &self,
        request_token: &str,
        api_secret: &str,
    ) -> Result<UserSession> {
        let checksum = session_checksum(self.api_key(), request_token, api_secret);
        let params = [
            ("api_key", self.api_key()),
            ("request_token", request_token),
            ("checksum", checksum.as_str()),
        ];

        self.request_envelope(Method::POST, endpoints::USER_SESSION, Some(params.as_slice()))
            .await
    }

    /// Renew an expiring access token using the refresh token.
    ///
    /// POST /session/refresh_token
    pub async fn renew_session(
        &self,
        refresh_token: &str,
        api_secret: &str,
    ) -> Result<UserSessionTokens> {
        let checksum = session_checksum(self.api_key(), refresh_token, api_secret);
        let params = [
            ("api_key", self.api_key()),
            ("refresh_token", refresh_token),
            ("checksum", checksum.as_str()),
        ];

        self.request_envelope(
            Method::POST,
            endpoints::USER_SESSION_RENEW,
            Some(params.as_slice()),
        )
        .await
    }

    /// Invalidate the current access token.
    ///
    /// DELETE /session/token
    pub async fn invalidate_session(&self) -> Result<bool> {
        let token = self.token().ok_or_else(|| {
            KiteError::new(
                ErrorCategory::Input,
                "No access token set on this client.",
                Value::Null,
            )
        })?;
        let params = [("api_key", self.api_key()), ("access_token", token)];

        self.request_envelope(
            Method::DELETE,
            endpoints::USER_SESSION_INVALIDATE,
            Some(params.as_slice()),
        )
        .await
    }

    /// Fetch the authenticated user's profile
    ///
    /// GET /user/profile
    pub async fn profile(&self) -> Result<UserProfile> {
        self.request_envelope(Method::GET, endpoints::USER_PROFILE, NO_PARAMS)
            .await
    }
}

fn session_checksum(api_key: &str, token: &str, api_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hasher.update(token.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}
