/*
[INPUT]:  HTTP configuration (base URL, API key, timeouts, debug flag)
[OUTPUT]: Configured Kite client ready for API calls
[POS]:    HTTP layer - core client implementation and header contract
[UPDATE]: When adding connection options or changing header conventions
*/

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Method};
use url::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::http::envelope;
use crate::http::error::{ErrorCategory, KiteError, Result};
use crate::http::transport::{RawResponse, Transport};

/// Base URL for the Kite REST API
pub const KITE_BASE_URL: &str = "https://api.kite.trade";
/// Base URL for the interactive Kite login page
pub const KITE_LOGIN_BASE_URL: &str = "https://kite.zerodha.com";

const KITE_HEADER_VERSION: &str = "3";
const USER_AGENT_VALUE: &str = concat!("kiteconnect-adapter/", env!("CARGO_PKG_VERSION"));

/// Convenience for operations that send no parameters
pub const NO_PARAMS: Option<&[(&str, &str)]> = None;

/// HTTP client configuration, built once before concurrent use begins.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub debug: bool,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: KITE_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(7),
            connect_timeout: Duration::from_secs(5),
            debug: false,
        }
    }
}

/// Main HTTP client for the Kite REST API.
///
/// Configuration and credentials are fixed at construction; authenticating
/// produces a new client value via [`KiteClient::with_token`] instead of
/// mutating a shared one, so a client can be freely shared across tasks.
#[derive(Debug, Clone)]
pub struct KiteClient {
    config: ClientConfig,
    base_url: Url,
    transport: Transport,
    token: Option<String>,
}

impl KiteClient {
    /// Create an unauthenticated client.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|err| {
                KiteError::new(
                    ErrorCategory::General,
                    format!("Error constructing HTTP client: {err}"),
                    Value::Null,
                )
            })?;

        let base_url = Url::parse(&config.base_url).map_err(|err| {
            KiteError::new(
                ErrorCategory::Input,
                format!("Invalid base URL: {err}"),
                Value::Null,
            )
        })?;

        let transport = Transport::new(http_client, config.debug);
        Ok(Self {
            config,
            base_url,
            transport,
            token: None,
        })
    }

    /// Return an authenticated copy of this client carrying `token`.
    /// The underlying connection pool is shared between the copies.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        let mut client = self.clone();
        client.token = Some(token.into());
        client
    }

    pub fn api_key(&self) -> &str {
        &self.config.api_key
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// URL of the interactive login page that yields a request token.
    pub fn login_url(&self) -> String {
        format!(
            "{KITE_LOGIN_BASE_URL}/connect/login?api_key={}&v={KITE_HEADER_VERSION}",
            self.config.api_key
        )
    }

    /// Headers sent on every request: API version, user agent, and the
    /// `enctoken` authorization only when a token is present.
    fn request_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert("x-kite-version", HeaderValue::from_static(KITE_HEADER_VERSION));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(&format!("enctoken {token}")).map_err(|err| {
                KiteError::new(
                    ErrorCategory::Input,
                    format!("Invalid token value: {err}"),
                    Value::Null,
                )
            })?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Serialize typed parameters into their form/query representation.
    /// Fails locally, before any network call is made.
    pub(crate) fn encode_params<P: Serialize + ?Sized>(params: &P) -> Result<String> {
        serde_urlencoded::to_string(params).map_err(|err| {
            KiteError::new(
                ErrorCategory::Input,
                format!("Error encoding request params: {err}"),
                Value::Null,
            )
        })
    }

    /// Issue one request and return the raw response, bypassing the
    /// envelope decoder. Used for non-JSON endpoints (instrument CSV).
    pub async fn request_raw<P: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        params: Option<&P>,
    ) -> Result<RawResponse> {
        let encoded = match params {
            Some(params) => Self::encode_params(params)?,
            None => String::new(),
        };

        let url = self.base_url.join(path).map_err(|err| {
            debug!(path, error = %err, "request preparation failed");
            KiteError::new(ErrorCategory::Network, "Request preparation failed.", Value::Null)
        })?;

        let headers = self.request_headers()?;
        self.transport.send(method, url, &encoded, headers).await
    }

    /// Issue one request and pipe the response through the envelope
    /// decoder, yielding the typed payload or a classified error.
    pub async fn request_envelope<T, P>(
        &self,
        method: Method,
        path: &str,
        params: Option<&P>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let resp = self.request_raw(method, path, params).await?;
        envelope::decode(&resp)
    }
}
