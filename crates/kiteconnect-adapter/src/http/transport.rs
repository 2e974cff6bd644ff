/*
[INPUT]:  Method, URL, pre-encoded parameters and headers
[OUTPUT]: Raw response bytes with status code and headers
[POS]:    HTTP layer - leaf transport, one request per call
[UPDATE]: When request construction or body handling rules change
*/

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use url::Url;
use serde_json::Value;
use tracing::debug;

use crate::http::error::{ErrorCategory, KiteError, Result};

/// One response, produced once per call and consumed by the envelope
/// decoder. The transport never attaches meaning to the body.
#[derive(Debug)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Thin wrapper over the shared reqwest client. Issues a single request
/// and reads the body fully; no retries, no inspection.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    client: Client,
    debug: bool,
}

impl Transport {
    pub(crate) fn new(client: Client, debug: bool) -> Self {
        Self { client, debug }
    }

    /// Send one request. Write methods (POST/PUT) carry `encoded_params`
    /// as a form body and get a default urlencoded Content-Type only if
    /// the caller has not set one; read/delete methods carry the params
    /// as the query string instead.
    pub(crate) async fn send(
        &self,
        method: Method,
        mut url: Url,
        encoded_params: &str,
        mut headers: HeaderMap,
    ) -> Result<RawResponse> {
        let is_write = matches!(method, Method::POST | Method::PUT);

        if !is_write && !encoded_params.is_empty() {
            url.set_query(Some(encoded_params));
        }

        if is_write && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            );
        }

        let mut builder = self.client.request(method.clone(), url.clone()).headers(headers);
        if is_write {
            builder = builder.body(encoded_params.to_string());
        }

        let request = builder.build().map_err(|err| {
            debug!(error = %err, "request preparation failed");
            KiteError::new(ErrorCategory::Network, "Request preparation failed.", Value::Null)
        })?;
        let request_headers = request.headers().clone();

        let response = self.client.execute(request).await.map_err(|err| {
            debug!(error = %err, "request failed");
            KiteError::new(ErrorCategory::Network, "Request failed.", Value::Null)
        })?;

        let status = response.status().as_u16();
        let response_headers = response.headers().clone();

        let body = response.bytes().await.map_err(|err| {
            debug!(error = %err, "unable to read response");
            KiteError::new(ErrorCategory::Data, "Error reading response.", Value::Null)
        })?;

        if self.debug {
            debug!(
                method = %method,
                url = %url,
                status,
                headers = ?request_headers,
                "kite http"
            );
        }

        Ok(RawResponse {
            status,
            headers: response_headers,
            body: body.to_vec(),
        })
    }
}
