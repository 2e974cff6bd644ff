/*
[INPUT]:  Raw HTTP responses (status code + body bytes)
[OUTPUT]: Decoded typed payloads or classified errors
[POS]:    HTTP layer - success/error envelope decoding protocol
[UPDATE]: When Kite changes its response envelope shapes
*/

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::http::error::{ErrorCategory, KiteError, Result};
use crate::http::transport::RawResponse;

/// Wrapper Kite puts around every successful JSON payload.
#[derive(Debug, Deserialize)]
pub struct SuccessEnvelope<T> {
    pub data: T,
}

/// Wrapper Kite puts around every error response. The `status`,
/// `error_type` and `message` fields are required; a body missing any of
/// them is treated as malformed, not as a degenerate error envelope.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub status: String,
    pub error_type: String,
    pub message: String,
    #[serde(default)]
    pub data: Value,
}

/// Decode a raw response into the caller's target type.
///
/// The envelope is a closed tagged choice selected purely by status code:
/// >= 400 means error envelope, < 400 means success envelope. A body that
/// fails to parse on either branch is always a `Data` error with the
/// synthetic message "Error parsing response." and is never reclassified
/// from the status code.
pub fn decode<T: DeserializeOwned>(resp: &RawResponse) -> Result<T> {
    if resp.status >= 400 {
        let envelope: ErrorEnvelope = match serde_json::from_slice(&resp.body) {
            Ok(envelope) => envelope,
            Err(err) => {
                debug!(status = resp.status, error = %err, "error parsing error envelope");
                return Err(parse_failure());
            }
        };
        return Err(KiteError::with_status(
            ErrorCategory::from_name(&envelope.error_type),
            resp.status,
            envelope.message,
            envelope.data,
        ));
    }

    match serde_json::from_slice::<SuccessEnvelope<T>>(&resp.body) {
        Ok(envelope) => Ok(envelope.data),
        Err(err) => {
            debug!(status = resp.status, error = %err, "error parsing success envelope");
            Err(parse_failure())
        }
    }
}

fn parse_failure() -> KiteError {
    KiteError::new(ErrorCategory::Data, "Error parsing response.", Value::Null)
}
