/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod orders;
pub mod quotes;
pub mod transport;
pub mod user;

pub use error::{ErrorCategory, KiteError, Result};

pub use client::{ClientConfig, KiteClient, KITE_BASE_URL, KITE_LOGIN_BASE_URL, NO_PARAMS};
pub use envelope::{ErrorEnvelope, SuccessEnvelope, decode};
pub use transport::RawResponse;
