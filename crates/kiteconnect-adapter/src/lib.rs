/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Kite adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod types;

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    ErrorCategory,
    KiteClient,
    KiteError,
    RawResponse,
    Result,
    KITE_BASE_URL,
};

// Re-export all types
pub use types::*;
