/*
[INPUT]:  Broker error-type strings and HTTP status codes
[OUTPUT]: Classified errors with category, status, message and payload
[POS]:    Error handling layer - unified error type for entire crate
[UPDATE]: When Kite adds error categories or changes status conventions
*/

use serde_json::Value;
use thiserror::Error;

/// Closed set of Kite error categories. Each carries a canonical default
/// HTTP status used when synthesizing an error without a known status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    General,
    Token,
    Permission,
    User,
    TwoFa,
    Order,
    Input,
    Data,
    Network,
}

impl ErrorCategory {
    /// Wire name of the category as Kite reports it in error envelopes.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::General => "GeneralException",
            ErrorCategory::Token => "TokenException",
            ErrorCategory::Permission => "PermissionError",
            ErrorCategory::User => "UserException",
            ErrorCategory::TwoFa => "TwoFAException",
            ErrorCategory::Order => "OrderException",
            ErrorCategory::Input => "InputException",
            ErrorCategory::Data => "DataException",
            ErrorCategory::Network => "NetworkException",
        }
    }

    /// Exact-match lookup against the wire names. Unrecognized names
    /// resolve to `General`; this never fails.
    pub fn from_name(name: &str) -> ErrorCategory {
        match name {
            "GeneralException" => ErrorCategory::General,
            "TokenException" => ErrorCategory::Token,
            "PermissionError" => ErrorCategory::Permission,
            "UserException" => ErrorCategory::User,
            "TwoFAException" => ErrorCategory::TwoFa,
            "OrderException" => ErrorCategory::Order,
            "InputException" => ErrorCategory::Input,
            "DataException" => ErrorCategory::Data,
            "NetworkException" => ErrorCategory::Network,
            _ => ErrorCategory::General,
        }
    }

    /// Default category for a bare HTTP status, used only when no
    /// error-type string is available.
    pub fn from_status(status: u16) -> ErrorCategory {
        match status {
            500 => ErrorCategory::General,
            401 | 403 => ErrorCategory::Token,
            400 => ErrorCategory::Input,
            503 | 504 => ErrorCategory::Network,
            _ => ErrorCategory::General,
        }
    }

    /// Default HTTP status when constructing an error from a category
    /// without an externally given status. Not the inverse of
    /// `from_status`: both tables are kept exactly as Kite documents them.
    pub fn default_status(self) -> u16 {
        match self {
            ErrorCategory::General => 500,
            ErrorCategory::Token
            | ErrorCategory::Permission
            | ErrorCategory::User
            | ErrorCategory::TwoFa => 403,
            ErrorCategory::Order | ErrorCategory::Input => 400,
            ErrorCategory::Data => 504,
            ErrorCategory::Network => 503,
        }
    }
}

/// Unified error for every Kite operation: a semantic category plus the
/// HTTP status it travelled with (or the category default when synthesized
/// locally), the broker's message and any opaque error payload.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct KiteError {
    pub category: ErrorCategory,
    pub status: u16,
    pub message: String,
    pub data: Value,
}

impl KiteError {
    /// Build an error from a category alone, synthesizing the status from
    /// the category's default. The message is never left empty.
    pub fn new(category: ErrorCategory, message: impl Into<String>, data: Value) -> Self {
        Self::with_status(category, category.default_status(), message, data)
    }

    /// Build an error preserving an externally known HTTP status.
    pub fn with_status(
        category: ErrorCategory,
        status: u16,
        message: impl Into<String>,
        data: Value,
    ) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = category.as_str().to_string();
        }
        Self {
            category,
            status,
            message,
            data,
        }
    }
}

/// Result type alias for Kite operations
pub type Result<T> = std::result::Result<T, KiteError>;
