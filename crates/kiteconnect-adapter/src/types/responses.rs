/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// Acknowledgement for place/modify/cancel order calls.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderResponse {
    pub order_id: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserMeta {
    pub demat_consent: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub user_id: String,
    pub user_name: String,
    #[serde(rename = "user_shortname")]
    pub user_short_name: String,
    pub avatar_url: Option<String>,
    pub user_type: String,
    pub email: String,
    pub broker: String,
    pub meta: UserMeta,
    pub products: Vec<String>,
    pub order_types: Vec<String>,
    pub exchanges: Vec<String>,
}

/// Durable tokens returned by session creation and renewal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSessionTokens {
    pub user_id: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Full session payload returned after exchanging a request token.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSession {
    pub user_id: String,
    pub user_name: String,
    #[serde(rename = "user_shortname")]
    pub user_short_name: String,
    pub avatar_url: Option<String>,
    pub user_type: String,
    pub email: String,
    pub broker: String,
    pub meta: UserMeta,
    pub products: Vec<String>,
    pub order_types: Vec<String>,
    pub exchanges: Vec<String>,

    pub api_key: String,
    pub access_token: String,
    pub refresh_token: String,
    pub public_token: String,
    pub enctoken: String,
    pub login_time: String,
}
