/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust parameter structs with form/query serialization
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::enums::{Exchange, OrderType, Product, TransactionType, Validity};

/// Parameters for placing or modifying an order. Absent fields are left
/// out of the encoded form entirely.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<Exchange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tradingsymbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity: Option<Validity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_type: Option<OrderType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disclosed_quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_price: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub squareoff: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stoploss: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_stoploss: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub iceberg_legs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iceberg_quantity: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auction_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Parameters for the historical candle endpoint. The instrument token
/// and interval travel both in the path and in the query, as the API
/// expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalDataParams {
    pub from: String,
    pub to: String,
    pub continuous: u8,
    pub oi: u8,
    pub instrument_token: u32,
    pub interval: String,
}
