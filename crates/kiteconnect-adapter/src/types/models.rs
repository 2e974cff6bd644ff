/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single order as reported by the order book and order history.
/// Kite omits fields freely, so everything defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    pub account_id: String,
    pub placed_by: String,

    pub order_id: String,
    pub exchange_order_id: String,
    pub parent_order_id: String,
    pub status: String,
    pub status_message: String,
    pub status_message_raw: String,
    pub order_timestamp: Option<String>,
    pub exchange_update_timestamp: Option<String>,
    pub exchange_timestamp: Option<String>,
    pub variety: String,
    pub modified: bool,
    pub meta: Value,

    pub exchange: String,
    pub tradingsymbol: String,
    pub instrument_token: u32,

    pub order_type: String,
    pub transaction_type: String,
    pub validity: String,
    pub validity_ttl: i32,
    pub product: String,
    pub quantity: f64,
    pub disclosed_quantity: f64,
    pub price: f64,
    pub trigger_price: f64,

    pub average_price: f64,
    pub filled_quantity: f64,
    pub pending_quantity: f64,
    pub cancelled_quantity: f64,

    pub auction_number: String,

    pub tag: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Trade {
    pub average_price: f64,
    pub quantity: f64,
    pub trade_id: String,
    pub product: String,
    pub fill_timestamp: Option<String>,
    pub exchange_timestamp: Option<String>,
    pub exchange_order_id: String,
    pub order_id: String,
    pub transaction_type: String,
    pub tradingsymbol: String,
    pub exchange: String,
    pub instrument_token: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Ohlc {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthItem {
    pub price: f64,
    pub quantity: u32,
    pub orders: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Depth {
    pub buy: Vec<DepthItem>,
    pub sell: Vec<DepthItem>,
}

/// Full market quote for one instrument, keyed by `exchange:tradingsymbol`
/// in the response map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Quote {
    pub instrument_token: u32,
    pub timestamp: Option<String>,
    pub last_price: f64,
    pub last_quantity: i64,
    pub last_trade_time: Option<String>,
    pub average_price: f64,
    pub volume: i64,
    pub buy_quantity: i64,
    pub sell_quantity: i64,
    pub ohlc: Ohlc,
    pub net_change: f64,
    pub oi: f64,
    pub oi_day_high: f64,
    pub oi_day_low: f64,
    pub lower_circuit_limit: f64,
    pub upper_circuit_limit: f64,
    pub depth: Depth,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteOhlc {
    pub instrument_token: u32,
    pub last_price: f64,
    pub ohlc: Ohlc,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteLtp {
    pub instrument_token: u32,
    pub last_price: f64,
}

/// One historical candle. Candles arrive on the wire as heterogenous JSON
/// arrays and are converted row by row, never deserialized directly.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalData {
    pub date: DateTime<FixedOffset>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    /// Open interest; zero when the exchange reports none.
    pub oi: i64,
}

/// One row of the instrument master CSV dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub instrument_token: u32,
    pub exchange_token: u32,
    pub tradingsymbol: String,
    pub name: String,
    pub last_price: f64,
    #[serde(with = "serde_helpers::optional_date")]
    pub expiry: Option<NaiveDate>,
    #[serde(rename = "strike")]
    pub strike_price: f64,
    pub tick_size: f64,
    pub lot_size: f64,
    pub instrument_type: String,
    pub segment: String,
    pub exchange: String,
}

mod serde_helpers {
    /// Expiry comes through the CSV as `YYYY-MM-DD` or an empty field for
    /// non-derivative instruments.
    pub mod optional_date {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
                None => serializer.serialize_str(""),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            let raw = String::deserialize(deserializer)?;
            if raw.is_empty() {
                return Ok(None);
            }
            NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
    }
}
