/*
[INPUT]:  Path segment values (variety, order id, instrument token)
[OUTPUT]: Kite REST endpoint paths
[POS]:    HTTP layer - URL path template table (pure data)
[UPDATE]: When Kite adds or renames endpoints
*/

use crate::types::{Exchange, Variety};

pub const USER_SESSION: &str = "/session/token";
pub const USER_SESSION_INVALIDATE: &str = "/session/token";
pub const USER_SESSION_RENEW: &str = "/session/refresh_token";
pub const USER_PROFILE: &str = "/user/profile";

pub const ORDERS: &str = "/orders";
pub const TRADES: &str = "/trades";

pub const QUOTE: &str = "/quote";
pub const QUOTE_LTP: &str = "/quote/ltp";
pub const QUOTE_OHLC: &str = "/quote/ohlc";

pub const INSTRUMENTS: &str = "/instruments";

pub fn order_history(order_id: &str) -> String {
    format!("/orders/{order_id}")
}

pub fn order_trades(order_id: &str) -> String {
    format!("/orders/{order_id}/trades")
}

pub fn place_order(variety: Variety) -> String {
    format!("/orders/{}", variety.as_str())
}

pub fn modify_order(variety: Variety, order_id: &str) -> String {
    format!("/orders/{}/{order_id}", variety.as_str())
}

pub fn cancel_order(variety: Variety, order_id: &str) -> String {
    format!("/orders/{}/{order_id}", variety.as_str())
}

pub fn instruments_by_exchange(exchange: Exchange) -> String {
    format!("/instruments/{}", exchange.as_str())
}

pub fn historical(instrument_token: u32, interval: &str) -> String {
    format!("/instruments/historical/{instrument_token}/{interval}")
}
