/*
[INPUT]:  Mock market data responses (JSON envelopes and CSV)
[OUTPUT]: Test results for quote, historical and instrument endpoints
[POS]:    Integration tests - market data
[UPDATE]: When market data endpoints or response formats change
*/

mod common;

use chrono::NaiveDate;
use common::{authed_client, setup_mock_server, success_envelope};
use kiteconnect_adapter::{ErrorCategory, Exchange};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_quote_repeats_instrument_key() {
    let server = setup_mock_server().await;
    let body = success_envelope(json!({
        "NSE:INFY": {
            "instrument_token": 408065,
            "last_price": 1500.5,
            "volume": 1249924,
            "ohlc": {"open": 1495.0, "high": 1510.0, "low": 1490.0, "close": 1489.3},
            "depth": {
                "buy": [{"price": 1500.4, "quantity": 10, "orders": 2}],
                "sell": [{"price": 1500.6, "quantity": 5, "orders": 1}]
            }
        },
        "NSE:TCS": {
            "instrument_token": 2953217,
            "last_price": 3900.0
        }
    }));

    Mock::given(method("GET"))
        .and(path("/quote"))
        .and(query_param("i", "NSE:INFY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let quotes = client.quote(&["NSE:INFY", "NSE:TCS"]).await.expect("quote failed");

    assert_eq!(quotes.len(), 2);
    let infy = &quotes["NSE:INFY"];
    assert_eq!(infy.last_price, 1500.5);
    assert_eq!(infy.ohlc.close, 1489.3);
    assert_eq!(infy.depth.buy[0].quantity, 10);

    let requests = server.received_requests().await.expect("requests recorded");
    assert_eq!(requests[0].url.query(), Some("i=NSE%3AINFY&i=NSE%3ATCS"));
}

#[tokio::test]
async fn test_ltp_hits_its_own_endpoint() {
    let server = setup_mock_server().await;
    let body = success_envelope(json!({
        "NSE:INFY": {"instrument_token": 408065, "last_price": 1500.5}
    }));

    Mock::given(method("GET"))
        .and(path("/quote/ltp"))
        .and(query_param("i", "NSE:INFY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let ltp = client.ltp(&["NSE:INFY"]).await.expect("ltp failed");
    assert_eq!(ltp["NSE:INFY"].last_price, 1500.5);
}

#[tokio::test]
async fn test_ohlc_hits_its_own_endpoint() {
    let server = setup_mock_server().await;
    let body = success_envelope(json!({
        "NSE:INFY": {
            "instrument_token": 408065,
            "last_price": 1500.5,
            "ohlc": {"open": 1495.0, "high": 1510.0, "low": 1490.0, "close": 1489.3}
        }
    }));

    Mock::given(method("GET"))
        .and(path("/quote/ohlc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let ohlc = client.ohlc(&["NSE:INFY"]).await.expect("ohlc failed");
    assert_eq!(ohlc["NSE:INFY"].ohlc.high, 1510.0);
}

#[tokio::test]
async fn test_historical_data() {
    let server = setup_mock_server().await;
    let body = success_envelope(json!({
        "candles": [
            ["2021-05-31T09:15:00+0530", 1723.0, 1730.45, 1722.2, 1728.8, 541323, 98500],
            ["2021-05-31T09:16:00+0530", 1728.8, 1729.4, 1725.0, 1726.1, 212304]
        ]
    }));

    Mock::given(method("GET"))
        .and(path("/instruments/historical/408065/minute"))
        .and(query_param("from", "2021-05-31 09:15:00"))
        .and(query_param("to", "2021-05-31 15:30:00"))
        .and(query_param("continuous", "0"))
        .and(query_param("oi", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let from = NaiveDate::from_ymd_opt(2021, 5, 31)
        .and_then(|d| d.and_hms_opt(9, 15, 0))
        .expect("from");
    let to = NaiveDate::from_ymd_opt(2021, 5, 31)
        .and_then(|d| d.and_hms_opt(15, 30, 0))
        .expect("to");

    let client = authed_client(&server);
    let candles = client
        .historical_data(408065, "minute", from, to, false, true)
        .await
        .expect("historical_data failed");

    assert_eq!(candles.len(), 2);
    assert_eq!(candles[0].oi, 98500);
    assert_eq!(candles[0].volume, 541323);
    // second candle has no OI column
    assert_eq!(candles[1].oi, 0);
    assert_eq!(candles[1].close, 1726.1);
}

#[tokio::test]
async fn test_instruments_csv_bypasses_envelope() {
    let server = setup_mock_server().await;
    let csv_body = "\
instrument_token,exchange_token,tradingsymbol,name,last_price,expiry,strike,tick_size,lot_size,instrument_type,segment,exchange
408065,1594,INFY,INFY,0,,0,0.05,1,EQ,NSE,NSE
12073986,47164,NIFTY24JANFUT,NIFTY,0,2024-01-25,0,0.05,50,FUT,NFO-FUT,NFO
";

    Mock::given(method("GET"))
        .and(path("/instruments/NFO"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(csv_body, "text/csv"))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let instruments = client
        .instruments_by_exchange(Exchange::Nfo)
        .await
        .expect("instruments failed");

    assert_eq!(instruments.len(), 2);
    assert_eq!(instruments[0].tradingsymbol, "INFY");
    assert_eq!(instruments[0].expiry, None);
    assert_eq!(
        instruments[1].expiry,
        NaiveDate::from_ymd_opt(2024, 1, 25)
    );
    assert_eq!(instruments[1].lot_size, 50.0);
}

#[tokio::test]
async fn test_instruments_bad_csv_is_general_error() {
    let server = setup_mock_server().await;
    let csv_body = "\
instrument_token,exchange_token,tradingsymbol,name,last_price,expiry,strike,tick_size,lot_size,instrument_type,segment,exchange
not_a_number,1594,INFY,INFY,0,,0,0.05,1,EQ,NSE,NSE
";

    Mock::given(method("GET"))
        .and(path("/instruments"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(csv_body, "text/csv"))
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let err = client.instruments().await.unwrap_err();

    assert_eq!(err.category, ErrorCategory::General);
    assert!(err.message.starts_with("Error parsing csv response:"));
}
