/*
[INPUT]:  Instrument identifiers and candle query parameters
[OUTPUT]: Market quotes, historical candles and the instrument master
[POS]:    HTTP layer - market data endpoints
[UPDATE]: When adding market data endpoints or changing response formats
*/

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime};
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::http::client::NO_PARAMS;
use crate::http::endpoints;
use crate::http::error::{ErrorCategory, KiteError};
use crate::http::{KiteClient, Result};
use crate::types::{
    Exchange, HistoricalData, HistoricalDataParams, Instrument, Quote, QuoteLtp, QuoteOhlc,
};

const CANDLE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";
const HISTORICAL_PARAM_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Candle payload as it arrives: rows of heterogenous JSON arrays.
#[derive(Debug, Deserialize)]
struct HistoricalDataReceived {
    candles: Vec<Vec<Value>>,
}

impl KiteClient {
    /// Full quotes for up to 500 instruments, keyed `exchange:tradingsymbol`
    ///
    /// GET /quote?i={instrument}&i={instrument}...
    pub async fn quote(&self, instruments: &[&str]) -> Result<HashMap<String, Quote>> {
        let params = instrument_params(instruments);
        self.request_envelope(Method::GET, endpoints::QUOTE, Some(params.as_slice()))
            .await
    }

    /// OHLC snapshots for up to 1000 instruments
    ///
    /// GET /quote/ohlc
    pub async fn ohlc(&self, instruments: &[&str]) -> Result<HashMap<String, QuoteOhlc>> {
        let params = instrument_params(instruments);
        self.request_envelope(Method::GET, endpoints::QUOTE_OHLC, Some(params.as_slice()))
            .await
    }

    /// Last traded prices for up to 1000 instruments
    ///
    /// GET /quote/ltp
    pub async fn ltp(&self, instruments: &[&str]) -> Result<HashMap<String, QuoteLtp>> {
        let params = instrument_params(instruments);
        self.request_envelope(Method::GET, endpoints::QUOTE_LTP, Some(params.as_slice()))
            .await
    }

    /// Historical candles for one instrument
    ///
    /// GET /instruments/historical/{instrument_token}/{interval}
    pub async fn historical_data(
        &self,
        instrument_token: u32,
        interval: &str,
        from: NaiveDateTime,
        to: NaiveDateTime,
        continuous: bool,
        oi: bool,
    ) -> Result<Vec<HistoricalData>> {
        let params = HistoricalDataParams {
            from: from.format(HISTORICAL_PARAM_FORMAT).to_string(),
            to: to.format(HISTORICAL_PARAM_FORMAT).to_string(),
            continuous: continuous.into(),
            oi: oi.into(),
            instrument_token,
            interval: interval.to_string(),
        };

        let received: HistoricalDataReceived = self
            .request_envelope(
                Method::GET,
                &endpoints::historical(instrument_token, interval),
                Some(&params),
            )
            .await?;

        received.candles.iter().map(|row| parse_candle(row)).collect()
    }

    /// Full instrument master dump
    ///
    /// GET /instruments (CSV, no envelope)
    pub async fn instruments(&self) -> Result<Vec<Instrument>> {
        self.parse_instruments(endpoints::INSTRUMENTS).await
    }

    /// Instrument master dump for one exchange
    ///
    /// GET /instruments/{exchange} (CSV, no envelope)
    pub async fn instruments_by_exchange(&self, exchange: Exchange) -> Result<Vec<Instrument>> {
        self.parse_instruments(&endpoints::instruments_by_exchange(exchange))
            .await
    }

    /// The instrument endpoints return CSV and bypass the envelope decoder
    /// entirely; rows are deserialized straight off the raw body.
    async fn parse_instruments(&self, path: &str) -> Result<Vec<Instrument>> {
        let resp = self.request_raw(Method::GET, path, NO_PARAMS).await?;

        let mut reader = csv::Reader::from_reader(resp.body.as_slice());
        let mut instruments = Vec::new();
        for row in reader.deserialize() {
            let instrument: Instrument = row.map_err(|err| {
                debug!(path, error = %err, "error parsing csv response");
                KiteError::new(
                    ErrorCategory::General,
                    format!("Error parsing csv response: {err}"),
                    Value::Null,
                )
            })?;
            instruments.push(instrument);
        }
        Ok(instruments)
    }
}

fn instrument_params<'a>(instruments: &[&'a str]) -> Vec<(&'static str, &'a str)> {
    instruments.iter().map(|instrument| ("i", *instrument)).collect()
}

fn parse_candle(row: &[Value]) -> Result<HistoricalData> {
    let date_raw = cell_str(row, 0, "date")?;
    let date = DateTime::parse_from_str(date_raw, CANDLE_DATE_FORMAT).map_err(|err| {
        KiteError::new(
            ErrorCategory::General,
            format!("Error decoding response: {err}"),
            Value::Null,
        )
    })?;

    // OI is only present when requested; absent means zero.
    let oi = match row.get(6) {
        Some(value) => value.as_f64().ok_or_else(|| cell_error("oi", Some(value)))? as i64,
        None => 0,
    };

    Ok(HistoricalData {
        date,
        open: cell_f64(row, 1, "open")?,
        high: cell_f64(row, 2, "high")?,
        low: cell_f64(row, 3, "low")?,
        close: cell_f64(row, 4, "close")?,
        volume: cell_f64(row, 5, "volume")? as i64,
        oi,
    })
}

fn cell_str<'a>(row: &'a [Value], index: usize, field: &str) -> Result<&'a str> {
    row.get(index)
        .and_then(Value::as_str)
        .ok_or_else(|| cell_error(field, row.get(index)))
}

fn cell_f64(row: &[Value], index: usize, field: &str) -> Result<f64> {
    row.get(index)
        .and_then(Value::as_f64)
        .ok_or_else(|| cell_error(field, row.get(index)))
}

fn cell_error(field: &str, value: Option<&Value>) -> KiteError {
    KiteError::new(
        ErrorCategory::General,
        format!("Error decoding response `{field}`: {value:?}"),
        Value::Null,
    )
}
