use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::types::{BoxError, PriceSource, RelayMessage};

/// Queries BandChain's `request_prices` endpoint.
pub struct BandClient {
    http: reqwest::Client,
    url: Url,
    min_count: u64,
    ask_count: u64,
}

impl BandClient {
    pub fn new(url: Url, min_count: u64, ask_count: u64) -> Self {
        Self {
            http: reqwest::Client::new(),
            url,
            min_count,
            ask_count,
        }
    }

    pub fn request_body(&self, symbols: &[String]) -> Value {
        serde_json::json!({
            "symbols": symbols,
            "min_count": self.min_count,
            "ask_count": self.ask_count,
        })
    }
}

#[async_trait]
impl PriceSource for BandClient {
    async fn fetch_prices(&self, symbols: &[String]) -> Result<RelayMessage, BoxError> {
        debug!(url = %self.url, ?symbols, "Requesting prices from Band");
        let response: Value = self
            .http
            .post(self.url.clone())
            .json(&self.request_body(symbols))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        parse_band_response(symbols, &response)
    }
}

/// Band encodes 64-bit integers as JSON strings; plain numbers are accepted too.
pub fn parse_band_response(symbols: &[String], response: &Value) -> Result<RelayMessage, BoxError> {
    let result = response
        .get("result")
        .ok_or("Missing result field")?
        .as_array()
        .ok_or("Result field is not an array")?;

    if result.len() != symbols.len() {
        return Err(format!(
            "Band returned {} price(s) for {} requested symbol(s)",
            result.len(),
            symbols.len()
        )
        .into());
    }

    let mut message = RelayMessage::default();
    for (entry, requested) in result.iter().zip(symbols) {
        let symbol = match entry.get("symbol") {
            Some(symbol) => symbol.as_str().ok_or("Symbol is not a string")?.to_string(),
            None => requested.clone(),
        };
        let rate = get_u64(entry, "px")?;
        let resolve_time = get_u64(entry, "resolve_time")?;
        let request_id = get_u64(entry, "request_id")?;
        message.push(symbol, rate, resolve_time, request_id);
    }
    Ok(message)
}

fn get_u64(entry: &Value, field: &str) -> Result<u64, BoxError> {
    match entry.get(field) {
        Some(Value::String(s)) => Ok(s.parse::<u64>()?),
        Some(Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| format!("{field} is not an unsigned integer").into()),
        Some(_) => Err(format!("{field} is not a number").into()),
        None => Err(format!("Missing {field}").into()),
    }
}
