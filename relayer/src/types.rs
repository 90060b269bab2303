use async_trait::async_trait;
use price_feed_common::{encode_symbol, is_empty_symbol, PriceFeedError};
use serde::Serialize;
use std_reference_basic::state::Price;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// One oracle round, column-oriented the way it is logged.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RelayMessage {
    pub symbols: Vec<String>,
    pub rates: Vec<u64>,
    pub resolve_times: Vec<u64>,
    pub request_ids: Vec<u64>,
}

impl RelayMessage {
    pub fn push(&mut self, symbol: String, rate: u64, resolve_time: u64, request_id: u64) {
        self.symbols.push(symbol);
        self.rates.push(rate);
        self.resolve_times.push(resolve_time);
        self.request_ids.push(request_id);
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn to_prices(&self) -> Result<Vec<Price>, PriceFeedError> {
        (0..self.len())
            .map(|i| {
                let symbol = encode_symbol(&self.symbols[i])?;
                if is_empty_symbol(&symbol) {
                    return Err(PriceFeedError::EmptySymbol);
                }
                Ok(Price::new(
                    symbol,
                    self.rates[i],
                    self.resolve_times[i],
                    self.request_ids[i],
                ))
            })
            .collect()
    }
}

#[async_trait]
pub trait PriceSource {
    async fn fetch_prices(&self, symbols: &[String]) -> Result<RelayMessage, BoxError>;
}
