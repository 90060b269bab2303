use price_feed_common::decode_symbol;
use serde::Serialize;
use std_reference_basic::{instruction, state::StdReference};
use tracing::{error, info};

use crate::chain_client::ChainClient;
use crate::config::RelayerConfig;
use crate::types::{BoxError, PriceSource, RelayMessage};

const SEPARATOR: &str =
    "=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=";

/// A stored reference entry, as logged.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct RateView {
    pub symbol: String,
    pub rate: u64,
    pub last_updated: u64,
    pub request_id: u64,
}

pub fn rate_views(reference: &StdReference) -> Vec<RateView> {
    reference
        .active()
        .iter()
        .map(|p| RateView {
            symbol: decode_symbol(&p.symbol).unwrap_or_else(|_| format!("{:?}", p.symbol)),
            rate: p.rate,
            last_updated: p.last_updated,
            request_id: p.request_id,
        })
        .collect()
}

/// Relays rounds forever; a failed round is logged and the next one starts after the interval.
pub async fn run(source: &dyn PriceSource, chain: &ChainClient, config: &RelayerConfig) {
    loop {
        if let Err(e) = relay_once(source, chain, config).await {
            error!(error = %e, "Relay round failed");
        }
        info!("{SEPARATOR}");
        tokio::time::sleep(config.relay_interval).await;
    }
}

/// Fetches one round of prices; an empty round is an error so nothing is sent.
pub async fn next_message(source: &dyn PriceSource, symbols: &[String]) -> Result<RelayMessage, BoxError> {
    let message = source
        .fetch_prices(symbols)
        .await
        .map_err(|e| format!("Fail to get prices from band: {e}"))?;
    info!(relay = %serde_json::to_string(&message)?, "Relay message");
    if message.is_empty() {
        return Err("Band returned no prices".into());
    }
    Ok(message)
}

pub async fn relay_once(
    source: &dyn PriceSource,
    chain: &ChainClient,
    config: &RelayerConfig,
) -> Result<(), BoxError> {
    let reference = config.std_reference_account()?;
    let message = next_message(source, &config.symbols).await?;

    let ix = instruction::relay(
        &config.std_reference_program,
        &reference,
        &chain.payer(),
        message.to_prices()?,
    );
    chain.send_and_confirm(&[ix], &[]).await?;

    let stored = chain
        .read_reference(&reference)
        .await
        .map_err(|e| format!("Fail to get current rates from std reference: {e}"))?;
    info!(rates = %serde_json::to_string(&rate_views(&stored))?, "Current rates");

    Ok(())
}
