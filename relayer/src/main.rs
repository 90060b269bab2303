mod args;
mod band;
mod chain_client;
mod config;
mod relay;
mod retry;
mod types;

use clap::Parser;
use simple_price_db::state::SimplePriceDb;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use std::str::FromStr;
use std_reference_basic::state::StdReference;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::{Args, Command};
use crate::band::BandClient;
use crate::chain_client::ChainClient;
use crate::config::RelayerConfig;
use crate::types::BoxError;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();
    let command = args.command.clone().unwrap_or_default();
    let config = RelayerConfig::from_env(&args)?;

    let chain = ChainClient::new(&config.cluster_url, config.payer.insecure_clone(), config.retry);
    info!(wallet_pubkey = %chain.payer(), cluster = %config.cluster_url, "Identity initialized");

    match command {
        Command::Relay => {
            let band = BandClient::new(config.band_url.clone(), config.min_count, config.ask_count);
            info!(symbols = ?config.symbols, band_url = %config.band_url, "Starting relay loop");
            relay::run(&band, &chain, &config).await;
        }
        Command::SetPrice { symbol } => {
            let ix = simple_price_db::instruction::set_price(
                &config.price_db_program,
                &config.price_db_account()?,
                &chain.payer(),
                &config.std_reference_account()?,
                &symbol,
            )?;
            chain.send_and_confirm(&[ix], &[]).await?;
            log_record(&chain, &config).await?;
        }
        Command::ReadRecord => log_record(&chain, &config).await?,
        Command::ReadReference => {
            let stored = chain.read_reference(&config.std_reference_account()?).await?;
            info!(
                owner = %Pubkey::new_from_array(stored.owner),
                capacity = stored.capacity(),
                rates = %serde_json::to_string(&relay::rate_views(&stored))?,
                "Std reference"
            );
        }
        Command::InitReference { capacity } => {
            let account = Keypair::new();
            let ix = std_reference_basic::instruction::init(
                &config.std_reference_program,
                &account.pubkey(),
                capacity,
                &chain.payer(),
            );
            chain
                .create_and_init(
                    &account,
                    StdReference::space(capacity),
                    &config.std_reference_program,
                    ix,
                )
                .await?;
            info!(std_reference_account = %account.pubkey(), capacity, "Std reference initialized");
        }
        Command::InitPriceDb => {
            let account = Keypair::new();
            let ix = simple_price_db::instruction::init(
                &config.price_db_program,
                &account.pubkey(),
                &chain.payer(),
            );
            chain
                .create_and_init(&account, SimplePriceDb::SIZE, &config.price_db_program, ix)
                .await?;
            info!(price_db_account = %account.pubkey(), "Price db initialized");
        }
        Command::TransferReference { new_owner } => {
            let ix = std_reference_basic::instruction::transfer_ownership(
                &config.std_reference_program,
                &config.std_reference_account()?,
                &chain.payer(),
                &Pubkey::from_str(&new_owner)?,
            );
            chain.send_and_confirm(&[ix], &[]).await?;
        }
        Command::TransferPriceDb { new_owner } => {
            let ix = simple_price_db::instruction::transfer_ownership(
                &config.price_db_program,
                &config.price_db_account()?,
                &chain.payer(),
                &Pubkey::from_str(&new_owner)?,
            );
            chain.send_and_confirm(&[ix], &[]).await?;
        }
    }

    Ok(())
}

async fn log_record(chain: &ChainClient, config: &RelayerConfig) -> Result<(), BoxError> {
    let record = chain.read_record(&config.price_db_account()?).await?;
    info!(
        owner = %record.owner_pubkey(),
        latest_symbol = %record.latest_symbol,
        latest_price = record.latest_price,
        "Price record"
    );
    Ok(())
}
