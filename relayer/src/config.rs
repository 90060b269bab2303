use solana_sdk::{
    bs58,
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair},
};
use std::{fmt::Display, path::Path, str::FromStr, time::Duration};
use url::Url;

use crate::args::Args;
use crate::retry::{Backoff, RetryPolicy};
use crate::types::BoxError;

pub const DEFAULT_BAND_URL: &str = "https://asia-rpc.bandchain.org/oracle/request_prices";
pub const DEFAULT_CLUSTER: &str = "https://api.devnet.solana.com";
pub const DEFAULT_SYMBOLS: &str = "BTC,ETH,BAND";
pub const DEFAULT_MIN_COUNT: u64 = 10;
pub const DEFAULT_ASK_COUNT: u64 = 16;
pub const DEFAULT_RELAY_INTERVAL_SECS: u64 = 10;

/// Everything the relayer needs, resolved once at startup.
pub struct RelayerConfig {
    pub cluster_url: String,
    pub band_url: Url,
    pub symbols: Vec<String>,
    pub min_count: u64,
    pub ask_count: u64,
    pub payer: Keypair,
    pub std_reference_program: Pubkey,
    pub std_reference_account: Option<Pubkey>,
    pub price_db_program: Pubkey,
    pub price_db_account: Option<Pubkey>,
    pub relay_interval: Duration,
    pub retry: RetryPolicy,
}

impl RelayerConfig {
    pub fn from_env(args: &Args) -> Result<Self, BoxError> {
        Self::resolve(args, |key| std::env::var(key).ok())
    }

    /// Environment first, then the CLI flag, then the default.
    pub fn resolve(args: &Args, env: impl Fn(&str) -> Option<String>) -> Result<Self, BoxError> {
        let text = |key: &str, cli: &Option<String>| env(key).or_else(|| cli.clone());

        let private_key = text("RELAYER_PRIVATE_KEY", &args.private_key).ok_or(
            "RELAYER_PRIVATE_KEY environment variable or --private-key argument must be provided",
        )?;

        let band_url = text("BAND_URL", &args.band_url).unwrap_or_else(|| DEFAULT_BAND_URL.to_string());
        let symbols = text("BAND_SYMBOLS", &args.symbols)
            .unwrap_or_else(|| DEFAULT_SYMBOLS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();
        if symbols.is_empty() {
            return Err("at least one symbol must be configured".into());
        }

        let default_retry = RetryPolicy::default();
        let default_delay = match default_retry.backoff {
            Backoff::Fixed(delay) => delay.as_millis() as u64,
            Backoff::Exponential { initial, .. } => initial.as_millis() as u64,
        };
        let delay = Duration::from_millis(number(
            env("CONFIRM_DELAY_MS"),
            args.confirm_delay_ms,
            default_delay,
            "CONFIRM_DELAY_MS",
        )?);
        let factor = number(
            env("CONFIRM_BACKOFF_FACTOR"),
            args.confirm_backoff_factor,
            1,
            "CONFIRM_BACKOFF_FACTOR",
        )?;
        let backoff = if factor > 1 {
            Backoff::Exponential {
                initial: delay,
                factor,
                max: Duration::from_millis(number(
                    env("CONFIRM_MAX_DELAY_MS"),
                    args.confirm_max_delay_ms,
                    30_000,
                    "CONFIRM_MAX_DELAY_MS",
                )?),
            }
        } else {
            Backoff::Fixed(delay)
        };

        Ok(Self {
            cluster_url: text("SOLANA_CLUSTER", &args.cluster)
                .unwrap_or_else(|| DEFAULT_CLUSTER.to_string()),
            band_url: Url::parse(&band_url)?,
            symbols,
            min_count: number(env("BAND_MIN_COUNT"), args.min_count, DEFAULT_MIN_COUNT, "BAND_MIN_COUNT")?,
            ask_count: number(env("BAND_ASK_COUNT"), args.ask_count, DEFAULT_ASK_COUNT, "BAND_ASK_COUNT")?,
            payer: load_keypair(&private_key)?,
            std_reference_program: pubkey(text("STD_REFERENCE_PROGRAM", &args.std_reference_program))?
                .unwrap_or_else(std_reference_basic::id),
            std_reference_account: pubkey(text("STD_REFERENCE_ACCOUNT", &args.std_reference_account))?,
            price_db_program: pubkey(text("PRICE_DB_PROGRAM", &args.price_db_program))?
                .unwrap_or_else(simple_price_db::id),
            price_db_account: pubkey(text("PRICE_DB_ACCOUNT", &args.price_db_account))?,
            relay_interval: Duration::from_secs(number(
                env("RELAY_INTERVAL_SECS"),
                args.relay_interval_secs,
                DEFAULT_RELAY_INTERVAL_SECS,
                "RELAY_INTERVAL_SECS",
            )?),
            retry: RetryPolicy {
                max_attempts: number(
                    env("CONFIRM_MAX_ATTEMPTS"),
                    args.confirm_max_attempts,
                    default_retry.max_attempts,
                    "CONFIRM_MAX_ATTEMPTS",
                )?,
                backoff,
            },
        })
    }

    pub fn std_reference_account(&self) -> Result<Pubkey, BoxError> {
        self.std_reference_account.ok_or_else(|| {
            "STD_REFERENCE_ACCOUNT environment variable or --std-reference-account argument must be provided".into()
        })
    }

    pub fn price_db_account(&self) -> Result<Pubkey, BoxError> {
        self.price_db_account.ok_or_else(|| {
            "PRICE_DB_ACCOUNT environment variable or --price-db-account argument must be provided".into()
        })
    }
}

fn number<T>(env: Option<String>, cli: Option<T>, default: T, key: &str) -> Result<T, BoxError>
where
    T: FromStr,
    T::Err: Display,
{
    match env {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| -> BoxError { format!("{key}={value}: {e}").into() }),
        None => Ok(cli.unwrap_or(default)),
    }
}

fn pubkey(value: Option<String>) -> Result<Option<Pubkey>, BoxError> {
    value
        .map(|s| {
            Pubkey::from_str(s.trim())
                .map_err(|e| -> BoxError { format!("invalid pubkey {s}: {e}").into() })
        })
        .transpose()
}

/// A path to a JSON keypair file, or a base58 secret key.
fn load_keypair(value: &str) -> Result<Keypair, BoxError> {
    if Path::new(value).is_file() {
        return read_keypair_file(value)
            .map_err(|e| -> BoxError { format!("reading keypair {value}: {e}").into() });
    }
    let bytes = bs58::decode(value.trim())
        .into_vec()
        .map_err(|e| -> BoxError { format!("RELAYER_PRIVATE_KEY is not base58: {e}").into() })?;
    Keypair::try_from(&bytes[..])
        .map_err(|e| -> BoxError { format!("RELAYER_PRIVATE_KEY is not a keypair: {e}").into() })
}
