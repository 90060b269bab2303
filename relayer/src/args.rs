use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(long, global = true, help = "Base58 private key or path to a keypair file")]
    pub private_key: Option<String>,
    #[arg(long, global = true, help = "Solana cluster URL")]
    pub cluster: Option<String>,
    #[arg(long, global = true, help = "BandChain request_prices endpoint")]
    pub band_url: Option<String>,
    #[arg(long, global = true, help = "Comma-separated list of symbols to relay")]
    pub symbols: Option<String>,
    #[arg(long, global = true, help = "Minimum number of Band validators that must report")]
    pub min_count: Option<u64>,
    #[arg(long, global = true, help = "Number of Band validators asked to report")]
    pub ask_count: Option<u64>,
    #[arg(long, global = true, help = "Std reference program id")]
    pub std_reference_program: Option<String>,
    #[arg(long, global = true, help = "Std reference account address")]
    pub std_reference_account: Option<String>,
    #[arg(long, global = true, help = "Simple price db program id")]
    pub price_db_program: Option<String>,
    #[arg(long, global = true, help = "Simple price db account address")]
    pub price_db_account: Option<String>,
    #[arg(long, global = true, help = "Seconds between relay rounds")]
    pub relay_interval_secs: Option<u64>,
    #[arg(long, global = true, help = "Transaction status polls before giving up")]
    pub confirm_max_attempts: Option<u32>,
    #[arg(long, global = true, help = "Milliseconds between transaction status polls")]
    pub confirm_delay_ms: Option<u64>,
    #[arg(long, global = true, help = "Multiply the poll delay by this factor after each attempt")]
    pub confirm_backoff_factor: Option<u32>,
    #[arg(long, global = true, help = "Upper bound for the poll delay in milliseconds")]
    pub confirm_max_delay_ms: Option<u64>,
}

#[derive(Subcommand, Debug, Clone, Default, PartialEq, Eq)]
pub enum Command {
    /// Poll Band and relay prices into the std reference account forever
    #[default]
    Relay,
    /// Copy one symbol's rate from the std reference account into the price db
    SetPrice {
        #[arg(long)]
        symbol: String,
    },
    /// Print the decoded price db record
    ReadRecord,
    /// Print the rates stored in the std reference account
    ReadReference,
    /// Create and initialize a std reference account owned by the payer
    InitReference {
        #[arg(long, default_value_t = 16)]
        capacity: u8,
    },
    /// Create and initialize a price db account owned by the payer
    InitPriceDb,
    /// Hand the std reference account over to a new owner
    TransferReference {
        #[arg(long)]
        new_owner: String,
    },
    /// Hand the price db account over to a new owner
    TransferPriceDb {
        #[arg(long)]
        new_owner: String,
    },
}
