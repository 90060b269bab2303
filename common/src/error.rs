// error.rs
use solana_program::program_error::ProgramError;
use thiserror::Error;

/// Failures raised while encoding, decoding or validating price accounts.
///
/// On-chain, every variant surfaces as `ProgramError::Custom(code)`; the
/// codes 112..=115 are kept stable for clients that already match on them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceFeedError {
    #[error("signer does not own this account")]
    Unauthorized,

    #[error("account data could not be decoded")]
    InvalidState,

    #[error("price table is full")]
    CapacityExceeded,

    #[error("no price stored for the requested symbol")]
    PriceNotFound,

    #[error("record buffer is {len} bytes, expected at least {expected}")]
    MalformedRecord { len: usize, expected: usize },

    #[error("symbol is {len} bytes, at most {max} allowed")]
    SymbolTooLong { len: usize, max: usize },

    #[error("symbol must not be empty")]
    EmptySymbol,

    #[error("symbol is not valid UTF-8 or contains a NUL byte")]
    InvalidSymbol,

    #[error("rate {0} does not fit a signed 64-bit price")]
    PriceOverflow(u64),
}

impl PriceFeedError {
    pub fn code(&self) -> u32 {
        match self {
            Self::Unauthorized => 112,
            Self::InvalidState => 113,
            Self::CapacityExceeded => 114,
            Self::PriceNotFound => 115,
            Self::MalformedRecord { .. } => 116,
            Self::SymbolTooLong { .. } => 117,
            Self::EmptySymbol => 118,
            Self::InvalidSymbol => 119,
            Self::PriceOverflow(_) => 120,
        }
    }
}

impl From<PriceFeedError> for ProgramError {
    fn from(e: PriceFeedError) -> Self {
        ProgramError::Custom(e.code())
    }
}
