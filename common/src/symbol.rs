// symbol.rs
use crate::error::PriceFeedError;

pub const SYMBOL_LEN: usize = 8;

/// A ticker stored on chain: UTF-8 bytes right-padded with zeros.
pub type Symbol = [u8; SYMBOL_LEN];

/// Zero-pads `symbol` to `SYMBOL_LEN` bytes. `""` encodes to the all-zero
/// empty slot; callers that store symbols reject that with `is_empty_symbol`.

pub fn encode_symbol(symbol: &str) -> Result<Symbol, PriceFeedError> {
    let bytes = symbol.as_bytes();
    if bytes.len() > SYMBOL_LEN {
        return Err(PriceFeedError::SymbolTooLong {
            len: bytes.len(),
            max: SYMBOL_LEN,
        });
    }

    let mut out = [0u8; SYMBOL_LEN];
    out[..bytes.len()].copy_from_slice(bytes);
    Ok(out)
}

/// Only trailing zeros are padding; anything before the last non-zero byte is kept.
pub fn decode_symbol(raw: &Symbol) -> Result<String, PriceFeedError> {
    let end = raw.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    std::str::from_utf8(&raw[..end])
        .map(str::to_owned)
        .map_err(|_| PriceFeedError::InvalidSymbol)
}

pub fn is_empty_symbol(raw: &Symbol) -> bool {
    raw.iter().all(|&b| b == 0)
}
