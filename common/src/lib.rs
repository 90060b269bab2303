pub mod account; // account lifecycle helpers shared by both programs
pub mod error; // error codes shared by the programs and the relayer
pub mod symbol; // fixed-width symbol encoding used by every account layout

pub use account::is_initialized;
pub use error::PriceFeedError;
pub use symbol::{decode_symbol, encode_symbol, is_empty_symbol, Symbol, SYMBOL_LEN};
