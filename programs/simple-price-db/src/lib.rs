#[cfg(not(feature = "no-entrypoint"))]
pub mod entrypoint; // entrypoint where the Solana program process starts
pub mod instruction; // instruction layout, `encode_set_symbol` and client-side builders
pub mod processor; // where instruction logics are processed
pub mod state; // the 48-byte price record and `decode_record`

pub use instruction::encode_set_symbol;
pub use state::{decode_record, PriceRecord};

solana_program::declare_id!("AqvkLgFSV6ttq8JXvu8Xxf5jaq3hgsSfHniXaa5BhdR3");
