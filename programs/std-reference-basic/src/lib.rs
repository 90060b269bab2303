#[cfg(not(feature = "no-entrypoint"))]
pub mod entrypoint; // entrypoint where the Solana program process starts
pub mod instruction; // instruction layout and client-side builders
pub mod processor; // where instruction logics are processed
pub mod state; // the reference price table stored on chain

solana_program::declare_id!("49EiY6NJ6mdSVij8wY1x7FqsDapF15Z4v8nmEFwxVTgP");
