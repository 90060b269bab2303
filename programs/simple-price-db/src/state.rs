// state.rs
use borsh::{BorshDeserialize, BorshSerialize};
use price_feed_common::{decode_symbol, PriceFeedError, Symbol};
use solana_program::pubkey::Pubkey;

/// On-chain layout, 48 bytes with no padding:
///
/// | offset | len | field          |
/// |--------|-----|----------------|
/// | 0      | 32  | owner          |
/// | 32     | 8   | latest_symbol  |
/// | 40     | 8   | latest_price   |
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimplePriceDb {
    pub owner: [u8; 32],
    pub latest_symbol: Symbol,
    pub latest_price: i64,
}

impl SimplePriceDb {
    pub const SIZE: usize = 32 + 8 + 8;

    /// Reads the first `SIZE` bytes of `data`; anything after them is ignored.
    pub fn unpack(data: &[u8]) -> Result<Self, PriceFeedError> {
        if data.len() < Self::SIZE {
            return Err(PriceFeedError::MalformedRecord {
                len: data.len(),
                expected: Self::SIZE,
            });
        }
        Self::deserialize(&mut &data[..Self::SIZE]).map_err(|_| PriceFeedError::InvalidState)
    }
}

/// Decoded view of a price record, as shown to clients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceRecord {
    pub owner: [u8; 32],
    pub latest_symbol: String,
    pub latest_price: i64,
}

impl PriceRecord {
    pub fn owner_pubkey(&self) -> Pubkey {
        Pubkey::new_from_array(self.owner)
    }
}

pub fn decode_record(buffer: &[u8]) -> Result<PriceRecord, PriceFeedError> {
    let db = SimplePriceDb::unpack(buffer)?;
    Ok(PriceRecord {
        owner: db.owner,
        latest_symbol: decode_symbol(&db.latest_symbol)?,
        latest_price: db.latest_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::encode_set_symbol;

    fn record_bytes(owner: [u8; 32], symbol: &[u8], price: [u8; 8]) -> Vec<u8> {
        let mut data = Vec::with_capacity(SimplePriceDb::SIZE);
        data.extend_from_slice(&owner);
        data.extend_from_slice(symbol);
        data.extend_from_slice(&price);
        data
    }

    #[test]
    fn fields_sit_at_fixed_offsets() {
        let data = record_bytes([7u8; 32], b"BTC\0\0\0\0\0", [232, 3, 0, 0, 0, 0, 0, 0]);
        let record = decode_record(&data).unwrap();

        assert_eq!(record.owner, [7u8; 32]);
        assert_eq!(record.latest_symbol, "BTC");
        assert_eq!(record.latest_price, 1000);
    }

    #[test]
    fn price_is_signed() {
        let data = record_bytes([1u8; 32], b"ETH\0\0\0\0\0", (-5i64).to_le_bytes());
        assert_eq!(decode_record(&data).unwrap().latest_price, -5);
    }

    #[test]
    fn short_buffer_is_malformed() {
        let data = vec![1u8; 47];
        assert_eq!(
            decode_record(&data),
            Err(PriceFeedError::MalformedRecord {
                len: 47,
                expected: 48
            })
        );
        assert!(matches!(
            decode_record(&[]),
            Err(PriceFeedError::MalformedRecord { len: 0, .. })
        ));
    }

    #[test]
    fn bytes_past_the_record_are_ignored() {
        let mut data = record_bytes([2u8; 32], b"BAND\0\0\0\0", 42i64.to_le_bytes());
        data.extend_from_slice(&[0xff; 16]);
        let record = decode_record(&data).unwrap();
        assert_eq!(record.latest_symbol, "BAND");
        assert_eq!(record.latest_price, 42);
    }

    #[test]
    fn borsh_layout_matches_offsets() {
        let db = SimplePriceDb {
            owner: [3u8; 32],
            latest_symbol: *b"SOL\0\0\0\0\0",
            latest_price: 1000,
        };
        let data = borsh::to_vec(&db).unwrap();
        assert_eq!(data.len(), SimplePriceDb::SIZE);
        assert_eq!(&data[32..40], b"SOL\0\0\0\0\0");
        assert_eq!(&data[40..48], &[232, 3, 0, 0, 0, 0, 0, 0]);
        assert_eq!(SimplePriceDb::unpack(&data).unwrap(), db);
    }

    #[test]
    fn instruction_symbol_decodes_back_to_the_input() {
        for symbol in ["B", "BTC", "BAND", "USDCUSDT"] {
            let payload = encode_set_symbol(symbol).unwrap();
            let data = record_bytes([0u8; 32], &payload[1..9], [0u8; 8]);
            assert_eq!(decode_record(&data).unwrap().latest_symbol, symbol);
        }
    }

    #[test]
    fn owner_renders_as_pubkey() {
        let owner = Pubkey::new_unique();
        let data = record_bytes(owner.to_bytes(), &[0u8; 8], [0u8; 8]);
        assert_eq!(decode_record(&data).unwrap().owner_pubkey(), owner);
    }
}
