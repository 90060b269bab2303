// state.rs
use borsh::{BorshDeserialize, BorshSerialize};
use price_feed_common::{is_empty_symbol, PriceFeedError, Symbol};

/// One relayed quote. An all-zero symbol marks an unused slot.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Price {
    pub symbol: Symbol,
    pub rate: u64,
    pub last_updated: u64,
    pub request_id: u64,
}

impl Price {
    pub const SIZE: usize = 8 + 8 + 8 + 8;

    pub fn new(symbol: Symbol, rate: u64, last_updated: u64, request_id: u64) -> Self {
        Self {
            symbol,
            rate,
            last_updated,
            request_id,
        }
    }
}

/// Fixed-capacity price table. `prices[..current_size]` holds the live
/// entries in insertion order; the tail is zero-filled.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct StdReference {
    pub owner: [u8; 32],
    pub current_size: u8,
    pub prices: Vec<Price>,
}

impl StdReference {
    // owner + current_size + borsh vec length prefix
    pub const HEADER_SIZE: usize = 32 + 1 + 4;

    /// Bytes needed to store a table holding `capacity` prices.
    pub fn space(capacity: u8) -> usize {
        Self::HEADER_SIZE + capacity as usize * Price::SIZE
    }

    pub fn new(owner: [u8; 32], capacity: u8) -> Self {
        Self {
            owner,
            current_size: 0,
            prices: vec![Price::default(); capacity as usize],
        }
    }

    /// Decodes the table from the front of `data`; trailing bytes are ignored.
    pub fn unpack(data: &[u8]) -> Result<Self, PriceFeedError> {
        let reference =
            Self::deserialize(&mut &data[..]).map_err(|_| PriceFeedError::InvalidState)?;
        if reference.prices.len() > u8::MAX as usize
            || reference.current_size as usize > reference.prices.len()
        {
            return Err(PriceFeedError::InvalidState);
        }
        Ok(reference)
    }

    pub fn capacity(&self) -> usize {
        self.prices.len()
    }

    pub fn active(&self) -> &[Price] {
        &self.prices[..self.current_size as usize]
    }

    pub fn find(&self, symbol: &Symbol) -> Option<&Price> {
        self.active().iter().find(|p| p.symbol == *symbol)
    }

    /// Upserts every update in order. Either all updates apply or none do.
    pub fn relay(&mut self, updates: &[Price]) -> Result<(), PriceFeedError> {
        let mut next = self.clone();
        for update in updates {
            if is_empty_symbol(&update.symbol) {
                return Err(PriceFeedError::EmptySymbol);
            }
            let size = next.current_size as usize;
            match next.prices[..size]
                .iter_mut()
                .find(|p| p.symbol == update.symbol)
            {
                Some(existing) => *existing = *update,
                None => {
                    if size >= next.prices.len() {
                        return Err(PriceFeedError::CapacityExceeded);
                    }
                    next.prices[size] = *update;
                    next.current_size += 1;
                }
            }
        }
        *self = next;
        Ok(())
    }

    /// Drops the listed symbols and compacts the survivors to the front.
    pub fn remove(&mut self, symbols: &[Symbol]) {
        let capacity = self.prices.len();
        let mut remaining: Vec<Price> = self
            .active()
            .iter()
            .filter(|p| !symbols.contains(&p.symbol))
            .copied()
            .collect();
        self.current_size = remaining.len() as u8;
        remaining.resize(capacity, Price::default());
        self.prices = remaining;
    }
}
