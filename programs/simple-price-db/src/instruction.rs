// instruction.rs
use borsh::{BorshDeserialize, BorshSerialize};
use price_feed_common::{encode_symbol, is_empty_symbol, PriceFeedError, Symbol, SYMBOL_LEN};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
};

pub const SET_PRICE_TAG: u8 = 2;
pub const SET_PRICE_LEN: usize = 1 + SYMBOL_LEN;

/// Borsh-encoded: a single tag byte (variant index) followed by the fields.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub enum PriceDbInstruction {
    /// 0. `[writable]` price db account, zeroed and owned by this program
    Init { owner: [u8; 32] },
    /// 0. `[writable]` price db account
    /// 1. `[signer]` current owner
    TransferOwnership { new_owner: [u8; 32] },
    /// 0. `[writable]` price db account
    /// 1. `[signer]` owner
    /// 2. `[]` std reference account to copy the rate from
    SetPrice { symbol: Symbol },
}

impl PriceDbInstruction {
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        Self::try_from_slice(input).map_err(|_| ProgramError::InvalidInstructionData)
    }
}

/// `[0x02] ++ utf8(symbol) ++ zero padding`, always `SET_PRICE_LEN` bytes.
pub fn encode_set_symbol(symbol: &str) -> Result<Vec<u8>, PriceFeedError> {
    Ok(set_symbol_data(&encode_symbol(symbol)?))
}

fn set_symbol_data(symbol: &Symbol) -> Vec<u8> {
    let mut data = Vec::with_capacity(SET_PRICE_LEN);
    data.push(SET_PRICE_TAG);
    data.extend_from_slice(symbol);
    data
}

pub fn init(program_id: &Pubkey, price_db: &Pubkey, owner: &Pubkey) -> Instruction {
    Instruction::new_with_borsh(
        *program_id,
        &PriceDbInstruction::Init {
            owner: owner.to_bytes(),
        },
        vec![AccountMeta::new(*price_db, false)],
    )
}

pub fn transfer_ownership(
    program_id: &Pubkey,
    price_db: &Pubkey,
    owner: &Pubkey,
    new_owner: &Pubkey,
) -> Instruction {
    Instruction::new_with_borsh(
        *program_id,
        &PriceDbInstruction::TransferOwnership {
            new_owner: new_owner.to_bytes(),
        },
        vec![
            AccountMeta::new(*price_db, false),
            AccountMeta::new_readonly(*owner, true),
        ],
    )
}

pub fn set_price(
    program_id: &Pubkey,
    price_db: &Pubkey,
    owner: &Pubkey,
    std_reference: &Pubkey,
    symbol: &str,
) -> Result<Instruction, PriceFeedError> {
    let symbol = encode_symbol(symbol)?;
    if is_empty_symbol(&symbol) {
        return Err(PriceFeedError::EmptySymbol);
    }
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*price_db, false),
            AccountMeta::new_readonly(*owner, true),
            AccountMeta::new_readonly(*std_reference, false),
        ],
        data: set_symbol_data(&symbol),
    })
}
