// instruction.rs
use borsh::{BorshDeserialize, BorshSerialize};
use price_feed_common::Symbol;
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::state::Price;

/// Borsh-encoded: a single tag byte (variant index) followed by the fields.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub enum ReferenceInstruction {
    /// 0. `[writable]` reference account, zeroed and owned by this program
    Init { capacity: u8, owner: [u8; 32] },
    /// 0. `[writable]` reference account
    /// 1. `[signer]` current owner
    TransferOwnership { new_owner: [u8; 32] },
    /// 0. `[writable]` reference account
    /// 1. `[signer]` owner
    Relay { prices: Vec<Price> },
    /// 0. `[writable]` reference account
    /// 1. `[signer]` owner
    Remove { symbols: Vec<Symbol> },
}

impl ReferenceInstruction {
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        Self::try_from_slice(input).map_err(|_| ProgramError::InvalidInstructionData)
    }
}

pub fn init(program_id: &Pubkey, reference: &Pubkey, capacity: u8, owner: &Pubkey) -> Instruction {
    Instruction::new_with_borsh(
        *program_id,
        &ReferenceInstruction::Init {
            capacity,
            owner: owner.to_bytes(),
        },
        vec![AccountMeta::new(*reference, false)],
    )
}

pub fn transfer_ownership(
    program_id: &Pubkey,
    reference: &Pubkey,
    owner: &Pubkey,
    new_owner: &Pubkey,
) -> Instruction {
    Instruction::new_with_borsh(
        *program_id,
        &ReferenceInstruction::TransferOwnership {
            new_owner: new_owner.to_bytes(),
        },
        owner_accounts(reference, owner),
    )
}

pub fn relay(
    program_id: &Pubkey,
    reference: &Pubkey,
    owner: &Pubkey,
    prices: Vec<Price>,
) -> Instruction {
    Instruction::new_with_borsh(
        *program_id,
        &ReferenceInstruction::Relay { prices },
        owner_accounts(reference, owner),
    )
}

pub fn remove(
    program_id: &Pubkey,
    reference: &Pubkey,
    owner: &Pubkey,
    symbols: Vec<Symbol>,
) -> Instruction {
    Instruction::new_with_borsh(
        *program_id,
        &ReferenceInstruction::Remove { symbols },
        owner_accounts(reference, owner),
    )
}

fn owner_accounts(reference: &Pubkey, owner: &Pubkey) -> Vec<AccountMeta> {
    vec![
        AccountMeta::new(*reference, false),
        AccountMeta::new_readonly(*owner, true),
    ]
}
