use borsh::BorshSerialize;
use price_feed_common::{is_initialized, PriceFeedError, Symbol};
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::{
    instruction::ReferenceInstruction,
    state::{Price, StdReference},
};

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let instruction = ReferenceInstruction::unpack(instruction_data)?;

    match instruction {
        // 0: Init
        ReferenceInstruction::Init { capacity, owner } => {
            msg!("Instruction: Init");
            process_init(program_id, accounts, capacity, owner)
        }

        // 1: TransferOwnership
        ReferenceInstruction::TransferOwnership { new_owner } => {
            msg!("Instruction: TransferOwnership");
            process_transfer_ownership(program_id, accounts, new_owner)
        }

        // 2: Relay
        ReferenceInstruction::Relay { prices } => {
            msg!("Instruction: Relay");
            process_relay(program_id, accounts, &prices)
        }

        // 3: Remove
        ReferenceInstruction::Remove { symbols } => {
            msg!("Instruction: Remove");
            process_remove(program_id, accounts, &symbols)
        }
    }
}

pub fn process_init(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    capacity: u8,
    owner: [u8; 32],
) -> ProgramResult {
    let accounts_iter = &mut accounts.iter();
    let reference_account = next_account_info(accounts_iter)?;

    if reference_account.owner != program_id {
        msg!("Reference account {} is not owned by this program", reference_account.key);
        return Err(ProgramError::IncorrectProgramId);
    }
    if owner == [0u8; 32] {
        msg!("Owner must not be the zero address");
        return Err(ProgramError::InvalidArgument);
    }

    let mut data = reference_account.try_borrow_mut_data()?;
    if is_initialized(&data) {
        return Err(ProgramError::AccountAlreadyInitialized);
    }
    if data.len() < StdReference::space(capacity) {
        msg!(
            "Reference account holds {} bytes, {} needed for capacity {}",
            data.len(),
            StdReference::space(capacity),
            capacity
        );
        return Err(ProgramError::AccountDataTooSmall);
    }

    StdReference::new(owner, capacity).serialize(&mut &mut data[..])?;
    msg!("Reference {} initialized with capacity {}", reference_account.key, capacity);

    Ok(())
}

pub fn process_transfer_ownership(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    new_owner: [u8; 32],
) -> ProgramResult {
    let accounts_iter = &mut accounts.iter();
    let reference_account = next_account_info(accounts_iter)?;
    let sender = next_account_info(accounts_iter)?;

    if new_owner == [0u8; 32] {
        msg!("Owner must not be the zero address");
        return Err(ProgramError::InvalidArgument);
    }

    let mut reference = load_owned_reference(program_id, reference_account, sender)?;
    reference.owner = new_owner;
    reference.serialize(&mut &mut reference_account.data.borrow_mut()[..])?;
    msg!(
        "Reference {} ownership transferred to {}",
        reference_account.key,
        Pubkey::new_from_array(new_owner)
    );

    Ok(())
}

pub fn process_relay(program_id: &Pubkey, accounts: &[AccountInfo], prices: &[Price]) -> ProgramResult {
    let accounts_iter = &mut accounts.iter();
    let reference_account = next_account_info(accounts_iter)?;
    let sender = next_account_info(accounts_iter)?;

    let mut reference = load_owned_reference(program_id, reference_account, sender)?;
    reference.relay(prices)?;
    reference.serialize(&mut &mut reference_account.data.borrow_mut()[..])?;
    msg!(
        "Relayed {} price(s), {}/{} slot(s) in use",
        prices.len(),
        reference.current_size,
        reference.capacity()
    );

    Ok(())
}

pub fn process_remove(program_id: &Pubkey, accounts: &[AccountInfo], symbols: &[Symbol]) -> ProgramResult {
    let accounts_iter = &mut accounts.iter();
    let reference_account = next_account_info(accounts_iter)?;
    let sender = next_account_info(accounts_iter)?;

    let mut reference = load_owned_reference(program_id, reference_account, sender)?;
    reference.remove(symbols);
    reference.serialize(&mut &mut reference_account.data.borrow_mut()[..])?;
    msg!(
        "Removed symbols, {}/{} slot(s) in use",
        reference.current_size,
        reference.capacity()
    );

    Ok(())
}

/// Checks signer, initialization and ownership before any mutation.
fn load_owned_reference(
    program_id: &Pubkey,
    reference_account: &AccountInfo,
    sender: &AccountInfo,
) -> Result<StdReference, ProgramError> {
    if !sender.is_signer {
        msg!("Owner {} should be the signer", sender.key);
        return Err(ProgramError::MissingRequiredSignature);
    }
    if reference_account.owner != program_id {
        msg!("Reference account {} is not owned by this program", reference_account.key);
        return Err(ProgramError::IncorrectProgramId);
    }

    let data = reference_account.try_borrow_data()?;
    if !is_initialized(&data) {
        return Err(ProgramError::UninitializedAccount);
    }
    let reference = StdReference::unpack(&data)?;

    if reference.owner != sender.key.to_bytes() {
        msg!("Signer {} does not own this reference", sender.key);
        return Err(PriceFeedError::Unauthorized.into());
    }

    Ok(reference)
}
