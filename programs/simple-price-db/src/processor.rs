use borsh::BorshSerialize;
use price_feed_common::{decode_symbol, is_empty_symbol, is_initialized, PriceFeedError, Symbol};
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
};
use std_reference_basic::state::StdReference;

use crate::{instruction::PriceDbInstruction, state::SimplePriceDb};

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let instruction = PriceDbInstruction::unpack(instruction_data)?;

    match instruction {
        // 0: Init
        PriceDbInstruction::Init { owner } => {
            msg!("Instruction: Init");
            process_init(program_id, accounts, owner)
        }

        // 1: TransferOwnership
        PriceDbInstruction::TransferOwnership { new_owner } => {
            msg!("Instruction: TransferOwnership");
            process_transfer_ownership(program_id, accounts, new_owner)
        }

        // 2: SetPrice
        PriceDbInstruction::SetPrice { symbol } => {
            msg!("Instruction: SetPrice");
            process_set_price(program_id, accounts, symbol)
        }
    }
}

pub fn process_init(program_id: &Pubkey, accounts: &[AccountInfo], owner: [u8; 32]) -> ProgramResult {
    let accounts_iter = &mut accounts.iter();
    let price_db_account = next_account_info(accounts_iter)?;

    if price_db_account.owner != program_id {
        msg!("Price db account {} is not owned by this program", price_db_account.key);
        return Err(ProgramError::IncorrectProgramId);
    }
    if owner == [0u8; 32] {
        msg!("Owner must not be the zero address");
        return Err(ProgramError::InvalidArgument);
    }

    let mut data = price_db_account.try_borrow_mut_data()?;
    if is_initialized(&data) {
        return Err(ProgramError::AccountAlreadyInitialized);
    }
    if data.len() < SimplePriceDb::SIZE {
        return Err(ProgramError::AccountDataTooSmall);
    }

    let db = SimplePriceDb {
        owner,
        ..SimplePriceDb::default()
    };
    db.serialize(&mut &mut data[..])?;
    msg!("Price db {} initialized", price_db_account.key);

    Ok(())
}

pub fn process_transfer_ownership(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    new_owner: [u8; 32],
) -> ProgramResult {
    let accounts_iter = &mut accounts.iter();
    let price_db_account = next_account_info(accounts_iter)?;
    let sender = next_account_info(accounts_iter)?;

    if new_owner == [0u8; 32] {
        msg!("Owner must not be the zero address");
        return Err(ProgramError::InvalidArgument);
    }

    let mut db = load_owned_db(program_id, price_db_account, sender)?;
    db.owner = new_owner;
    db.serialize(&mut &mut price_db_account.data.borrow_mut()[..])?;
    msg!(
        "Price db {} ownership transferred to {}",
        price_db_account.key,
        Pubkey::new_from_array(new_owner)
    );

    Ok(())
}

pub fn process_set_price(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    symbol: Symbol,
) -> ProgramResult {
    let accounts_iter = &mut accounts.iter();
    let price_db_account = next_account_info(accounts_iter)?;
    let sender = next_account_info(accounts_iter)?;
    let reference_account = next_account_info(accounts_iter)?;

    let mut db = load_owned_db(program_id, price_db_account, sender)?;

    if is_empty_symbol(&symbol) {
        msg!("Symbol must not be empty");
        return Err(PriceFeedError::EmptySymbol.into());
    }
    if *reference_account.owner != std_reference_basic::id() {
        msg!(
            "Reference account {} is owned by {}, not the std reference program",
            reference_account.key,
            reference_account.owner
        );
        return Err(ProgramError::IncorrectProgramId);
    }
    let reference = StdReference::unpack(&reference_account.try_borrow_data()?)?;

    let price = reference.find(&symbol).ok_or_else(|| {
        msg!("Price not found !");
        PriceFeedError::PriceNotFound
    })?;
    let rate = i64::try_from(price.rate).map_err(|_| PriceFeedError::PriceOverflow(price.rate))?;

    db.latest_symbol = symbol;
    db.latest_price = rate;
    db.serialize(&mut &mut price_db_account.data.borrow_mut()[..])?;
    msg!(
        "Price db {} latest {} = {}",
        price_db_account.key,
        decode_symbol(&symbol).unwrap_or_default(),
        rate
    );

    Ok(())
}

/// Checks signer, initialization and ownership before any mutation.
fn load_owned_db(
    program_id: &Pubkey,
    price_db_account: &AccountInfo,
    sender: &AccountInfo,
) -> Result<SimplePriceDb, ProgramError> {
    if !sender.is_signer {
        msg!("Owner {} should be the signer", sender.key);
        return Err(ProgramError::MissingRequiredSignature);
    }
    if price_db_account.owner != program_id {
        msg!("Price db account {} is not owned by this program", price_db_account.key);
        return Err(ProgramError::IncorrectProgramId);
    }

    let data = price_db_account.try_borrow_data()?;
    if !is_initialized(&data) {
        return Err(ProgramError::UninitializedAccount);
    }
    let db = SimplePriceDb::unpack(&data).map_err(|_| PriceFeedError::InvalidState)?;

    if db.owner != sender.key.to_bytes() {
        msg!("Signer {} does not own this price db", sender.key);
        return Err(PriceFeedError::Unauthorized.into());
    }

    Ok(db)
}
