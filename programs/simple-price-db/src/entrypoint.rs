use crate::processor;
use solana_program::{
    account_info::AccountInfo, entrypoint, entrypoint::ProgramResult, msg, pubkey::Pubkey,
};

entrypoint!(process_instruction);

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    msg!(
        "simple_price_db: {} account(s), data={:?}",
        accounts.len(),
        instruction_data
    );
    processor::process_instruction(program_id, accounts, instruction_data)
}
