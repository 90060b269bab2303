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
        "std_reference_basic: {} account(s), {} byte(s) of instruction data",
        accounts.len(),
        instruction_data.len()
    );
    processor::process_instruction(program_id, accounts, instruction_data)
}
