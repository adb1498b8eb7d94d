//! Log instruction handler for emitting events.
//!
//! Invoked via CPI from within the program. The gateway config PDA must sign,
//! which only this program's `invoke_signed` can arrange, so outside callers
//! cannot forge events.

use pinocchio::{ProgramResult, account_info::AccountInfo, program_error::ProgramError};
use pinocchio_log::log;

use crate::{GatewayConfig, loader::AccountLoader};

/// Process a log instruction.
///
/// # Accounts
/// 0. `[signer]` Gateway config PDA
///
/// # Data
/// `[length (4 bytes LE), event bytes]`
pub fn process_log(accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let event_data = parse_log_data(data)?;

    let [authority, ..] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    if !authority.is_signer() {
        log!("log: authority must be a signer");
        return Err(ProgramError::MissingRequiredSignature);
    }

    // Owner, size and discriminator: only the config PDA passes.
    AccountLoader::<GatewayConfig>::new(authority)?;

    pinocchio::log::sol_log_data(&[event_data]);

    Ok(())
}

/// Split the length-prefixed event payload.
fn parse_log_data(data: &[u8]) -> Result<&[u8], ProgramError> {
    let (len, rest) = data
        .split_first_chunk::<4>()
        .ok_or(ProgramError::InvalidInstructionData)?;
    let len = u32::from_le_bytes(*len) as usize;
    rest.get(..len).ok_or(ProgramError::InvalidInstructionData)
}
