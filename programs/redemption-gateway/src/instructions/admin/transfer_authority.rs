//! `TransferAuthority` instruction handler.
//!
//! Initiates a two-step authority transfer by setting `pending_authority`.
//! The new authority must call `accept_authority` to complete the transfer.

use pinocchio::{ProgramResult, account_info::AccountInfo, program_error::ProgramError};
use pinocchio_log::log;

use super::{current_slot, emit_config_event, require_gateway_program, require_signer};
use crate::{
    GatewayConfig, events::AuthorityTransferInitiatedEvent, instructions::require_empty,
    loader::AccountLoader,
};

/// Process transfer authority instruction.
///
/// # Accounts
/// 0. `[writable]` Gateway config PDA
/// 1. `[signer]` Current authority
/// 2. `[]` New authority address
/// 3. `[]` This program (for self-CPI events)
pub fn process_transfer_authority(accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    require_empty(data)?;

    let [gateway_config, authority, new_authority, gateway_program] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    require_signer(authority, "transfer_authority")?;
    require_gateway_program(gateway_program)?;
    let gateway_config = AccountLoader::<GatewayConfig>::new(gateway_config)?;

    gateway_config.try_inspect_mut(|config| {
        config.begin_authority_transfer(authority.key(), new_authority.key())?;
        log!("transfer_authority: pending authority set");
        Ok(())
    })?;

    emit_config_event(
        &gateway_config,
        gateway_program,
        &AuthorityTransferInitiatedEvent {
            authority: *authority.key(),
            pending_authority: *new_authority.key(),
            slot: current_slot()?,
        },
    )
}
