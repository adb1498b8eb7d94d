//! `AcceptAuthority` instruction handler.
//!
//! Completes the two-step authority transfer by accepting the pending authority role.
//! Must be called by the `pending_authority` address.

use pinocchio::{ProgramResult, account_info::AccountInfo, program_error::ProgramError};
use pinocchio_log::log;

use super::{current_slot, emit_config_event, require_gateway_program, require_signer};
use crate::{
    GatewayConfig, events::AuthorityTransferCompletedEvent, instructions::require_empty,
    loader::AccountLoader,
};

/// Process accept authority instruction.
///
/// # Accounts
/// 0. `[writable]` Gateway config PDA
/// 1. `[signer]` Pending authority
/// 2. `[]` This program (for self-CPI events)
pub fn process_accept_authority(accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    require_empty(data)?;

    let [gateway_config, signer, gateway_program] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    require_signer(signer, "accept_authority")?;
    require_gateway_program(gateway_program)?;
    let gateway_config = AccountLoader::<GatewayConfig>::new(gateway_config)?;

    let previous_authority = gateway_config.try_map_mut(|config| {
        let previous = config.accept_authority(signer.key())?;
        log!("accept_authority: authority transferred");
        Ok(previous)
    })?;

    emit_config_event(
        &gateway_config,
        gateway_program,
        &AuthorityTransferCompletedEvent {
            previous_authority,
            new_authority: *signer.key(),
            slot: current_slot()?,
        },
    )
}
