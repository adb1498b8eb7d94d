//! Set the protocol fee recipient.

use pinocchio::{ProgramResult, account_info::AccountInfo, program_error::ProgramError};
use pinocchio_log::log;

use super::{current_slot, emit_config_event, require_gateway_program, require_signer};
use crate::{
    GatewayConfig,
    events::FeeRecipientChangedEvent,
    instructions::require_empty,
    loader::AccountLoader,
};

/// Update the fee recipient wallet.
///
/// The null address is rejected with `NullRecipient`. Fee token accounts for
/// later redemptions must be owned by the new recipient.
///
/// # Accounts
/// 0. `[writable]` Gateway config PDA
/// 1. `[signer]` Authority
/// 2. `[]` New fee recipient wallet
/// 3. `[]` This program (for self-CPI events)
pub fn process_set_fee_recipient(accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    require_empty(data)?;

    let [gateway_config, authority, new_fee_recipient, gateway_program] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    require_signer(authority, "set_fee_recipient")?;
    require_gateway_program(gateway_program)?;
    let gateway_config = AccountLoader::<GatewayConfig>::new(gateway_config)?;

    let old_fee_recipient = gateway_config.try_map_mut(|config| {
        config
            .set_fee_recipient(authority.key(), new_fee_recipient.key())
            .map_err(|error| {
                log!("set_fee_recipient: rejected");
                error.into()
            })
    })?;

    emit_config_event(
        &gateway_config,
        gateway_program,
        &FeeRecipientChangedEvent {
            authority: *authority.key(),
            old_fee_recipient,
            new_fee_recipient: *new_fee_recipient.key(),
            slot: current_slot()?,
        },
    )?;

    log!("set_fee_recipient: success");
    Ok(())
}
