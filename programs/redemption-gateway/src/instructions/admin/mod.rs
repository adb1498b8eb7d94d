//! Admin instructions for gateway management.
//!
//! These instructions are authority-gated (except `Initialize`, whose signer
//! becomes the authority) and each emits a change event.
//!
//! Account lists share a prefix:
//! 0. `[writable]` Gateway config PDA
//! 1. `[signer]` Authority (or pending authority, or payer)
//!
//! and end with this program's account for the self-CPI event.

mod accept_authority;
mod initialize;
mod set_fee_rate;
mod set_fee_recipient;
mod transfer_authority;

pub use accept_authority::process_accept_authority;
pub use initialize::process_initialize;
pub use set_fee_rate::process_set_fee_rate;
pub use set_fee_recipient::process_set_fee_recipient;
pub use transfer_authority::process_transfer_authority;

use pinocchio::{
    ProgramResult,
    account_info::AccountInfo,
    instruction::Signer,
    program_error::ProgramError,
    sysvars::{Sysvar, clock::Clock},
};
use pinocchio_log::log;

use crate::{
    GatewayConfig,
    events::{GatewayEvent, emit_event, is_gateway_program},
    gen_gateway_config_seeds,
    loader::AccountLoader,
};

/// Check that `signer` signed the transaction.
pub(crate) fn require_signer(signer: &AccountInfo, context: &str) -> ProgramResult {
    if !signer.is_signer() {
        log!("{}: missing required signature", context);
        return Err(ProgramError::MissingRequiredSignature);
    }
    Ok(())
}

/// Check that `gateway_program` is this program.
pub(crate) fn require_gateway_program(gateway_program: &AccountInfo) -> ProgramResult {
    if !is_gateway_program(gateway_program.key()) {
        return Err(ProgramError::IncorrectProgramId);
    }
    Ok(())
}

/// Current slot, for event timestamps.
pub(crate) fn current_slot() -> Result<u64, ProgramError> {
    Ok(Clock::get()?.slot)
}

/// Emit `event` signed by the gateway config PDA.
pub(crate) fn emit_config_event<T: GatewayEvent>(
    gateway_config: &AccountLoader<'_, GatewayConfig>,
    gateway_program: &AccountInfo,
    event: &T,
) -> ProgramResult {
    let bump = gateway_config.map(|config| config.bump())?;
    let bump_bytes = [bump];
    let seeds = gen_gateway_config_seeds(&bump_bytes);

    emit_event(
        gateway_config.account_info(),
        gateway_program,
        Signer::from(&seeds),
        event,
    )
}
