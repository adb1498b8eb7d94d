//! Set the protocol fee rate.

use pinocchio::{ProgramResult, account_info::AccountInfo, program_error::ProgramError};
use pinocchio_log::log;

use super::{current_slot, emit_config_event, require_gateway_program, require_signer};
use crate::{
    GatewayConfig,
    events::FeeRateChangedEvent,
    instructions::{FeeRateData, parse_data},
    loader::AccountLoader,
};

/// Update the fee rate.
///
/// Fails `Unauthorized` before the rate is looked at, then `FeeTooHigh` above
/// 500 basis points. The config is untouched on either failure.
///
/// # Accounts
/// 0. `[writable]` Gateway config PDA
/// 1. `[signer]` Authority
/// 2. `[]` This program (for self-CPI events)
///
/// # Data
/// [`FeeRateData`]
pub fn process_set_fee_rate(accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let data: FeeRateData = parse_data(data)?;

    let [gateway_config, authority, gateway_program] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    require_signer(authority, "set_fee_rate")?;
    require_gateway_program(gateway_program)?;
    let gateway_config = AccountLoader::<GatewayConfig>::new(gateway_config)?;

    let old_fee_rate_bps = gateway_config.try_map_mut(|config| {
        config
            .set_fee_rate(authority.key(), data.fee_rate_bps)
            .map_err(|error| {
                log!("set_fee_rate: rejected");
                error.into()
            })
    })?;

    emit_config_event(
        &gateway_config,
        gateway_program,
        &FeeRateChangedEvent {
            authority: *authority.key(),
            old_fee_rate_bps,
            new_fee_rate_bps: data.fee_rate_bps,
            _padding: [0u8; 4],
            slot: current_slot()?,
        },
    )?;

    log!(
        "set_fee_rate: {} -> {}",
        old_fee_rate_bps,
        data.fee_rate_bps
    );
    Ok(())
}
