//! Initialize the gateway configuration.

use pinocchio::{
    ProgramResult,
    account_info::AccountInfo,
    instruction::Signer,
    program_error::ProgramError,
    sysvars::{Sysvar, rent::Rent},
};
use pinocchio_log::log;
use pinocchio_system::instructions::CreateAccount;

use super::{current_slot, emit_config_event, require_gateway_program, require_signer};
use crate::{
    GatewayConfig, GatewayError, events::GatewayInitializedEvent, find_gateway_config_pda,
    gen_gateway_config_seeds,
    instructions::{FeeRateData, parse_data},
    loader::{AccountLoader, ProgramAccount},
};

/// Create the gateway config PDA.
///
/// # Accounts
/// 0. `[writable]` Gateway config PDA ["gateway_config"] to create
/// 1. `[writable, signer]` Authority (pays for the account)
/// 2. `[]` Fee recipient wallet
/// 3. `[]` System program
/// 4. `[]` This program (for self-CPI events)
///
/// # Data
/// [`FeeRateData`]
pub fn process_initialize(accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let data: FeeRateData = parse_data(data)?;

    let [gateway_config, authority, fee_recipient, system_program, gateway_program] = accounts
    else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    require_signer(authority, "initialize")?;
    require_gateway_program(gateway_program)?;

    if *system_program.key() != pinocchio_system::ID {
        log!("initialize: invalid system program");
        return Err(GatewayError::InvalidSystemProgram.into());
    }

    let (expected_pda, bump) = find_gateway_config_pda();
    if *gateway_config.key() != expected_pda {
        log!("initialize: invalid gateway config PDA");
        return Err(GatewayError::InvalidConfigPda.into());
    }

    if gateway_config.owner() == &crate::ID {
        log!("initialize: already initialized");
        return Err(GatewayError::AlreadyInitialized.into());
    }

    // Validate before paying for the account.
    let config = GatewayConfig::new(*authority.key(), *fee_recipient.key(), data.fee_rate_bps, bump)
        .inspect_err(|_| { log!("initialize: invalid fee configuration"); })?;

    let bump_bytes = [bump];
    let seeds = gen_gateway_config_seeds(&bump_bytes);

    CreateAccount {
        from: authority,
        to: gateway_config,
        lamports: Rent::get()?.minimum_balance(GatewayConfig::INIT_SPACE),
        space: GatewayConfig::INIT_SPACE as u64,
        owner: &crate::ID,
    }
    .invoke_signed(&[Signer::from(&seeds)])?;

    let gateway_config = AccountLoader::<GatewayConfig>::init(gateway_config, &config)?;

    emit_config_event(
        &gateway_config,
        gateway_program,
        &GatewayInitializedEvent {
            authority: *authority.key(),
            fee_recipient: *fee_recipient.key(),
            fee_rate_bps: data.fee_rate_bps,
            _padding: [0u8; 6],
            slot: current_slot()?,
        },
    )?;

    log!("initialize: gateway initialized, fee rate {}", data.fee_rate_bps);

    Ok(())
}
