//! Redeem instruction handler.

use bytemuck::{Pod, Zeroable};
use pinocchio::{ProgramResult, account_info::AccountInfo, program_error::ProgramError};
use pinocchio_log::log;

use super::{admin::require_gateway_program, admin::require_signer, parse_data};
use crate::{
    GatewayConfig, GatewayError,
    host::SolanaHost,
    loader::AccountLoader,
    redemption::{RedemptionRequest, redeem},
    token::is_token_program,
};

/// Instruction data for Redeem.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct RedeemData {
    /// LP credit to redeem (must be > 0)
    pub liquidity_amount: u64,
    /// Minimum gross amount of asset 0
    pub min_amount0: u64,
    /// Minimum gross amount of asset 1
    pub min_amount1: u64,
}

/// Accounts for the Redeem instruction.
///
/// Per-asset accounts come in pool order (asset 0, asset 1). Which mint is
/// asset 0 is decided by the pool's views, not by the caller.
///
/// 0. `[writable]` Gateway config PDA (custody authority, lock)
/// 1. `[signer]` Caller
/// 2. `[]` Pool program
/// 3. `[writable]` Pool state
/// 4. `[writable]` LP mint
/// 5. `[writable]` Caller LP token account
/// 6. `[writable]` Pool LP custody token account
/// 7. `[writable]` Custody token account, asset 0 (owner: gateway config)
/// 8. `[writable]` Custody token account, asset 1 (owner: gateway config)
/// 9. `[writable]` Caller token account, asset 0
/// 10. `[writable]` Caller token account, asset 1
/// 11. `[writable]` Fee recipient token account, asset 0
/// 12. `[writable]` Fee recipient token account, asset 1
/// 13. `[]` Mint, asset 0
/// 14. `[]` Mint, asset 1
/// 15. `[]` LP token program
/// 16. `[]` Token program, asset 0
/// 17. `[]` Token program, asset 1
/// 18. `[]` This program (for self-CPI events)
/// 19.. Pass-through accounts forwarded to the pool's `redeem`
pub struct RedeemAccounts<'info> {
    /// Gateway config PDA
    pub gateway_config: AccountLoader<'info, GatewayConfig>,
    /// Redeeming wallet
    pub caller: &'info AccountInfo,
    /// Pool program
    pub pool_program: &'info AccountInfo,
    /// Pool state
    pub pool: &'info AccountInfo,
    /// LP mint
    pub lp_mint: &'info AccountInfo,
    /// Caller LP token account
    pub caller_lp: &'info AccountInfo,
    /// Pool LP custody token account
    pub pool_lp_custody: &'info AccountInfo,
    /// Gateway custody token accounts
    pub custody: [&'info AccountInfo; 2],
    /// Caller token accounts
    pub caller_tokens: [&'info AccountInfo; 2],
    /// Fee recipient token accounts
    pub fee_tokens: [&'info AccountInfo; 2],
    /// Asset mints
    pub mints: [&'info AccountInfo; 2],
    /// LP token program
    pub lp_token_program: &'info AccountInfo,
    /// Asset token programs
    pub token_programs: [&'info AccountInfo; 2],
    /// This program
    pub gateway_program: &'info AccountInfo,
    /// Forwarded to the pool
    pub remaining: &'info [AccountInfo],
}

impl<'info> TryFrom<&'info [AccountInfo]> for RedeemAccounts<'info> {
    type Error = ProgramError;

    fn try_from(accounts: &'info [AccountInfo]) -> Result<Self, Self::Error> {
        let [
            gateway_config,
            caller,
            pool_program,
            pool,
            lp_mint,
            caller_lp,
            pool_lp_custody,
            custody0,
            custody1,
            caller_token0,
            caller_token1,
            fee_token0,
            fee_token1,
            mint0,
            mint1,
            lp_token_program,
            token_program0,
            token_program1,
            gateway_program,
            remaining @ ..,
        ] = accounts
        else {
            return Err(ProgramError::NotEnoughAccountKeys);
        };

        require_signer(caller, "redeem")?;
        require_gateway_program(gateway_program)?;

        if !pool_program.executable() {
            log!("redeem: pool program is not executable");
            return Err(GatewayError::InvalidPoolProgram.into());
        }

        for program in [lp_token_program, token_program0, token_program1] {
            if !is_token_program(program.key()) {
                log!("redeem: invalid token program");
                return Err(GatewayError::InvalidTokenProgram.into());
            }
        }

        Ok(Self {
            gateway_config: AccountLoader::new(gateway_config)?,
            caller,
            pool_program,
            pool,
            lp_mint,
            caller_lp,
            pool_lp_custody,
            custody: [custody0, custody1],
            caller_tokens: [caller_token0, caller_token1],
            fee_tokens: [fee_token0, fee_token1],
            mints: [mint0, mint1],
            lp_token_program,
            token_programs: [token_program0, token_program1],
            gateway_program,
            remaining,
        })
    }
}

/// Process a redemption.
///
/// # Data
/// [`RedeemData`]
pub fn process_redeem(accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let data: RedeemData = parse_data(data)?;
    let accounts = RedeemAccounts::try_from(accounts)?;

    let request = RedemptionRequest {
        caller: *accounts.caller.key(),
        pool: *accounts.pool.key(),
        liquidity_amount: data.liquidity_amount,
        min_amount0: data.min_amount0,
        min_amount1: data.min_amount1,
    };

    let mut host = SolanaHost::new(accounts)?;
    redeem(&mut host, &request)?;

    Ok(())
}
