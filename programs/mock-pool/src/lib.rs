//! Mock Pool Program
//!
//! A two-asset pool that speaks the redemption pool interface, used to drive
//! the gateway through real transactions in integration tests.
//!
//! # Behavior
//!
//! - Views answer according to [`PoolInterface`]. An unsupported view
//!   succeeds with empty return data.
//! - `redeem` burns everything in the LP custody account and pays the fixed
//!   `payout0` / `payout1` from the two reserve accounts into the
//!   destinations.
//!
//! # Accounts
//!
//! The pool state account is the PDA `["pool"]` of this program and is also
//! the owner of the LP custody and both reserves. `redeem` expects the
//! reserves right after the fixed accounts:
//!
//! ```text
//! [pool, lp_custody, lp_mint, destination0, destination1, lp_token_program,
//!  reserve0, reserve1]
//! ```

#![cfg_attr(not(test), no_std)]

mod state;

pub use state::{MockPoolState, POOL_SEED, PoolInterface};

use pinocchio::{
    ProgramResult,
    account_info::AccountInfo,
    instruction::{Seed, Signer},
    program::set_return_data,
    program_error::ProgramError,
    pubkey::Pubkey,
};
use pinocchio_token::{
    instructions::{Burn, Transfer},
    state::TokenAccount,
};
use redemption_pool_interface::{
    PoolSelector, TokenPair, encode_token, encode_token_pair, parse_selector, redeem_accounts,
    view_accounts,
};

/// Index of the first reserve among the `redeem` accounts.
pub const RESERVE0: usize = redeem_accounts::FIXED_COUNT;
/// Index of the second reserve among the `redeem` accounts.
pub const RESERVE1: usize = redeem_accounts::FIXED_COUNT + 1;

#[cfg(not(feature = "no-entrypoint"))]
pinocchio::entrypoint!(process_instruction);

/// Program entrypoint.
///
/// # Errors
/// - `ProgramError::InvalidInstructionData` for an unknown selector
/// - `ProgramError::InvalidAccountData` if the pool account is not this
///   program's state
/// - `ProgramError::InsufficientFunds` if `redeem` finds no LP credit
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let selector = parse_selector(instruction_data).ok_or(ProgramError::InvalidInstructionData)?;

    match selector {
        PoolSelector::Tokens | PoolSelector::Token0 | PoolSelector::Token1 => {
            let pool = accounts
                .get(view_accounts::POOL)
                .ok_or(ProgramError::NotEnoughAccountKeys)?;
            let state = load_state(program_id, pool)?;
            answer_view(&state, selector);
            Ok(())
        }
        PoolSelector::Redeem => process_redeem(program_id, accounts),
    }
}

fn load_state(program_id: &Pubkey, pool: &AccountInfo) -> Result<MockPoolState, ProgramError> {
    if !pool.is_owned_by(program_id) {
        return Err(ProgramError::InvalidAccountData);
    }
    let data = pool.try_borrow_data()?;
    MockPoolState::from_bytes(&data).ok_or(ProgramError::InvalidAccountData)
}

fn answer_view(state: &MockPoolState, selector: PoolSelector) {
    let pair = TokenPair {
        token0: state.token0,
        token1: state.token1,
    };

    match (state.interface(), selector) {
        (Some(PoolInterface::Pair), PoolSelector::Tokens) => {
            set_return_data(&encode_token_pair(&pair));
        }
        (Some(PoolInterface::Split), PoolSelector::Token0) => {
            set_return_data(&encode_token(&pair.token0));
        }
        (Some(PoolInterface::Split), PoolSelector::Token1) => {
            set_return_data(&encode_token(&pair.token1));
        }
        // Unanswered: succeed with no return data.
        _ => {}
    }
}

fn process_redeem(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let [
        pool,
        lp_custody,
        lp_mint,
        destination0,
        destination1,
        _lp_token_program,
        reserve0,
        reserve1,
        ..,
    ] = accounts
    else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    let state = load_state(program_id, pool)?;

    let credit = TokenAccount::from_account_info(lp_custody)?.amount();
    if credit == 0 {
        return Err(ProgramError::InsufficientFunds);
    }

    let bump = [state.bump];
    let seeds = [Seed::from(POOL_SEED), Seed::from(&bump)];
    let signer = [Signer::from(&seeds)];

    Burn {
        account: lp_custody,
        mint: lp_mint,
        authority: pool,
        amount: credit,
    }
    .invoke_signed(&signer)?;

    for (reserve, destination, amount) in [
        (reserve0, destination0, state.payout0),
        (reserve1, destination1, state.payout1),
    ] {
        if amount == 0 {
            continue;
        }
        Transfer {
            from: reserve,
            to: destination,
            authority: pool,
            amount,
        }
        .invoke_signed(&signer)?;
    }

    Ok(())
}
