//! Distribution guard.
//!
//! Wraps a custody transfer in a before/after balance check on the recipient
//! so that transfer-fee or rebasing assets cannot silently under-deliver. A
//! short delivery becomes [`GatewayError::NonConformingAsset`], which aborts
//! the whole redemption.

use pinocchio::{ProgramResult, pubkey::Pubkey};
use pinocchio_log::log;

use super::{AssetLedger, AssetSide};
use crate::errors::GatewayError;

/// Transfer `amount` of the asset on `side` to `recipient` and require the
/// recipient's balance to grow by at least `amount`.
///
/// A zero amount is a no-op: no transfer is issued and no balance is read.
///
/// # Errors
/// - [`GatewayError::NonConformingAsset`] if the recipient received less
/// - Any error from the ledger's balance reads or transfer
pub fn guarded_transfer<L: AssetLedger + ?Sized>(
    ledger: &mut L,
    side: AssetSide,
    recipient: &Pubkey,
    amount: u64,
) -> ProgramResult {
    if amount == 0 {
        return Ok(());
    }

    let before = ledger.balance_of(side, recipient)?;
    let expected = before
        .checked_add(amount)
        .ok_or(GatewayError::ArithmeticOverflow)?;

    ledger.transfer(side, recipient, amount)?;

    let after = ledger.balance_of(side, recipient)?;
    if after < expected {
        log!(
            "guarded_transfer: recipient short by {} on asset {}",
            expected - after,
            side as u8
        );
        return Err(GatewayError::NonConformingAsset.into());
    }

    Ok(())
}
