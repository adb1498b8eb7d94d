//! Host-independent redemption protocol.
//!
//! Everything in this module talks to the outside world through the traits
//! below, so the same protocol runs against CPIs on-chain
//! ([`crate::host::SolanaHost`]) and against an in-memory ledger in tests.
//!
//! ```text
//! redeem ──► lock ──► resolve_tokens ──► bind_assets ──► deposit_liquidity
//!                                                      ──► redeem_liquidity
//!        ◄── unlock ◄── record ◄── guarded_transfer × 4 ◄── fee::split × 2
//! ```
//!
//! Each external call (views, deposit, pool redeem, transfers) is untrusted
//! and happens with the lock held.

mod fee;
mod guard;
mod lock;
mod orchestrator;
mod resolver;

pub use fee::{FeeSplit, MAX_FEE_RATE_BPS, split, validate_fee_rate};
pub use guard::guarded_transfer;
pub use lock::ReentrancyLock;
pub use orchestrator::redeem;
pub use resolver::resolve_tokens;

use alloc::vec::Vec;
use pinocchio::{ProgramResult, program_error::ProgramError, pubkey::Pubkey};
use redemption_pool_interface::{PoolView, TokenPair};

// ============================================================================
// Types
// ============================================================================

/// Which of the pool's two assets an operation concerns.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetSide {
    /// First asset in pool order
    Asset0 = 0,
    /// Second asset in pool order
    Asset1 = 1,
}

impl AssetSide {
    /// Both sides, in pool order.
    pub const ALL: [AssetSide; 2] = [AssetSide::Asset0, AssetSide::Asset1];

    /// Array index of this side.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One redemption call. Lives only for the duration of [`redeem`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedemptionRequest {
    /// Wallet that owns the LP credit and receives the net amounts
    pub caller: Pubkey,
    /// Pool state account
    pub pool: Pubkey,
    /// LP credit to redeem (must be > 0)
    pub liquidity_amount: u64,
    /// Slippage floor for asset 0
    pub min_amount0: u64,
    /// Slippage floor for asset 1
    pub min_amount1: u64,
}

impl RedemptionRequest {
    /// Slippage floor for `side`.
    pub const fn min_amount(&self, side: AssetSide) -> u64 {
        match side {
            AssetSide::Asset0 => self.min_amount0,
            AssetSide::Asset1 => self.min_amount1,
        }
    }
}

/// Per-asset result of a redemption.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AssetOutcome {
    /// Asset mint
    pub mint: Pubkey,
    /// Amount released by the pool into gateway custody
    pub gross: u64,
    /// Protocol fee delivered to the fee recipient
    pub fee: u64,
    /// Amount delivered to the caller
    pub net: u64,
}

/// Auditable record of a completed redemption.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedemptionOutcome {
    /// Redeeming wallet
    pub caller: Pubkey,
    /// Pool state account
    pub pool: Pubkey,
    /// LP credit redeemed
    pub liquidity_amount: u64,
    /// Results in pool order
    pub assets: [AssetOutcome; 2],
}

impl RedemptionOutcome {
    /// Result for `side`.
    pub const fn asset(&self, side: AssetSide) -> &AssetOutcome {
        &self.assets[side.index()]
    }
}

/// Fee configuration in force for one redemption.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeePolicy {
    /// Fee rate in basis points (<= [`MAX_FEE_RATE_BPS`])
    pub fee_rate_bps: u16,
    /// Wallet receiving the fee portion
    pub fee_recipient: Pubkey,
}

/// Token accounts one asset moves through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PayoutRoute {
    /// Gateway-owned account the pool pays into
    pub custody: Pubkey,
    /// Caller's account for the net amount
    pub caller: Pubkey,
    /// Fee recipient's account for the fee amount
    pub fee_recipient: Pubkey,
}

// ============================================================================
// Host Traits
// ============================================================================

/// Uniform access to an external value-bearing asset.
///
/// `transfer` moves value out of gateway custody and may deliver less than
/// requested (transfer fees, rebasing). Callers that need exact delivery go
/// through [`guarded_transfer`].
pub trait AssetLedger {
    /// Balance of `holder` in the asset on `side`.
    fn balance_of(&self, side: AssetSide, holder: &Pubkey) -> Result<u64, ProgramError>;

    /// Transfer `amount` of the asset on `side` from custody to `to`.
    fn transfer(&mut self, side: AssetSide, to: &Pubkey, amount: u64) -> ProgramResult;
}

/// Read-only introspection of an external pool whose shape is unknown until
/// queried.
pub trait PoolIntrospection {
    /// Issue a read-only call. `None` when the pool does not answer.
    fn view(&mut self, view: PoolView) -> Option<Vec<u8>>;
}

/// Everything [`redeem`] needs from its environment.
pub trait RedemptionHost: ReentrancyLock + PoolIntrospection + AssetLedger {
    /// Snapshot of the fee configuration for this call.
    fn fee_policy(&self) -> Result<FeePolicy, ProgramError>;

    /// Match the resolved mints to the token accounts supplied for this call.
    fn bind_assets(
        &mut self,
        pair: &TokenPair,
        policy: &FeePolicy,
    ) -> Result<[PayoutRoute; 2], ProgramError>;

    /// Move `amount` of the caller's LP credit into the pool's LP custody.
    fn deposit_liquidity(&mut self, amount: u64) -> ProgramResult;

    /// Have the pool redeem all credit in its custody into gateway custody.
    fn redeem_liquidity(&mut self) -> ProgramResult;

    /// Publish the outcome record.
    fn record(&mut self, outcome: &RedemptionOutcome) -> ProgramResult;
}
