//! Mock pool state.

use bytemuck::{Pod, Zeroable};
use num_enum::TryFromPrimitive;
use pinocchio::pubkey::Pubkey;

/// Pool state PDA seed.
/// Seeds: ["pool"]
pub const POOL_SEED: &[u8] = b"pool";

/// Which view convention the pool answers.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum PoolInterface {
    /// Answers `tokens` only
    Pair = 0,
    /// Answers `token_0` and `token_1` only
    Split = 1,
    /// Answers no view
    Neither = 2,
}

/// Pool state account data.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct MockPoolState {
    /// First asset mint
    pub token0: Pubkey,
    /// Second asset mint
    pub token1: Pubkey,
    /// Amount of asset 0 paid per redeem
    pub payout0: u64,
    /// Amount of asset 1 paid per redeem
    pub payout1: u64,
    /// [`PoolInterface`] discriminant
    pub interface: u8,
    /// Pool PDA bump
    pub bump: u8,
    /// Padding for 8-byte alignment
    pub _padding: [u8; 6],
}

impl MockPoolState {
    /// Size of the account data.
    pub const LEN: usize = core::mem::size_of::<Self>();

    /// Read the state from the start of account data.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        bytemuck::try_pod_read_unaligned(data.get(..Self::LEN)?).ok()
    }

    /// The answered convention, `None` for an unknown discriminant.
    pub fn interface(&self) -> Option<PoolInterface> {
        PoolInterface::try_from(self.interface).ok()
    }
}
