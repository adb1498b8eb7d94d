//! Single-flag reentrancy lock.
//!
//! States are `idle` and `busy`. [`redeem`](super::redeem) moves `idle → busy`
//! on entry and `busy → idle` on every exit; an entry observed while busy
//! fails with [`GatewayError::Reentrant`] and touches nothing.

use pinocchio::{ProgramResult, program_error::ProgramError};

use crate::errors::GatewayError;

/// Storage for the lock flag.
pub trait ReentrancyLock {
    /// Whether a redemption is in progress.
    fn is_busy(&self) -> Result<bool, ProgramError>;

    /// Set or clear the flag.
    fn set_busy(&mut self, busy: bool) -> ProgramResult;
}

/// Move `idle → busy`, or fail with `Reentrant` if already busy.
pub(crate) fn acquire<L: ReentrancyLock + ?Sized>(lock: &mut L) -> ProgramResult {
    if lock.is_busy()? {
        return Err(GatewayError::Reentrant.into());
    }
    lock.set_busy(true)
}

/// Move `busy → idle`.
pub(crate) fn release<L: ReentrancyLock + ?Sized>(lock: &mut L) -> ProgramResult {
    lock.set_busy(false)
}
