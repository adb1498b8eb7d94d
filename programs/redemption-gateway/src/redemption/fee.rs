//! Protocol fee split.
//!
//! `fee = floor(gross * rate_bps / 10_000)`, `net = gross - fee`.
//!
//! Truncation rounds the fee down, so the caller keeps the fractional unit
//! and the fee recipient is never paid more than the configured rate.

use redemption_pool_interface::BASIS_POINTS;

use crate::errors::GatewayError;

/// Maximum fee rate in basis points (5%).
pub const MAX_FEE_RATE_BPS: u16 = 500;

/// A gross amount split into protocol fee and caller net.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeSplit {
    /// Portion for the fee recipient
    pub fee: u64,
    /// Portion for the caller
    pub net: u64,
}

/// Split `gross` at `rate_bps`.
///
/// Never panics: the product fits in u128 and rates above 100% are clamped
/// to [`BASIS_POINTS`], so `fee <= gross` for every input. Configured rates
/// are capped at [`MAX_FEE_RATE_BPS`] by [`validate_fee_rate`], so the clamp
/// only matters to direct callers.
#[inline]
pub fn split(gross: u64, rate_bps: u16) -> FeeSplit {
    let rate = (rate_bps as u64).min(BASIS_POINTS);
    let fee = ((gross as u128) * (rate as u128) / (BASIS_POINTS as u128)) as u64;
    FeeSplit {
        fee,
        net: gross - fee,
    }
}

/// Check a fee rate against the cap.
#[inline]
pub fn validate_fee_rate(rate_bps: u16) -> Result<(), GatewayError> {
    if rate_bps > MAX_FEE_RATE_BPS {
        return Err(GatewayError::FeeTooHigh);
    }
    Ok(())
}
