//! Redemption orchestrator.

use pinocchio::program_error::ProgramError;
use pinocchio_log::log;

use super::{
    AssetOutcome, AssetSide, RedemptionHost, RedemptionOutcome, RedemptionRequest, fee, guard,
    lock, resolver,
};
use crate::errors::GatewayError;

/// Redeem `request.liquidity_amount` of LP credit for the pool's two
/// underlying assets, less the protocol fee.
///
/// Runs under the reentrancy lock. The lock is released on every exit path,
/// success or failure; the first error wins. A failed call leaves no partial
/// effects behind only when the host rolls back its external state, which the
/// Solana runtime does for a failed transaction.
///
/// # Errors
/// - [`GatewayError::Reentrant`] if a redemption is already in progress
/// - [`GatewayError::InvalidAmount`] if `liquidity_amount` is zero
/// - [`GatewayError::UnsupportedPoolInterface`] /
///   [`GatewayError::MalformedPoolResponse`] from pool resolution
/// - [`GatewayError::SlippageExceededAsset0`] /
///   [`GatewayError::SlippageExceededAsset1`] if a gross amount is below its
///   floor
/// - [`GatewayError::NonConformingAsset`] if any payout under-delivers
pub fn redeem<H: RedemptionHost + ?Sized>(
    host: &mut H,
    request: &RedemptionRequest,
) -> Result<RedemptionOutcome, ProgramError> {
    lock::acquire(host)?;

    let result = redeem_locked(host, request);
    let released = lock::release(host);

    let outcome = result?;
    released?;
    Ok(outcome)
}

fn redeem_locked<H: RedemptionHost + ?Sized>(
    host: &mut H,
    request: &RedemptionRequest,
) -> Result<RedemptionOutcome, ProgramError> {
    if request.liquidity_amount == 0 {
        return Err(GatewayError::InvalidAmount.into());
    }

    let policy = host.fee_policy()?;
    let pair = resolver::resolve_tokens(host)?;
    let routes = host.bind_assets(&pair, &policy)?;

    let mut before = [0u64; 2];
    for side in AssetSide::ALL {
        before[side.index()] = host.balance_of(side, &routes[side.index()].custody)?;
    }

    host.deposit_liquidity(request.liquidity_amount)?;
    host.redeem_liquidity()?;

    let mints = [pair.token0, pair.token1];
    let mut assets = [AssetOutcome::default(); 2];
    for side in AssetSide::ALL {
        let after = host.balance_of(side, &routes[side.index()].custody)?;
        let gross = after
            .checked_sub(before[side.index()])
            .ok_or(GatewayError::ArithmeticOverflow)?;
        assets[side.index()] = AssetOutcome {
            mint: mints[side.index()],
            gross,
            ..AssetOutcome::default()
        };
    }

    // Both floors are checked before anything is paid out.
    for side in AssetSide::ALL {
        let gross = assets[side.index()].gross;
        let floor = request.min_amount(side);
        if gross < floor {
            log!(
                "redeem: asset {} gross {} below floor {}",
                side as u8,
                gross,
                floor
            );
            return Err(GatewayError::slippage(side).into());
        }
    }

    for side in AssetSide::ALL {
        let route = routes[side.index()];
        let asset = &mut assets[side.index()];
        let fee::FeeSplit { fee, net } = fee::split(asset.gross, policy.fee_rate_bps);

        guard::guarded_transfer(host, side, &route.fee_recipient, fee)?;
        guard::guarded_transfer(host, side, &route.caller, net)?;

        asset.fee = fee;
        asset.net = net;
    }

    let outcome = RedemptionOutcome {
        caller: request.caller,
        pool: request.pool,
        liquidity_amount: request.liquidity_amount,
        assets,
    };
    host.record(&outcome)?;

    log!(
        "redeem: liquidity {} -> net {} / {}",
        request.liquidity_amount,
        outcome.assets[0].net,
        outcome.assets[1].net
    );

    Ok(outcome)
}
