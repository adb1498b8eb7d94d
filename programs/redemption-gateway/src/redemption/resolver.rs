//! Pool interface resolution.
//!
//! Pools fall into two families that expose their asset mints differently:
//!
//! - **Pair**: one `tokens` view returning `mint0 || mint1` (64 bytes)
//! - **Split**: `token_0` and `token_1` views returning 32 bytes each
//!
//! The pair view is queried first. Only when it is unanswered or answers with
//! a different shape are the split views tried. Nothing is cached: pool
//! accounts are caller-supplied and unverified, so every call re-resolves.

use pinocchio::program_error::ProgramError;
use pinocchio_log::log;
use redemption_pool_interface::{PoolView, TokenPair, decode_token, decode_token_pair};

use super::PoolIntrospection;
use crate::errors::GatewayError;

/// Resolve the two asset mints managed by a pool.
///
/// # Errors
/// - [`GatewayError::MalformedPoolResponse`] if a correctly shaped answer
///   contains a null mint
/// - [`GatewayError::UnsupportedPoolInterface`] if neither convention answers
///   with the expected shapes
pub fn resolve_tokens<P: PoolIntrospection + ?Sized>(
    pool: &mut P,
) -> Result<TokenPair, ProgramError> {
    if let Some(pair) = pool
        .view(PoolView::Tokens)
        .and_then(|response| decode_token_pair(&response))
    {
        if !pair.is_fully_set() {
            log!("resolve_tokens: pair view returned a null mint");
            return Err(GatewayError::MalformedPoolResponse.into());
        }
        return Ok(pair);
    }

    let token0 = pool
        .view(PoolView::Token0)
        .and_then(|response| decode_token(&response));
    let token1 = match token0 {
        Some(_) => pool
            .view(PoolView::Token1)
            .and_then(|response| decode_token(&response)),
        None => None,
    };

    match (token0, token1) {
        (Some(token0), Some(token1)) => {
            let pair = TokenPair { token0, token1 };
            if !pair.is_fully_set() {
                log!("resolve_tokens: split view returned a null mint");
                return Err(GatewayError::MalformedPoolResponse.into());
            }
            Ok(pair)
        }
        _ => {
            log!("resolve_tokens: pool answers neither convention");
            Err(GatewayError::UnsupportedPoolInterface.into())
        }
    }
}
