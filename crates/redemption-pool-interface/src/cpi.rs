//! Instruction data builders, view codecs and CPI account layouts.
//!
//! The gateway uses the builders to construct CPIs into pools and the
//! decoders to validate view responses. Pool implementations use the parsers
//! and encoders on their side of the same calls.

use pinocchio::pubkey::Pubkey;

use crate::{ADDRESS_LEN, PoolSelector, PoolView, SELECTOR_LEN, TokenPair};

// ============================================================================
// Instruction Data Builders
// ============================================================================

/// Build instruction data for a view CPI.
///
/// Layout: [selector: 8 bytes]. Views take no arguments.
pub fn build_view_instruction_data(view: PoolView) -> [u8; SELECTOR_LEN] {
    view.selector().to_bytes()
}

/// Build instruction data for a redeem CPI.
///
/// Layout: [selector: 8 bytes]. The pool redeems everything held in its LP
/// custody account, so no amount is passed.
pub fn build_redeem_instruction_data() -> [u8; SELECTOR_LEN] {
    PoolSelector::Redeem.to_bytes()
}

/// Parse the selector at the start of pool instruction data.
pub fn parse_selector(data: &[u8]) -> Option<PoolSelector> {
    let selector: &[u8; SELECTOR_LEN] = data.get(..SELECTOR_LEN)?.try_into().ok()?;
    PoolSelector::from_bytes(selector)
}

// ============================================================================
// View Response Codecs
// ============================================================================

/// Encode a pair-view response: `token0 || token1`.
pub fn encode_token_pair(pair: &TokenPair) -> [u8; 2 * ADDRESS_LEN] {
    let mut out = [0u8; 2 * ADDRESS_LEN];
    out[..ADDRESS_LEN].copy_from_slice(&pair.token0);
    out[ADDRESS_LEN..].copy_from_slice(&pair.token1);
    out
}

/// Encode a split-view response (a single mint).
pub fn encode_token(token: &Pubkey) -> [u8; ADDRESS_LEN] {
    *token
}

/// Decode a pair-view response.
///
/// Returns `None` unless the response is exactly
/// [`PoolView::Tokens`]`.response_len()` bytes. Null addresses decode
/// successfully; rejecting them is the caller's policy.
pub fn decode_token_pair(response: &[u8]) -> Option<TokenPair> {
    if response.len() != PoolView::Tokens.response_len() {
        return None;
    }
    let mut token0 = [0u8; ADDRESS_LEN];
    let mut token1 = [0u8; ADDRESS_LEN];
    token0.copy_from_slice(&response[..ADDRESS_LEN]);
    token1.copy_from_slice(&response[ADDRESS_LEN..]);
    Some(TokenPair { token0, token1 })
}

/// Decode a split-view response.
///
/// Returns `None` unless the response is exactly
/// [`PoolView::Token0`]`.response_len()` bytes (both split views share it).
pub fn decode_token(response: &[u8]) -> Option<Pubkey> {
    if response.len() != PoolView::Token0.response_len() {
        return None;
    }
    response.try_into().ok()
}

// ============================================================================
// Account Layout Constants
// ============================================================================

/// Account indices for view CPIs.
///
/// 0. pool - Pool state account (read-only)
pub mod view_accounts {
    /// Pool state account (read-only)
    pub const POOL: usize = 0;
    /// Total number of accounts
    pub const COUNT: usize = 1;
}

/// Account indices for the redeem CPI.
///
/// The pool burns the LP credit held in `lp_custody` and pays the underlying
/// assets into the two destination token accounts. Accounts after
/// `FIXED_COUNT` are forwarded untouched from the gateway caller (reserves,
/// pool authority, asset token programs, ...).
///
/// 0. pool (mut) - Pool state account
/// 1. lp_custody (mut) - Pool-owned LP token account holding the credit
/// 2. lp_mint (mut) - LP mint (supply decreases on burn)
/// 3. destination0 (mut) - Receives asset 0
/// 4. destination1 (mut) - Receives asset 1
/// 5. lp_token_program - Token program of the LP mint
pub mod redeem_accounts {
    /// Pool state account (writable)
    pub const POOL: usize = 0;
    /// Pool LP custody token account (writable)
    pub const LP_CUSTODY: usize = 1;
    /// LP mint (writable)
    pub const LP_MINT: usize = 2;
    /// Asset 0 destination token account (writable)
    pub const DESTINATION0: usize = 3;
    /// Asset 1 destination token account (writable)
    pub const DESTINATION1: usize = 4;
    /// Token program of the LP mint
    pub const LP_TOKEN_PROGRAM: usize = 5;
    /// Number of fixed accounts before the pass-through accounts
    pub const FIXED_COUNT: usize = 6;

    /// Writability of each fixed account, by index
    pub const WRITABLE: [bool; FIXED_COUNT] = [true, true, true, true, true, false];
}

// ============================================================================
// Tests
// ============================================================================
