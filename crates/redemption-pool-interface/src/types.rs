//! Core types for the pool interface.

use pinocchio::pubkey::Pubkey;

/// Basis points precision (10000 = 100%)
pub const BASIS_POINTS: u64 = 10_000;

/// Length of an instruction selector in bytes.
pub const SELECTOR_LEN: usize = 8;

/// Length of one encoded address in a view response.
pub const ADDRESS_LEN: usize = 32;

/// The null address. Never a valid asset identity.
pub const NULL_ADDRESS: Pubkey = [0u8; 32];

/// Returns true for the all-zero address.
#[inline]
pub fn is_null_address(address: &Pubkey) -> bool {
    *address == NULL_ADDRESS
}

// ============================================================================
// Selectors
// ============================================================================

/// Instruction selectors understood by conforming pools.
///
/// Each selector is `sha256("global:<name>")[..8]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolSelector {
    /// Pair view: both asset mints in one 64-byte response
    Tokens,
    /// Split view: first asset mint
    Token0,
    /// Split view: second asset mint
    Token1,
    /// Redeem all LP credit held in the pool's LP custody
    Redeem,
}

impl PoolSelector {
    /// `sha256("global:tokens")[..8]`
    pub const TOKENS: [u8; SELECTOR_LEN] = [0xd7, 0x95, 0x28, 0x9a, 0xb6, 0x92, 0x41, 0x7d];
    /// `sha256("global:token_0")[..8]`
    pub const TOKEN_0: [u8; SELECTOR_LEN] = [0x31, 0x0f, 0x4e, 0x7d, 0x51, 0x74, 0x65, 0x61];
    /// `sha256("global:token_1")[..8]`
    pub const TOKEN_1: [u8; SELECTOR_LEN] = [0x0a, 0x0c, 0x48, 0x9a, 0x52, 0x86, 0xad, 0x36];
    /// `sha256("global:redeem")[..8]`
    pub const REDEEM: [u8; SELECTOR_LEN] = [0xb8, 0x0c, 0x56, 0x95, 0x46, 0xc4, 0x61, 0xe1];

    /// Selector bytes placed at the start of instruction data.
    pub const fn to_bytes(self) -> [u8; SELECTOR_LEN] {
        match self {
            Self::Tokens => Self::TOKENS,
            Self::Token0 => Self::TOKEN_0,
            Self::Token1 => Self::TOKEN_1,
            Self::Redeem => Self::REDEEM,
        }
    }

    /// Match a selector against its byte encoding.
    pub fn from_bytes(bytes: &[u8; SELECTOR_LEN]) -> Option<Self> {
        match *bytes {
            Self::TOKENS => Some(Self::Tokens),
            Self::TOKEN_0 => Some(Self::Token0),
            Self::TOKEN_1 => Some(Self::Token1),
            Self::REDEEM => Some(Self::Redeem),
            _ => None,
        }
    }
}

// ============================================================================
// Views
// ============================================================================

/// Read-only introspection calls a pool may answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolView {
    /// Both mints, 64 bytes (pair convention)
    Tokens,
    /// First mint, 32 bytes (split convention)
    Token0,
    /// Second mint, 32 bytes (split convention)
    Token1,
}

impl PoolView {
    /// Selector addressed by this view.
    pub const fn selector(self) -> PoolSelector {
        match self {
            Self::Tokens => PoolSelector::Tokens,
            Self::Token0 => PoolSelector::Token0,
            Self::Token1 => PoolSelector::Token1,
        }
    }

    /// Exact response length a conforming pool returns for this view.
    pub const fn response_len(self) -> usize {
        match self {
            Self::Tokens => 2 * ADDRESS_LEN,
            Self::Token0 | Self::Token1 => ADDRESS_LEN,
        }
    }
}

// ============================================================================
// Token Pair
// ============================================================================

/// The two asset mints a pool manages, in pool order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenPair {
    /// First asset mint
    pub token0: Pubkey,
    /// Second asset mint
    pub token1: Pubkey,
}

impl TokenPair {
    /// True if neither mint is the null address.
    pub fn is_fully_set(&self) -> bool {
        !is_null_address(&self.token0) && !is_null_address(&self.token1)
    }
}
