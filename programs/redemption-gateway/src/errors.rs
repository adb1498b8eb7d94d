//! Redemption gateway errors.
//!
//! # Error Code Ranges
//!
//! | Range | Category | Description |
//! |-------|----------|-------------|
//! | 0-15 | Redemption | Amount, pool interface, slippage, delivery, reentrancy |
//! | 16-31 | Configuration | Fee rate, recipient, authority |
//! | 32-63 | Accounts | Account and instruction validation |

use pinocchio::program_error::ProgramError;

use crate::redemption::AssetSide;

/// Redemption gateway error codes.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::IntoStaticStr)]
pub enum GatewayError {
    // =========================================================================
    // Redemption Errors (0-15)
    // =========================================================================
    /// Liquidity amount is zero
    InvalidAmount = 0,
    /// Pool answers neither the pair view nor the split views
    UnsupportedPoolInterface = 1,
    /// Pool view answered with a null asset address
    MalformedPoolResponse = 2,
    /// Redeemed amount of asset 0 is below the caller's minimum
    SlippageExceededAsset0 = 3,
    /// Redeemed amount of asset 1 is below the caller's minimum
    SlippageExceededAsset1 = 4,
    /// Recipient balance grew by less than the transferred amount
    NonConformingAsset = 5,
    /// Redemption entered while another redemption is in progress
    Reentrant = 6,
    /// Bare transfer with no matching instruction
    RejectedTransfer = 7,
    // Reserved: 8-15

    // =========================================================================
    // Configuration Errors (16-31)
    // =========================================================================
    /// Fee rate above the 500 basis point cap
    FeeTooHigh = 16,
    /// Fee recipient is the null address
    NullRecipient = 17,
    /// Signer is not the authority
    Unauthorized = 18,
    /// No pending authority to accept
    NoPendingAuthority = 19,
    /// Gateway config already initialized
    AlreadyInitialized = 20,
    // Reserved: 21-31

    // =========================================================================
    // Account Errors (32-63)
    // =========================================================================
    /// Invalid instruction data
    InvalidInstructionData = 32,
    /// Gateway config account has the wrong owner, size or discriminator
    InvalidGatewayConfig = 33,
    /// Gateway config is not the canonical PDA
    InvalidConfigPda = 34,
    /// Token program is neither SPL Token nor Token-2022
    InvalidTokenProgram = 35,
    /// Token account does not match the expected mint or owner
    InvalidTokenAccount = 36,
    /// Mint account does not match the resolved asset
    InvalidMint = 37,
    /// Pool program account is not executable
    InvalidPoolProgram = 38,
    /// Invalid system program
    InvalidSystemProgram = 39,
    /// Arithmetic overflow
    ArithmeticOverflow = 40,
}

impl GatewayError {
    /// Slippage error for the side whose floor was missed.
    pub const fn slippage(side: AssetSide) -> Self {
        match side {
            AssetSide::Asset0 => Self::SlippageExceededAsset0,
            AssetSide::Asset1 => Self::SlippageExceededAsset1,
        }
    }

    /// The side reported by a slippage error, if this is one.
    pub const fn slippage_side(self) -> Option<AssetSide> {
        match self {
            Self::SlippageExceededAsset0 => Some(AssetSide::Asset0),
            Self::SlippageExceededAsset1 => Some(AssetSide::Asset1),
            _ => None,
        }
    }

    /// Error name for log lines.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

impl From<GatewayError> for ProgramError {
    fn from(e: GatewayError) -> Self {
        ProgramError::Custom(e as u32)
    }
}
