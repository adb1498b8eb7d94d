//! Redemption gateway state accounts.

use bytemuck::{Pod, Zeroable};
use pinocchio::{ProgramResult, program_error::ProgramError, pubkey::Pubkey};
use redemption_pool_interface::{NULL_ADDRESS, is_null_address};

use crate::{
    errors::GatewayError,
    loader::ProgramAccount,
    redemption::{FeePolicy, ReentrancyLock, validate_fee_rate},
};

/// Account discriminators for the redemption gateway.
///
/// The discriminator is stored as the first 8 bytes of account data.
///
/// # Ranges
/// - **0-15**: Core accounts (gateway config)
#[repr(u64)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GatewayAccount {
    /// Singleton gateway configuration
    GatewayConfig = 0,
    // Reserved: 1-15
}

/// Gateway configuration account.
///
/// PDA `["gateway_config"]`. Also the owner of every custody token account,
/// so it signs all payouts.
///
/// Fields are private. Every mutation goes through a method that checks the
/// signer and the value, which keeps `fee_rate_bps <= MAX_FEE_RATE_BPS` and a
/// non-null `fee_recipient` true from construction onwards.
///
/// # Layout
///
/// ```text
/// [0..8]     discriminator
/// [8..40]    authority
/// [40..72]   pending_authority
/// [72..104]  fee_recipient
/// [104..112] total_redemptions
/// [112..114] fee_rate_bps
/// [114]      busy
/// [115]      bump
/// [116..120] padding
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct GatewayConfig {
    /// Authority that can change the fee configuration
    authority: Pubkey,
    /// Pending authority for two-step transfer.
    /// Set by `transfer_authority`, cleared by `accept_authority`.
    pending_authority: Pubkey,
    /// Wallet that owns the fee token accounts
    fee_recipient: Pubkey,
    /// Number of completed redemptions
    total_redemptions: u64,
    /// Fee rate in basis points
    fee_rate_bps: u16,
    /// Reentrancy flag (1 while a redemption is running)
    busy: u8,
    /// PDA bump seed
    bump: u8,
    /// Padding for 8-byte alignment
    _padding: [u8; 4],
}

impl ProgramAccount for GatewayConfig {
    const DISCRIMINATOR: u64 = GatewayAccount::GatewayConfig as u64;
}

impl GatewayConfig {
    /// Build a fresh, idle configuration.
    ///
    /// # Errors
    /// - [`GatewayError::FeeTooHigh`] if `fee_rate_bps` exceeds the cap
    /// - [`GatewayError::NullRecipient`] if `fee_recipient` is null
    pub fn new(
        authority: Pubkey,
        fee_recipient: Pubkey,
        fee_rate_bps: u16,
        bump: u8,
    ) -> Result<Self, GatewayError> {
        validate_fee_rate(fee_rate_bps)?;
        if is_null_address(&fee_recipient) {
            return Err(GatewayError::NullRecipient);
        }
        Ok(Self {
            authority,
            pending_authority: NULL_ADDRESS,
            fee_recipient,
            total_redemptions: 0,
            fee_rate_bps,
            busy: 0,
            bump,
            _padding: [0u8; 4],
        })
    }

    /// Current authority.
    pub fn authority(&self) -> &Pubkey {
        &self.authority
    }

    /// Pending authority, null when no transfer is in flight.
    pub fn pending_authority(&self) -> &Pubkey {
        &self.pending_authority
    }

    /// Fee recipient wallet.
    pub fn fee_recipient(&self) -> &Pubkey {
        &self.fee_recipient
    }

    /// Fee rate in basis points.
    pub fn fee_rate_bps(&self) -> u16 {
        self.fee_rate_bps
    }

    /// Completed redemption count.
    pub fn total_redemptions(&self) -> u64 {
        self.total_redemptions
    }

    /// PDA bump seed.
    pub fn bump(&self) -> u8 {
        self.bump
    }

    /// Fee configuration snapshot.
    pub fn fee_policy(&self) -> FeePolicy {
        FeePolicy {
            fee_rate_bps: self.fee_rate_bps,
            fee_recipient: self.fee_recipient,
        }
    }

    /// Check if signer matches authority, returning error if unauthorized.
    #[inline]
    pub fn require_authority(&self, signer: &Pubkey) -> Result<(), GatewayError> {
        if self.authority != *signer {
            return Err(GatewayError::Unauthorized);
        }
        Ok(())
    }

    /// Replace the fee rate, returning the previous one.
    ///
    /// The authority check runs before the value check.
    pub fn set_fee_rate(&mut self, signer: &Pubkey, fee_rate_bps: u16) -> Result<u16, GatewayError> {
        self.require_authority(signer)?;
        validate_fee_rate(fee_rate_bps)?;
        let old = self.fee_rate_bps;
        self.fee_rate_bps = fee_rate_bps;
        Ok(old)
    }

    /// Replace the fee recipient, returning the previous one.
    pub fn set_fee_recipient(
        &mut self,
        signer: &Pubkey,
        fee_recipient: &Pubkey,
    ) -> Result<Pubkey, GatewayError> {
        self.require_authority(signer)?;
        if is_null_address(fee_recipient) {
            return Err(GatewayError::NullRecipient);
        }
        let old = self.fee_recipient;
        self.fee_recipient = *fee_recipient;
        Ok(old)
    }

    /// Start a two-step authority transfer. A null `new_authority` cancels
    /// any pending transfer.
    pub fn begin_authority_transfer(
        &mut self,
        signer: &Pubkey,
        new_authority: &Pubkey,
    ) -> Result<(), GatewayError> {
        self.require_authority(signer)?;
        self.pending_authority = *new_authority;
        Ok(())
    }

    /// Complete a two-step authority transfer, returning the previous
    /// authority.
    pub fn accept_authority(&mut self, signer: &Pubkey) -> Result<Pubkey, GatewayError> {
        if is_null_address(&self.pending_authority) {
            return Err(GatewayError::NoPendingAuthority);
        }
        if self.pending_authority != *signer {
            return Err(GatewayError::Unauthorized);
        }
        let previous = self.authority;
        self.authority = self.pending_authority;
        self.pending_authority = NULL_ADDRESS;
        Ok(previous)
    }

    /// Count a completed redemption.
    pub fn record_redemption(&mut self) -> Result<(), GatewayError> {
        self.total_redemptions = self
            .total_redemptions
            .checked_add(1)
            .ok_or(GatewayError::ArithmeticOverflow)?;
        Ok(())
    }
}

impl ReentrancyLock for GatewayConfig {
    fn is_busy(&self) -> Result<bool, ProgramError> {
        Ok(self.busy != 0)
    }

    fn set_busy(&mut self, busy: bool) -> ProgramResult {
        self.busy = busy as u8;
        Ok(())
    }
}
