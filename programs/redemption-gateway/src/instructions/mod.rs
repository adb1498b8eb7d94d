//! Redemption gateway instruction handlers.

use bytemuck::{Pod, Zeroable};
use num_enum::TryFromPrimitive;
use pinocchio::{ProgramResult, account_info::AccountInfo, program_error::ProgramError};
use pinocchio_log::log;

use crate::errors::GatewayError;

// Admin instructions (initialization, configuration, authority)
pub mod admin;

// Redemption
mod redeem;

// Event emission via self-CPI
mod log;

pub use admin::*;
pub use log::process_log;
pub use redeem::{RedeemAccounts, RedeemData, process_redeem};

/// Redemption gateway instruction set.
///
/// The first byte of instruction data selects the instruction; the rest is
/// the instruction's Pod payload.
///
/// # Discriminator Ranges
/// - **0-31**: User operations (redeem)
/// - **64-127**: Config operations (initialize, fee configuration, log)
/// - **192-255**: Admin operations (authority transfer)
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, strum::IntoStaticStr)]
pub enum GatewayInstruction {
    // =========================================================================
    // User Operations (0-31)
    // =========================================================================
    /// Redeem LP credit for the pool's two assets, less the protocol fee.
    ///
    /// # Accounts
    /// See [`RedeemAccounts`].
    Redeem = 0,
    // Reserved: 1-31

    // =========================================================================
    // Config Operations (64-127)
    // =========================================================================
    /// Create the gateway config PDA.
    Initialize = 64,

    /// Set the protocol fee rate.
    SetFeeRate = 65,

    /// Set the protocol fee recipient.
    SetFeeRecipient = 66,

    /// Log an event via CPI (internal use only).
    ///
    /// Invoked by the program itself with the config PDA as signer.
    Log = 67,
    // Reserved: 68-127

    // =========================================================================
    // Admin Operations (192-255)
    // =========================================================================
    /// Initiate two-step authority transfer by setting pending_authority.
    TransferAuthority = 192,

    /// Complete two-step authority transfer by accepting pending_authority role.
    AcceptAuthority = 193,
}

/// Decode a Pod instruction payload of exactly `size_of::<T>()` bytes.
pub(crate) fn parse_data<T: Pod>(data: &[u8]) -> Result<T, ProgramError> {
    bytemuck::try_pod_read_unaligned(data).map_err(|_| GatewayError::InvalidInstructionData.into())
}

/// Route an instruction to its handler.
///
/// Empty instruction data is a bare transfer and is always rejected.
pub fn dispatch(accounts: &[AccountInfo], instruction_data: &[u8]) -> ProgramResult {
    let Some((discriminator, data)) = instruction_data.split_first() else {
        log!("gateway: bare transfer rejected");
        return Err(GatewayError::RejectedTransfer.into());
    };

    let instruction = GatewayInstruction::try_from(*discriminator).map_err(|_| {
        log!("gateway: unknown instruction {}", *discriminator);
        GatewayError::InvalidInstructionData
    })?;

    match instruction {
        GatewayInstruction::Redeem => process_redeem(accounts, data),
        GatewayInstruction::Initialize => process_initialize(accounts, data),
        GatewayInstruction::SetFeeRate => process_set_fee_rate(accounts, data),
        GatewayInstruction::SetFeeRecipient => process_set_fee_recipient(accounts, data),
        GatewayInstruction::Log => process_log(accounts, data),
        GatewayInstruction::TransferAuthority => process_transfer_authority(accounts, data),
        GatewayInstruction::AcceptAuthority => process_accept_authority(accounts, data),
    }
}

/// Payload of instructions that carry a single fee rate.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct FeeRateData {
    /// Fee rate in basis points (max 500)
    pub fee_rate_bps: u16,
    /// Padding for 8-byte alignment
    pub _padding: [u8; 6],
}

/// Reject a non-empty payload for instructions that take none.
pub(crate) fn require_empty(data: &[u8]) -> ProgramResult {
    if !data.is_empty() {
        return Err(GatewayError::InvalidInstructionData.into());
    }
    Ok(())
}
