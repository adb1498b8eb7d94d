//! Redemption Gateway Program
//!
//! Redeems a caller's LP credit in an external two-asset pool, skims a capped
//! protocol fee from each redeemed asset and forwards the rest to the caller.
//!
//! # Architecture
//!
//! ```text
//! Redeem ─► RedeemAccounts ─► SolanaHost ─► redemption::redeem
//!                                            ├─ lock (GatewayConfig.busy)
//!                                            ├─ resolve_tokens (pool view CPIs)
//!                                            ├─ LP deposit + pool redeem CPIs
//!                                            ├─ slippage floors
//!                                            ├─ fee::split + guarded_transfer
//!                                            └─ RedemptionEvent (self-CPI Log)
//! ```
//!
//! The protocol in [`redemption`] is host-independent; [`host::SolanaHost`]
//! binds it to accounts and CPIs.
//!
//! # Instructions
//!
//! - `Redeem`: Redeem LP credit (see [`instructions::RedeemAccounts`])
//! - `Initialize`, `SetFeeRate`, `SetFeeRecipient`: Fee configuration
//! - `TransferAuthority`, `AcceptAuthority`: Two-step authority handover
//! - `Log`: Self-CPI event sink
//!
//! Instruction data with no discriminator (a bare transfer) is always
//! rejected with [`GatewayError::RejectedTransfer`].

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod errors;
pub mod events;
pub mod host;
pub mod instructions;
pub mod loader;
pub mod pda;
pub mod redemption;
pub mod state;
pub mod token;

use pinocchio::{
    ProgramResult, account_info::AccountInfo, program_error::ProgramError, pubkey::Pubkey,
};

// Error and event types
pub use errors::GatewayError;
pub use events::{
    AuthorityTransferCompletedEvent, AuthorityTransferInitiatedEvent, EventType,
    FeeRateChangedEvent, FeeRecipientChangedEvent, GatewayEvent, GatewayInitializedEvent,
    RedemptionEvent, emit_event,
};

// Instruction enum for dispatch
pub use instructions::GatewayInstruction;

// PDA derivation helpers
pub use pda::*;

// State types
pub use state::GatewayConfig;

/// Program ID decoded from the network-selected constant at compile time.
///
/// Imported from the gateway-program-ids crate (single source of truth).
pub const ID: Pubkey = five8_const::decode_32_const(gateway_program_ids::REDEMPTION_GATEWAY_ID);

/// Returns the program ID
pub fn id() -> Pubkey {
    ID
}

/// Checks if the given pubkey matches the program ID
pub fn check_id(id: &Pubkey) -> bool {
    *id == ID
}

#[cfg(not(feature = "no-entrypoint"))]
pinocchio::entrypoint!(process_instruction);

/// Program entrypoint - dispatches instructions to handlers.
///
/// # Errors
/// - `ProgramError::IncorrectProgramId` if invoked under another program ID
/// - Any handler error
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    if !check_id(program_id) {
        return Err(ProgramError::IncorrectProgramId);
    }
    instructions::dispatch(accounts, instruction_data)
}
