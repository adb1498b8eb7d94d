//! Event definitions for the redemption gateway.
//!
//! Events are emitted via self-invocation of the Log instruction,
//! which allows event data to be recorded in transaction logs without truncation.
//!
//! # Event Types
//!
//! - [`RedemptionEvent`] - Emitted when a redemption completes
//! - [`FeeRateChangedEvent`] - Emitted when the fee rate changes
//! - [`FeeRecipientChangedEvent`] - Emitted when the fee recipient changes
//! - [`AuthorityTransferInitiatedEvent`] / [`AuthorityTransferCompletedEvent`]
//! - [`GatewayInitializedEvent`] - Emitted once, at initialization
//!
//! # Wire Format
//!
//! `[EventType as u64 (LE), Pod bytes of the event struct]`

use alloc::vec::Vec;
use bytemuck::{Pod, Zeroable};
use pinocchio::{
    ProgramResult,
    account_info::AccountInfo,
    cpi::invoke_signed,
    instruction::{AccountMeta, Instruction, Signer},
    pubkey::Pubkey,
};

use crate::ID;
use crate::instructions::GatewayInstruction;
use crate::redemption::RedemptionOutcome;

/// Event type discriminators for identifying event types in logs.
///
/// # Ranges
/// - **1-15**: Core events (redemption)
/// - **16-31**: Admin events (configuration, authority)
#[repr(u64)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::IntoStaticStr)]
pub enum EventType {
    // =========================================================================
    // Core Events (1-15)
    // =========================================================================
    /// Redemption completed
    Redemption = 1,
    // Reserved: 2-15

    // =========================================================================
    // Admin Events (16-31)
    // =========================================================================
    /// Gateway config created
    GatewayInitialized = 16,
    /// Fee rate changed
    FeeRateChanged = 17,
    /// Fee recipient changed
    FeeRecipientChanged = 18,
    /// Pending authority set
    AuthorityTransferInitiated = 19,
    /// Pending authority accepted
    AuthorityTransferCompleted = 20,
}

/// A Pod event with a fixed type discriminator.
pub trait GatewayEvent: Pod {
    /// Discriminator prepended to the serialized event.
    const EVENT_TYPE: EventType;

    /// Serialize as `[discriminator, Pod bytes]`.
    fn to_event_bytes(&self) -> Vec<u8> {
        let body = bytemuck::bytes_of(self);
        let mut bytes = Vec::with_capacity(8 + body.len());
        bytes.extend_from_slice(&(Self::EVENT_TYPE as u64).to_le_bytes());
        bytes.extend_from_slice(body);
        bytes
    }
}

/// Event emitted when a redemption completes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct RedemptionEvent {
    /// Redeeming wallet
    pub caller: [u8; 32],
    /// Pool state account
    pub pool: [u8; 32],
    /// Asset 0 mint
    pub mint0: [u8; 32],
    /// Asset 1 mint
    pub mint1: [u8; 32],
    /// LP credit redeemed
    pub liquidity_amount: u64,
    /// Asset 0 released by the pool
    pub gross0: u64,
    /// Asset 0 protocol fee
    pub fee0: u64,
    /// Asset 0 delivered to the caller
    pub net0: u64,
    /// Asset 1 released by the pool
    pub gross1: u64,
    /// Asset 1 protocol fee
    pub fee1: u64,
    /// Asset 1 delivered to the caller
    pub net1: u64,
    /// Solana slot of the redemption
    pub slot: u64,
}

impl GatewayEvent for RedemptionEvent {
    const EVENT_TYPE: EventType = EventType::Redemption;
}

impl RedemptionEvent {
    /// Build from a redemption outcome.
    pub fn from_outcome(outcome: &RedemptionOutcome, slot: u64) -> Self {
        let [asset0, asset1] = outcome.assets;
        Self {
            caller: outcome.caller,
            pool: outcome.pool,
            mint0: asset0.mint,
            mint1: asset1.mint,
            liquidity_amount: outcome.liquidity_amount,
            gross0: asset0.gross,
            fee0: asset0.fee,
            net0: asset0.net,
            gross1: asset1.gross,
            fee1: asset1.fee,
            net1: asset1.net,
            slot,
        }
    }
}

/// Event emitted when the gateway config is created.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct GatewayInitializedEvent {
    /// Initial authority
    pub authority: [u8; 32],
    /// Initial fee recipient
    pub fee_recipient: [u8; 32],
    /// Initial fee rate in basis points
    pub fee_rate_bps: u16,
    /// Padding for 8-byte alignment
    pub _padding: [u8; 6],
    /// Solana slot of initialization
    pub slot: u64,
}

impl GatewayEvent for GatewayInitializedEvent {
    const EVENT_TYPE: EventType = EventType::GatewayInitialized;
}

/// Event emitted when the fee rate changes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct FeeRateChangedEvent {
    /// Authority that made the change
    pub authority: [u8; 32],
    /// Previous fee rate in basis points
    pub old_fee_rate_bps: u16,
    /// New fee rate in basis points
    pub new_fee_rate_bps: u16,
    /// Padding for 8-byte alignment
    pub _padding: [u8; 4],
    /// Solana slot of the change
    pub slot: u64,
}

impl GatewayEvent for FeeRateChangedEvent {
    const EVENT_TYPE: EventType = EventType::FeeRateChanged;
}

/// Event emitted when the fee recipient changes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct FeeRecipientChangedEvent {
    /// Authority that made the change
    pub authority: [u8; 32],
    /// Previous fee recipient
    pub old_fee_recipient: [u8; 32],
    /// New fee recipient
    pub new_fee_recipient: [u8; 32],
    /// Solana slot of the change
    pub slot: u64,
}

impl GatewayEvent for FeeRecipientChangedEvent {
    const EVENT_TYPE: EventType = EventType::FeeRecipientChanged;
}

/// Event emitted when a two-step authority transfer starts (or is cancelled,
/// with a null `pending_authority`).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct AuthorityTransferInitiatedEvent {
    /// Current authority
    pub authority: [u8; 32],
    /// Proposed authority
    pub pending_authority: [u8; 32],
    /// Solana slot of the change
    pub slot: u64,
}

impl GatewayEvent for AuthorityTransferInitiatedEvent {
    const EVENT_TYPE: EventType = EventType::AuthorityTransferInitiated;
}

/// Event emitted when the pending authority accepts.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct AuthorityTransferCompletedEvent {
    /// Authority before the transfer
    pub previous_authority: [u8; 32],
    /// Authority after the transfer
    pub new_authority: [u8; 32],
    /// Solana slot of the change
    pub slot: u64,
}

impl GatewayEvent for AuthorityTransferCompletedEvent {
    const EVENT_TYPE: EventType = EventType::AuthorityTransferCompleted;
}

/// Build Log instruction data: `[Log discriminator, length (4 bytes LE), event bytes]`.
pub fn build_log_instruction_data<T: GatewayEvent>(event: &T) -> Vec<u8> {
    let event_data = event.to_event_bytes();
    let len = event_data.len() as u32;
    let mut instruction_data = Vec::with_capacity(1 + 4 + event_data.len());
    instruction_data.push(GatewayInstruction::Log as u8);
    instruction_data.extend_from_slice(&len.to_le_bytes());
    instruction_data.extend_from_slice(&event_data);
    instruction_data
}

/// Emit an event via self-invocation of the Log instruction.
///
/// # Arguments
/// * `gateway_config` - The gateway config PDA account (used as signer)
/// * `gateway_program` - This program's account (required for self-CPI)
/// * `signer` - Signer seeds for the gateway config PDA
/// * `event` - The event to emit
pub fn emit_event<T: GatewayEvent>(
    gateway_config: &AccountInfo,
    gateway_program: &AccountInfo,
    signer: Signer,
    event: &T,
) -> ProgramResult {
    let instruction_data = build_log_instruction_data(event);

    let instruction = Instruction {
        program_id: &ID,
        accounts: &[AccountMeta::readonly_signer(gateway_config.key())],
        data: &instruction_data,
    };

    invoke_signed(&instruction, &[gateway_config, gateway_program], &[signer])
}

/// Check that `gateway_program` is this program, for accounts lists that
/// carry it only for self-CPI.
#[inline]
pub fn is_gateway_program(gateway_program: &Pubkey) -> bool {
    *gateway_program == ID
}
