//! Gateway instruction helpers.

use bytemuck::Pod;
use litesvm::LiteSVM;
use redemption_gateway::{
    GatewayError, GatewayInstruction,
    instructions::{FeeRateData, RedeemData},
};
use solana_instruction::{AccountMeta, Instruction};
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signer::Signer;
use solana_transaction::Transaction;

use super::pda::{SYSTEM_PROGRAM_ID, find_gateway_config_pda};
use super::setup::GATEWAY_PROGRAM_ID;

/// Build instruction data with discriminator and Pod payload.
fn build_instruction_data<T: Pod>(instruction: GatewayInstruction, args: &T) -> Vec<u8> {
    let mut data = vec![instruction as u8];
    data.extend_from_slice(bytemuck::bytes_of(args));
    data
}

/// Build instruction data with just the discriminator (no args).
fn build_instruction_data_no_args(instruction: GatewayInstruction) -> Vec<u8> {
    vec![instruction as u8]
}

fn fee_rate_args(fee_rate_bps: u16) -> FeeRateData {
    FeeRateData {
        fee_rate_bps,
        _padding: [0; 6],
    }
}

/// Sign and send a single instruction, paid by the first signer.
///
/// The blockhash is expired first so repeated identical instructions are
/// distinct transactions.
pub fn send_instruction(
    svm: &mut LiteSVM,
    ix: Instruction,
    signers: &[&Keypair],
) -> Result<(), String> {
    svm.expire_blockhash();
    let tx = Transaction::new_signed_with_payer(
        &[ix],
        Some(&signers[0].pubkey()),
        signers,
        svm.latest_blockhash(),
    );

    svm.send_transaction(tx)
        .map(|_| ())
        .map_err(|e| format!("{:?}", e))
}

/// Assert that a transaction failed with the given gateway error.
pub fn assert_gateway_error(result: Result<(), String>, expected: GatewayError) {
    let err = result.expect_err(&format!("expected {:?}, transaction succeeded", expected));
    let code = format!("Custom({})", expected as u32);
    assert!(
        err.contains(&code),
        "expected {:?} ({}), got: {}",
        expected,
        code,
        err
    );
}

// ============================================================================
// Initialize
// ============================================================================

/// Initialize the gateway config.
///
/// Returns the gateway config PDA on success.
pub fn initialize(
    svm: &mut LiteSVM,
    authority: &Keypair,
    fee_recipient: &Pubkey,
    fee_rate_bps: u16,
) -> Result<Pubkey, String> {
    let (gateway_config, _) = find_gateway_config_pda();

    let ix = Instruction {
        program_id: GATEWAY_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(gateway_config, false),
            AccountMeta::new(authority.pubkey(), true),
            AccountMeta::new_readonly(*fee_recipient, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(GATEWAY_PROGRAM_ID, false),
        ],
        data: build_instruction_data(GatewayInstruction::Initialize, &fee_rate_args(fee_rate_bps)),
    };

    send_instruction(svm, ix, &[authority]).map(|_| gateway_config)
}

// ============================================================================
// Fee Configuration
// ============================================================================

/// Set the protocol fee rate.
pub fn set_fee_rate(
    svm: &mut LiteSVM,
    authority: &Keypair,
    fee_rate_bps: u16,
) -> Result<(), String> {
    let (gateway_config, _) = find_gateway_config_pda();

    let ix = Instruction {
        program_id: GATEWAY_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(gateway_config, false),
            AccountMeta::new_readonly(authority.pubkey(), true),
            AccountMeta::new_readonly(GATEWAY_PROGRAM_ID, false),
        ],
        data: build_instruction_data(GatewayInstruction::SetFeeRate, &fee_rate_args(fee_rate_bps)),
    };

    send_instruction(svm, ix, &[authority])
}

/// Set the protocol fee recipient.
pub fn set_fee_recipient(
    svm: &mut LiteSVM,
    authority: &Keypair,
    new_fee_recipient: &Pubkey,
) -> Result<(), String> {
    let (gateway_config, _) = find_gateway_config_pda();

    let ix = Instruction {
        program_id: GATEWAY_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(gateway_config, false),
            AccountMeta::new_readonly(authority.pubkey(), true),
            AccountMeta::new_readonly(*new_fee_recipient, false),
            AccountMeta::new_readonly(GATEWAY_PROGRAM_ID, false),
        ],
        data: build_instruction_data_no_args(GatewayInstruction::SetFeeRecipient),
    };

    send_instruction(svm, ix, &[authority])
}

// ============================================================================
// Authority Transfer
// ============================================================================

/// Initiate a two-step authority transfer.
pub fn transfer_authority(
    svm: &mut LiteSVM,
    authority: &Keypair,
    new_authority: &Pubkey,
) -> Result<(), String> {
    let (gateway_config, _) = find_gateway_config_pda();

    let ix = Instruction {
        program_id: GATEWAY_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(gateway_config, false),
            AccountMeta::new_readonly(authority.pubkey(), true),
            AccountMeta::new_readonly(*new_authority, false),
            AccountMeta::new_readonly(GATEWAY_PROGRAM_ID, false),
        ],
        data: build_instruction_data_no_args(GatewayInstruction::TransferAuthority),
    };

    send_instruction(svm, ix, &[authority])
}

/// Accept a pending authority transfer.
pub fn accept_authority(svm: &mut LiteSVM, new_authority: &Keypair) -> Result<(), String> {
    let (gateway_config, _) = find_gateway_config_pda();

    let ix = Instruction {
        program_id: GATEWAY_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(gateway_config, false),
            AccountMeta::new_readonly(new_authority.pubkey(), true),
            AccountMeta::new_readonly(GATEWAY_PROGRAM_ID, false),
        ],
        data: build_instruction_data_no_args(GatewayInstruction::AcceptAuthority),
    };

    send_instruction(svm, ix, &[new_authority])
}

// ============================================================================
// Raw Instructions
// ============================================================================

/// Send arbitrary instruction data to the gateway with `signer` as the only
/// account.
pub fn send_raw(svm: &mut LiteSVM, signer: &Keypair, data: Vec<u8>) -> Result<(), String> {
    let ix = Instruction {
        program_id: GATEWAY_PROGRAM_ID,
        accounts: vec![AccountMeta::new(signer.pubkey(), true)],
        data,
    };

    send_instruction(svm, ix, &[signer])
}

/// Build Log instruction data carrying `event`.
pub fn log_data(event: &[u8]) -> Vec<u8> {
    let mut data = build_instruction_data_no_args(GatewayInstruction::Log);
    data.extend_from_slice(&(event.len() as u32).to_le_bytes());
    data.extend_from_slice(event);
    data
}

// ============================================================================
// Redeem
// ============================================================================

/// Build Redeem instruction data.
pub fn redeem_data(liquidity_amount: u64, min_amount0: u64, min_amount1: u64) -> Vec<u8> {
    build_instruction_data(
        GatewayInstruction::Redeem,
        &RedeemData {
            liquidity_amount,
            min_amount0,
            min_amount1,
        },
    )
}
