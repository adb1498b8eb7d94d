//! Mock account creation helpers for testing.

use litesvm::LiteSVM;
use litesvm_token::{CreateAccount, CreateMint, MintTo};
use mock_pool::MockPoolState;
use redemption_gateway::{GatewayConfig, loader::DISCRIMINATOR_LEN};
use solana_account::Account;
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signer::Signer;

use super::pda::{find_gateway_config_pda, find_mock_pool_pda};
use super::setup::MOCK_POOL_PROGRAM_ID;

/// Offset of the amount field in an SPL token account
const TOKEN_AMOUNT_OFFSET: usize = 64;

/// Create an SPL Token mint using litesvm-token
pub fn create_mint(svm: &mut LiteSVM, authority: &Keypair, decimals: u8) -> Pubkey {
    CreateMint::new(svm, authority)
        .decimals(decimals)
        .authority(&authority.pubkey())
        .send()
        .expect("create mint")
}

/// Create an SPL Token account using litesvm-token, minting `balance` into it.
///
/// `payer` must be the mint authority when `balance > 0`.
pub fn create_token_account(
    svm: &mut LiteSVM,
    payer: &Keypair,
    mint: &Pubkey,
    owner: &Pubkey,
    balance: u64,
) -> Pubkey {
    let token_account = CreateAccount::new(svm, payer, mint)
        .owner(owner)
        .send()
        .expect("create token account");

    if balance > 0 {
        MintTo::new(svm, payer, mint, &token_account, balance)
            .owner(payer)
            .send()
            .expect("mint to");
    }

    token_account
}

/// Read the amount of an SPL token account
pub fn token_balance(svm: &LiteSVM, token_account: &Pubkey) -> u64 {
    let account = svm
        .get_account(token_account)
        .expect("token account should exist");
    let amount: [u8; 8] = account.data[TOKEN_AMOUNT_OFFSET..TOKEN_AMOUNT_OFFSET + 8]
        .try_into()
        .unwrap();
    u64::from_le_bytes(amount)
}

/// Write the mock pool state PDA and return its address.
///
/// The bump in `state` is overwritten with the derived one.
pub fn create_mock_pool(svm: &mut LiteSVM, mut state: MockPoolState) -> Pubkey {
    let (pool, bump) = find_mock_pool_pda();
    state.bump = bump;

    let account = Account {
        lamports: 1_000_000_000,
        data: bytemuck::bytes_of(&state).to_vec(),
        owner: MOCK_POOL_PROGRAM_ID,
        executable: false,
        rent_epoch: 0,
    };
    svm.set_account(pool, account).unwrap();

    pool
}

/// Raw data of the gateway config account
pub fn gateway_config_data(svm: &LiteSVM) -> Vec<u8> {
    let (gateway_config, _) = find_gateway_config_pda();
    svm.get_account(&gateway_config)
        .expect("gateway config should exist")
        .data
}

/// Decode the gateway config account
pub fn read_gateway_config(svm: &LiteSVM) -> GatewayConfig {
    let data = gateway_config_data(svm);
    bytemuck::pod_read_unaligned(
        &data[DISCRIMINATOR_LEN..DISCRIMINATOR_LEN + core::mem::size_of::<GatewayConfig>()],
    )
}
