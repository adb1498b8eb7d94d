//! A deployed gateway and mock pool with every account a redemption needs.

use litesvm::LiteSVM;
use mock_pool::{MockPoolState, PoolInterface as MockPoolInterface};
use solana_instruction::{AccountMeta, Instruction};
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signer::Signer;

use super::instructions::{initialize, redeem_data, send_instruction};
use super::mock_accounts::{create_mint, create_mock_pool, create_token_account, token_balance};
use super::pda::SPL_TOKEN_PROGRAM_ID;
use super::setup::{GATEWAY_PROGRAM_ID, MOCK_POOL_PROGRAM_ID, new_svm};

/// Fee rate the fixture initializes the gateway with
pub const FIXTURE_FEE_RATE_BPS: u16 = 250;
/// Gross amounts the mock pool pays per redeem
pub const FIXTURE_PAYOUT: [u64; 2] = [1_000_000, 2_000_000];
/// Starting reserve of each asset
pub const FIXTURE_RESERVE: u64 = 100_000_000;
/// Starting LP balance of the caller
pub const FIXTURE_CALLER_LP: u64 = 1_000;

/// Gateway, pool and token accounts for one redeeming caller.
///
/// Account fields are public so tests can swap one out before redeeming.
pub struct RedemptionFixture {
    pub svm: LiteSVM,
    pub authority: Keypair,
    pub fee_recipient: Pubkey,
    pub caller: Keypair,
    pub gateway_config: Pubkey,
    pub pool_program: Pubkey,
    pub pool: Pubkey,
    pub lp_mint: Pubkey,
    pub caller_lp: Pubkey,
    pub pool_lp_custody: Pubkey,
    pub mints: [Pubkey; 2],
    pub custody: [Pubkey; 2],
    pub caller_tokens: [Pubkey; 2],
    pub fee_tokens: [Pubkey; 2],
    pub reserves: [Pubkey; 2],
    pub token_programs: [Pubkey; 2],
}

impl RedemptionFixture {
    /// Deploy both programs, initialize the gateway at 250 bps and fund a
    /// pool answering `interface`.
    pub fn new(interface: MockPoolInterface) -> Self {
        let mut svm = new_svm();

        let authority = Keypair::new();
        let caller = Keypair::new();
        let fee_recipient = Pubkey::new_unique();
        svm.airdrop(&authority.pubkey(), 10_000_000_000).unwrap();
        svm.airdrop(&caller.pubkey(), 10_000_000_000).unwrap();

        let gateway_config =
            initialize(&mut svm, &authority, &fee_recipient, FIXTURE_FEE_RATE_BPS)
                .expect("initialize should succeed");

        // The authority doubles as mint authority for every mint.
        let lp_mint = create_mint(&mut svm, &authority, 9);
        let mints = [
            create_mint(&mut svm, &authority, 6),
            create_mint(&mut svm, &authority, 9),
        ];

        let pool = create_mock_pool(
            &mut svm,
            MockPoolState {
                token0: mints[0].to_bytes(),
                token1: mints[1].to_bytes(),
                payout0: FIXTURE_PAYOUT[0],
                payout1: FIXTURE_PAYOUT[1],
                interface: interface as u8,
                ..MockPoolState::default()
            },
        );

        let caller_lp = create_token_account(
            &mut svm,
            &authority,
            &lp_mint,
            &caller.pubkey(),
            FIXTURE_CALLER_LP,
        );
        let pool_lp_custody = create_token_account(&mut svm, &authority, &lp_mint, &pool, 0);

        let custody = mints.map(|mint| {
            create_token_account(&mut svm, &authority, &mint, &gateway_config, 0)
        });
        let caller_tokens = mints.map(|mint| {
            create_token_account(&mut svm, &authority, &mint, &caller.pubkey(), 0)
        });
        let fee_tokens = mints.map(|mint| {
            create_token_account(&mut svm, &authority, &mint, &fee_recipient, 0)
        });
        let reserves = mints.map(|mint| {
            create_token_account(&mut svm, &authority, &mint, &pool, FIXTURE_RESERVE)
        });

        Self {
            svm,
            authority,
            fee_recipient,
            caller,
            gateway_config,
            pool_program: MOCK_POOL_PROGRAM_ID,
            pool,
            lp_mint,
            caller_lp,
            pool_lp_custody,
            mints,
            custody,
            caller_tokens,
            fee_tokens,
            reserves,
            token_programs: [SPL_TOKEN_PROGRAM_ID; 2],
        }
    }

    /// Redeem instruction over the fixture's current accounts.
    ///
    /// The two reserves are passed through to the pool.
    pub fn redeem_ix(
        &self,
        liquidity_amount: u64,
        min_amount0: u64,
        min_amount1: u64,
    ) -> Instruction {
        let mut accounts = vec![
            AccountMeta::new(self.gateway_config, false),
            AccountMeta::new_readonly(self.caller.pubkey(), true),
            AccountMeta::new_readonly(self.pool_program, false),
            AccountMeta::new(self.pool, false),
            AccountMeta::new(self.lp_mint, false),
            AccountMeta::new(self.caller_lp, false),
            AccountMeta::new(self.pool_lp_custody, false),
        ];
        for group in [&self.custody, &self.caller_tokens, &self.fee_tokens] {
            accounts.extend(group.iter().map(|account| AccountMeta::new(*account, false)));
        }
        accounts.extend(
            self.mints
                .iter()
                .map(|mint| AccountMeta::new_readonly(*mint, false)),
        );
        accounts.push(AccountMeta::new_readonly(SPL_TOKEN_PROGRAM_ID, false));
        accounts.extend(
            self.token_programs
                .iter()
                .map(|program| AccountMeta::new_readonly(*program, false)),
        );
        accounts.push(AccountMeta::new_readonly(GATEWAY_PROGRAM_ID, false));
        accounts.extend(
            self.reserves
                .iter()
                .map(|reserve| AccountMeta::new(*reserve, false)),
        );

        Instruction {
            program_id: GATEWAY_PROGRAM_ID,
            accounts,
            data: redeem_data(liquidity_amount, min_amount0, min_amount1),
        }
    }

    /// Send a Redeem signed by the caller.
    pub fn redeem(
        &mut self,
        liquidity_amount: u64,
        min_amount0: u64,
        min_amount1: u64,
    ) -> Result<(), String> {
        let ix = self.redeem_ix(liquidity_amount, min_amount0, min_amount1);
        send_instruction(&mut self.svm, ix, &[&self.caller])
    }

    /// Token balance of `account`
    pub fn balance(&self, account: &Pubkey) -> u64 {
        token_balance(&self.svm, account)
    }

    /// Balances of every token account the fixture created, for
    /// before/after comparisons.
    pub fn balances(&self) -> Vec<u64> {
        let mut accounts = vec![self.caller_lp, self.pool_lp_custody];
        accounts.extend(self.custody);
        accounts.extend(self.caller_tokens);
        accounts.extend(self.fee_tokens);
        accounts.extend(self.reserves);
        accounts.iter().map(|account| self.balance(account)).collect()
    }

    /// Create a token account of asset `side` owned by `owner`.
    pub fn create_asset_account(&mut self, side: usize, owner: &Pubkey) -> Pubkey {
        let mint = self.mints[side];
        create_token_account(&mut self.svm, &self.authority, &mint, owner, 0)
    }
}
