//! In-memory redemption host.
//!
//! Token balances are keyed by `(mint, wallet)`. Gateway custody is the
//! `CUSTODY` wallet, pool reserves and LP custody sit under `POOL`.
//! [`MockChain::redeem`] runs the redemption as one transaction: on error the
//! ledger, config and outcome log are restored to their state before the call.

use std::collections::BTreeMap;

use pinocchio::{ProgramResult, program_error::ProgramError, pubkey::Pubkey};
use redemption_gateway::{
    GatewayConfig,
    redemption::{
        self, AssetLedger, AssetSide, FeePolicy, PayoutRoute, PoolIntrospection, RedemptionHost,
        RedemptionOutcome, RedemptionRequest, ReentrancyLock,
    },
};
use redemption_pool_interface::{PoolView, TokenPair, encode_token, encode_token_pair};

pub const AUTHORITY: Pubkey = [1u8; 32];
pub const FEE_RECIPIENT: Pubkey = [2u8; 32];
pub const CALLER: Pubkey = [3u8; 32];
pub const POOL: Pubkey = [4u8; 32];
pub const CUSTODY: Pubkey = [5u8; 32];
pub const LP_MINT: Pubkey = [6u8; 32];
pub const MINT0: Pubkey = [10u8; 32];
pub const MINT1: Pubkey = [11u8; 32];

/// Starting pool reserve of each asset.
pub const POOL_RESERVE: u64 = 100_000_000;
/// Starting LP balance of the caller.
pub const CALLER_LP: u64 = 1_000;

/// How the pool answers its views.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolInterface {
    /// `tokens` only
    Pair,
    /// `token_0` / `token_1` only
    Split,
    /// Every view, pair and split
    Both,
    /// No view at all
    Neither,
    /// `tokens` with a null second mint
    PairNullMint,
    /// Split views with a null first mint
    SplitNullMint,
    /// `tokens` answering 63 bytes, split views well formed
    MisshapenPair,
}

/// Where a nested `redeem` is attempted from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reentry {
    Never,
    DuringPoolRedeem,
    DuringTransfer,
}

#[derive(Clone)]
struct State {
    config: GatewayConfig,
    balances: BTreeMap<(Pubkey, Pubkey), u64>,
    outcomes: Vec<RedemptionOutcome>,
}

pub struct MockChain {
    state: State,
    /// Pool view behaviour
    pub interface: PoolInterface,
    /// Gross amounts the pool releases per redeem
    pub payout: [u64; 2],
    /// Amount withheld from transfers of `mint` to `recipient`
    taxes: BTreeMap<(Pubkey, Pubkey), u64>,
    /// Nested redeem trigger, fires once
    pub reentry: Reentry,
    /// Results of nested redeem attempts
    pub nested: Vec<Result<RedemptionOutcome, ProgramError>>,
    /// Views queried, in order
    pub queried: Vec<PoolView>,
    bound: Option<[Pubkey; 2]>,
}

impl MockChain {
    pub fn new(interface: PoolInterface) -> Self {
        let config = GatewayConfig::new(AUTHORITY, FEE_RECIPIENT, 250, 255).unwrap();
        let mut balances = BTreeMap::new();
        balances.insert((MINT0, POOL), POOL_RESERVE);
        balances.insert((MINT1, POOL), POOL_RESERVE);
        balances.insert((LP_MINT, CALLER), CALLER_LP);

        Self {
            state: State {
                config,
                balances,
                outcomes: Vec::new(),
            },
            interface,
            payout: [1_000_000, 2_000_000],
            taxes: BTreeMap::new(),
            reentry: Reentry::Never,
            nested: Vec::new(),
            queried: Vec::new(),
            bound: None,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.state.config
    }

    pub fn config_mut(&mut self) -> &mut GatewayConfig {
        &mut self.state.config
    }

    pub fn outcomes(&self) -> &[RedemptionOutcome] {
        &self.state.outcomes
    }

    pub fn balance(&self, mint: &Pubkey, holder: &Pubkey) -> u64 {
        self.state
            .balances
            .get(&(*mint, *holder))
            .copied()
            .unwrap_or(0)
    }

    pub fn set_transfer_tax(&mut self, mint: Pubkey, recipient: Pubkey, tax: u64) {
        self.taxes.insert((mint, recipient), tax);
    }

    /// Snapshot of every non-zero balance.
    pub fn balances(&self) -> BTreeMap<(Pubkey, Pubkey), u64> {
        self.state.balances.clone()
    }

    /// Run `redeem` as a transaction.
    pub fn redeem(
        &mut self,
        request: &RedemptionRequest,
    ) -> Result<RedemptionOutcome, ProgramError> {
        let snapshot = self.state.clone();
        let result = redemption::redeem(self, request);
        if result.is_err() {
            self.state = snapshot;
        }
        result
    }

    fn move_tokens(
        &mut self,
        mint: Pubkey,
        from: Pubkey,
        to: Pubkey,
        amount: u64,
        tax: u64,
    ) -> ProgramResult {
        let held = self.balance(&mint, &from);
        if held < amount {
            return Err(ProgramError::InsufficientFunds);
        }
        self.state.balances.insert((mint, from), held - amount);
        *self.state.balances.entry((mint, to)).or_default() += amount.saturating_sub(tax);
        Ok(())
    }

    fn mint_of(&self, side: AssetSide) -> Result<Pubkey, ProgramError> {
        self.bound
            .map(|mints| mints[side.index()])
            .ok_or(ProgramError::UninitializedAccount)
    }

    fn try_reenter(&mut self, at: Reentry) {
        if self.reentry == at {
            self.reentry = Reentry::Never;
            let nested = redemption::redeem(self, &request(1, 0, 0));
            self.nested.push(nested);
        }
    }
}

/// Redemption by `CALLER` against `POOL`.
pub fn request(liquidity_amount: u64, min_amount0: u64, min_amount1: u64) -> RedemptionRequest {
    RedemptionRequest {
        caller: CALLER,
        pool: POOL,
        liquidity_amount,
        min_amount0,
        min_amount1,
    }
}

impl ReentrancyLock for MockChain {
    fn is_busy(&self) -> Result<bool, ProgramError> {
        self.state.config.is_busy()
    }

    fn set_busy(&mut self, busy: bool) -> ProgramResult {
        self.state.config.set_busy(busy)
    }
}

impl PoolIntrospection for MockChain {
    fn view(&mut self, view: PoolView) -> Option<Vec<u8>> {
        self.queried.push(view);

        let pair = |token0, token1| Some(encode_token_pair(&TokenPair { token0, token1 }).to_vec());
        let single = |token: Pubkey| Some(encode_token(&token).to_vec());

        match (self.interface, view) {
            (PoolInterface::Pair | PoolInterface::Both, PoolView::Tokens) => pair(MINT0, MINT1),
            (PoolInterface::PairNullMint, PoolView::Tokens) => pair(MINT0, [0u8; 32]),
            (PoolInterface::MisshapenPair, PoolView::Tokens) => Some(vec![7u8; 63]),
            (
                PoolInterface::Split | PoolInterface::Both | PoolInterface::MisshapenPair,
                PoolView::Token0,
            ) => single(MINT0),
            (
                PoolInterface::Split | PoolInterface::Both | PoolInterface::MisshapenPair,
                PoolView::Token1,
            ) => single(MINT1),
            (PoolInterface::SplitNullMint, PoolView::Token0) => single([0u8; 32]),
            (PoolInterface::SplitNullMint, PoolView::Token1) => single(MINT1),
            _ => None,
        }
    }
}

impl AssetLedger for MockChain {
    fn balance_of(&self, side: AssetSide, holder: &Pubkey) -> Result<u64, ProgramError> {
        Ok(self.balance(&self.mint_of(side)?, holder))
    }

    fn transfer(&mut self, side: AssetSide, to: &Pubkey, amount: u64) -> ProgramResult {
        let mint = self.mint_of(side)?;
        let tax = self.taxes.get(&(mint, *to)).copied().unwrap_or(0);
        self.move_tokens(mint, CUSTODY, *to, amount, tax)?;
        self.try_reenter(Reentry::DuringTransfer);
        Ok(())
    }
}

impl RedemptionHost for MockChain {
    fn fee_policy(&self) -> Result<FeePolicy, ProgramError> {
        Ok(self.state.config.fee_policy())
    }

    fn bind_assets(
        &mut self,
        pair: &TokenPair,
        policy: &FeePolicy,
    ) -> Result<[PayoutRoute; 2], ProgramError> {
        self.bound = Some([pair.token0, pair.token1]);
        let route = PayoutRoute {
            custody: CUSTODY,
            caller: CALLER,
            fee_recipient: policy.fee_recipient,
        };
        Ok([route; 2])
    }

    fn deposit_liquidity(&mut self, amount: u64) -> ProgramResult {
        self.move_tokens(LP_MINT, CALLER, POOL, amount, 0)
    }

    fn redeem_liquidity(&mut self) -> ProgramResult {
        self.try_reenter(Reentry::DuringPoolRedeem);

        let credit = self.balance(&LP_MINT, &POOL);
        if credit == 0 {
            return Err(ProgramError::InvalidArgument);
        }
        self.state.balances.insert((LP_MINT, POOL), 0);

        let mints = self.bound.ok_or(ProgramError::UninitializedAccount)?;
        for (mint, amount) in mints.into_iter().zip(self.payout) {
            self.move_tokens(mint, POOL, CUSTODY, amount, 0)?;
        }
        Ok(())
    }

    fn record(&mut self, outcome: &RedemptionOutcome) -> ProgramResult {
        self.state.config.record_redemption()?;
        self.state.outcomes.push(*outcome);
        Ok(())
    }
}
