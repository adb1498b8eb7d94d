//! On-chain redemption host.
//!
//! Implements the [`crate::redemption`] host traits over the accounts of one
//! `Redeem` instruction:
//!
//! ```text
//! view(v)            → CPI pool_program [selector(v)] ; read return data
//! balance_of(s, h)   → token account `h` (must be one of s's accounts) .amount
//! transfer(s, to, n) → TransferChecked custody[s] → to, signed by config PDA
//! deposit_liquidity  → TransferChecked caller_lp → pool_lp_custody, caller signs
//! redeem_liquidity   → CPI pool_program [redeem] + pass-through accounts
//! record             → config.total_redemptions += 1 ; emit RedemptionEvent
//! ```
//!
//! No account data borrow is held across a CPI.

use alloc::vec::Vec;
use pinocchio::{
    ProgramResult,
    account_info::AccountInfo,
    cpi::slice_invoke,
    instruction::{AccountMeta, Instruction, Signer},
    program::{get_return_data, invoke, set_return_data},
    program_error::ProgramError,
    pubkey::Pubkey,
};
use pinocchio_log::log;
use redemption_pool_interface::{
    PoolView, TokenPair, build_redeem_instruction_data, build_view_instruction_data,
    redeem_accounts, view_accounts,
};

use crate::{
    GatewayError,
    events::{RedemptionEvent, emit_event},
    gen_gateway_config_seeds,
    instructions::{RedeemAccounts, admin::current_slot},
    redemption::{
        AssetLedger, AssetSide, FeePolicy, PayoutRoute, PoolIntrospection, RedemptionHost,
        RedemptionOutcome, ReentrancyLock,
    },
    token::{TransferChecked, load_mint_decimals, load_token_account},
};

/// [`RedemptionHost`] backed by CPIs and token account data.
pub struct SolanaHost<'info> {
    accounts: RedeemAccounts<'info>,
    bump: u8,
    decimals: [u8; 2],
}

impl<'info> SolanaHost<'info> {
    /// Wrap validated redeem accounts.
    pub fn new(accounts: RedeemAccounts<'info>) -> Result<Self, ProgramError> {
        let bump = accounts.gateway_config.map(|config| config.bump())?;
        Ok(Self {
            accounts,
            bump,
            decimals: [0; 2],
        })
    }

    /// The token account of `side` whose address is `holder`.
    fn holder_account(
        &self,
        side: AssetSide,
        holder: &Pubkey,
    ) -> Result<&'info AccountInfo, ProgramError> {
        let i = side.index();
        [
            self.accounts.custody[i],
            self.accounts.caller_tokens[i],
            self.accounts.fee_tokens[i],
        ]
        .into_iter()
        .find(|account| account.key() == holder)
        .ok_or_else(|| GatewayError::InvalidTokenAccount.into())
    }

    /// Check one token account's mint and owner.
    fn check_token_account(
        account: &AccountInfo,
        token_program: &Pubkey,
        mint: &Pubkey,
        owner: Option<&Pubkey>,
    ) -> ProgramResult {
        let fields = load_token_account(account, token_program)?;
        if fields.mint != *mint || owner.is_some_and(|owner| fields.owner != *owner) {
            return Err(GatewayError::InvalidTokenAccount.into());
        }
        Ok(())
    }
}

impl ReentrancyLock for SolanaHost<'_> {
    fn is_busy(&self) -> Result<bool, ProgramError> {
        self.accounts
            .gateway_config
            .try_map(|config| config.is_busy())
    }

    fn set_busy(&mut self, busy: bool) -> ProgramResult {
        self.accounts
            .gateway_config
            .try_inspect_mut(|config| config.set_busy(busy))
    }
}

impl PoolIntrospection for SolanaHost<'_> {
    fn view(&mut self, view: PoolView) -> Option<Vec<u8>> {
        let RedeemAccounts {
            pool_program, pool, ..
        } = self.accounts;

        // Stale return data would carry this program's id and be ignored.
        set_return_data(&[]);

        let data = build_view_instruction_data(view);
        let account_metas: [AccountMeta; view_accounts::COUNT] =
            [AccountMeta::readonly(pool.key())];
        let instruction = Instruction {
            program_id: pool_program.key(),
            accounts: &account_metas,
            data: &data,
        };

        invoke(&instruction, &[pool, pool_program]).ok()?;

        let return_data = get_return_data()?;
        if return_data.program_id() != pool_program.key() {
            return None;
        }
        Some(return_data.as_slice().to_vec())
    }
}

impl AssetLedger for SolanaHost<'_> {
    fn balance_of(&self, side: AssetSide, holder: &Pubkey) -> Result<u64, ProgramError> {
        let account = self.holder_account(side, holder)?;
        let token_program = self.accounts.token_programs[side.index()].key();
        Ok(load_token_account(account, token_program)?.amount)
    }

    fn transfer(&mut self, side: AssetSide, to: &Pubkey, amount: u64) -> ProgramResult {
        let i = side.index();
        let to = self.holder_account(side, to)?;

        let bump_bytes = [self.bump];
        let seeds = gen_gateway_config_seeds(&bump_bytes);

        TransferChecked {
            from: self.accounts.custody[i],
            mint: self.accounts.mints[i],
            to,
            authority: self.accounts.gateway_config.account_info(),
            token_program: self.accounts.token_programs[i],
            amount,
            decimals: self.decimals[i],
        }
        .invoke_signed(&[Signer::from(&seeds)])
    }
}

impl RedemptionHost for SolanaHost<'_> {
    fn fee_policy(&self) -> Result<FeePolicy, ProgramError> {
        self.accounts
            .gateway_config
            .map(|config| config.fee_policy())
    }

    fn bind_assets(
        &mut self,
        pair: &TokenPair,
        policy: &FeePolicy,
    ) -> Result<[PayoutRoute; 2], ProgramError> {
        let accounts = &self.accounts;
        let config_key = accounts.gateway_config.key();
        let mints = [pair.token0, pair.token1];

        if accounts.custody[0].key() == accounts.custody[1].key() {
            log!("redeem: custody accounts must differ");
            return Err(GatewayError::InvalidTokenAccount.into());
        }

        let mut decimals = [0u8; 2];
        for side in AssetSide::ALL {
            let i = side.index();
            let mint = &mints[i];
            let token_program = accounts.token_programs[i].key();

            if accounts.mints[i].key() != mint {
                log!("redeem: mint account does not match pool asset {}", i);
                return Err(GatewayError::InvalidMint.into());
            }
            decimals[i] = load_mint_decimals(accounts.mints[i], token_program)?;

            Self::check_token_account(accounts.custody[i], token_program, mint, Some(config_key))
                .inspect_err(|_| log!("redeem: invalid custody account {}", i))?;
            Self::check_token_account(
                accounts.caller_tokens[i],
                token_program,
                mint,
                Some(accounts.caller.key()),
            )
            .inspect_err(|_| log!("redeem: invalid caller token account {}", i))?;
            Self::check_token_account(
                accounts.fee_tokens[i],
                token_program,
                mint,
                Some(&policy.fee_recipient),
            )
            .inspect_err(|_| log!("redeem: invalid fee token account {}", i))?;
        }
        self.decimals = decimals;

        Ok([0, 1].map(|i| PayoutRoute {
            custody: *self.accounts.custody[i].key(),
            caller: *self.accounts.caller_tokens[i].key(),
            fee_recipient: *self.accounts.fee_tokens[i].key(),
        }))
    }

    fn deposit_liquidity(&mut self, amount: u64) -> ProgramResult {
        let RedeemAccounts {
            caller,
            lp_mint,
            caller_lp,
            pool_lp_custody,
            lp_token_program,
            ..
        } = self.accounts;
        let lp_token_program_id = lp_token_program.key();

        let decimals = load_mint_decimals(lp_mint, lp_token_program_id)?;
        Self::check_token_account(caller_lp, lp_token_program_id, lp_mint.key(), Some(caller.key()))
            .inspect_err(|_| { log!("redeem: invalid caller LP account"); })?;
        Self::check_token_account(pool_lp_custody, lp_token_program_id, lp_mint.key(), None)
            .inspect_err(|_| { log!("redeem: invalid pool LP custody"); })?;

        TransferChecked {
            from: caller_lp,
            mint: lp_mint,
            to: pool_lp_custody,
            authority: caller,
            token_program: lp_token_program,
            amount,
            decimals,
        }
        .invoke()
    }

    fn redeem_liquidity(&mut self) -> ProgramResult {
        let accounts = &self.accounts;

        let mut fixed = [accounts.pool; redeem_accounts::FIXED_COUNT];
        fixed[redeem_accounts::LP_CUSTODY] = accounts.pool_lp_custody;
        fixed[redeem_accounts::LP_MINT] = accounts.lp_mint;
        fixed[redeem_accounts::DESTINATION0] = accounts.custody[0];
        fixed[redeem_accounts::DESTINATION1] = accounts.custody[1];
        fixed[redeem_accounts::LP_TOKEN_PROGRAM] = accounts.lp_token_program;

        let count = redeem_accounts::FIXED_COUNT + accounts.remaining.len();
        let mut account_metas: Vec<AccountMeta> = Vec::with_capacity(count);
        account_metas.extend(
            fixed
                .iter()
                .zip(redeem_accounts::WRITABLE)
                .map(|(account, writable)| AccountMeta::new(account.key(), writable, false)),
        );
        account_metas.extend(accounts.remaining.iter().map(|account| {
            AccountMeta::new(account.key(), account.is_writable(), account.is_signer())
        }));

        let mut infos: Vec<&AccountInfo> = Vec::with_capacity(count + 1);
        infos.extend(fixed);
        infos.extend(accounts.remaining.iter());
        infos.push(accounts.pool_program);

        let data = build_redeem_instruction_data();
        let instruction = Instruction {
            program_id: accounts.pool_program.key(),
            accounts: &account_metas,
            data: &data,
        };

        slice_invoke(&instruction, &infos)
    }

    fn record(&mut self, outcome: &RedemptionOutcome) -> ProgramResult {
        let gateway_config = &self.accounts.gateway_config;
        gateway_config.try_inspect_mut(|config| Ok(config.record_redemption()?))?;

        let bump_bytes = [self.bump];
        let seeds = gen_gateway_config_seeds(&bump_bytes);

        emit_event(
            gateway_config.account_info(),
            self.accounts.gateway_program,
            Signer::from(&seeds),
            &RedemptionEvent::from_outcome(outcome, current_slot()?),
        )
    }
}
