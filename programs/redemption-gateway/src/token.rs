//! SPL Token / Token-2022 helpers.
//!
//! Both token programs share the base account and mint layouts, so fields
//! are read from raw bytes at the offsets below and transfers are built by
//! hand against whichever program owns the mint. `pinocchio_token::state`
//! and `pinocchio_token::instructions` are not used here: their accessors
//! check ownership against the SPL Token ID and their CPIs target it, so
//! neither can serve Token-2022 accounts. `TransferChecked` is used because
//! Token-2022 rejects plain `Transfer` for mints with a transfer fee.

use pinocchio::{
    ProgramResult,
    account_info::AccountInfo,
    cpi::invoke_signed,
    instruction::{AccountMeta, Instruction, Signer},
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::errors::GatewayError;

/// SPL Token Program ID
pub const SPL_TOKEN_PROGRAM_ID: Pubkey = pinocchio_token::ID;

/// SPL Token-2022 Program ID
pub const SPL_TOKEN_2022_PROGRAM_ID: Pubkey = [
    0x06, 0xa7, 0xd5, 0x17, 0x18, 0x7b, 0xd1, 0x65, 0x35, 0x50, 0xc4, 0x9a, 0x3a, 0x8b, 0x9a, 0x28,
    0xb9, 0x51, 0x9f, 0x60, 0x7d, 0x1f, 0x55, 0xb8, 0x26, 0xb4, 0x53, 0x06, 0x76, 0x8b, 0x9f, 0x71,
];

/// SPL Token account size (base layout, without extensions)
pub const TOKEN_ACCOUNT_LEN: usize = 165;

/// SPL Token mint size (base layout, without extensions)
pub const MINT_LEN: usize = 82;

/// Token account field offsets (base layout).
pub mod token_account_offsets {
    /// Mint address, 32 bytes
    pub const MINT: usize = 0;
    /// Owner address, 32 bytes
    pub const OWNER: usize = 32;
    /// Balance, u64 LE
    pub const AMOUNT: usize = 64;
    /// Account state: 0 = uninitialized, 1 = initialized, 2 = frozen
    pub const STATE: usize = 108;
}

/// Mint field offsets (base layout).
pub mod mint_offsets {
    /// Decimals, u8
    pub const DECIMALS: usize = 44;
    /// Initialized flag, u8
    pub const IS_INITIALIZED: usize = 45;
}

/// `TransferChecked` instruction tag.
const TRANSFER_CHECKED: u8 = 12;

/// Token-2022 account-type byte that follows the base layout when extensions
/// are present.
const ACCOUNT_TYPE_OFFSET: usize = TOKEN_ACCOUNT_LEN;
const ACCOUNT_TYPE_MINT: u8 = 1;
const ACCOUNT_TYPE_ACCOUNT: u8 = 2;

/// Whether `program_id` is SPL Token or Token-2022.
#[inline]
pub fn is_token_program(program_id: &Pubkey) -> bool {
    *program_id == SPL_TOKEN_PROGRAM_ID || *program_id == SPL_TOKEN_2022_PROGRAM_ID
}

/// The fields of a token account the gateway cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenAccountFields {
    /// Mint of the held token
    pub mint: Pubkey,
    /// Wallet or PDA allowed to move the balance
    pub owner: Pubkey,
    /// Balance in base units
    pub amount: u64,
}

/// Parse an initialized token account from raw data.
pub fn parse_token_account(data: &[u8]) -> Option<TokenAccountFields> {
    if data.len() < TOKEN_ACCOUNT_LEN {
        return None;
    }
    if data.len() > TOKEN_ACCOUNT_LEN && data[ACCOUNT_TYPE_OFFSET] != ACCOUNT_TYPE_ACCOUNT {
        return None;
    }
    if data[token_account_offsets::STATE] == 0 {
        return None;
    }
    Some(TokenAccountFields {
        mint: read_address(data, token_account_offsets::MINT)?,
        owner: read_address(data, token_account_offsets::OWNER)?,
        amount: u64::from_le_bytes(
            data.get(token_account_offsets::AMOUNT..token_account_offsets::AMOUNT + 8)?
                .try_into()
                .ok()?,
        ),
    })
}

/// Parse the decimals of an initialized mint from raw data.
pub fn parse_mint_decimals(data: &[u8]) -> Option<u8> {
    if data.len() < MINT_LEN {
        return None;
    }
    if data.len() > TOKEN_ACCOUNT_LEN && data[ACCOUNT_TYPE_OFFSET] != ACCOUNT_TYPE_MINT {
        return None;
    }
    if data[mint_offsets::IS_INITIALIZED] == 0 {
        return None;
    }
    Some(data[mint_offsets::DECIMALS])
}

fn read_address(data: &[u8], offset: usize) -> Option<Pubkey> {
    data.get(offset..offset + 32)?.try_into().ok()
}

/// Read a token account owned by `token_program`.
///
/// # Errors
/// [`GatewayError::InvalidTokenAccount`] on wrong owner or layout.
pub fn load_token_account(
    account: &AccountInfo,
    token_program: &Pubkey,
) -> Result<TokenAccountFields, ProgramError> {
    if account.owner() != token_program {
        return Err(GatewayError::InvalidTokenAccount.into());
    }
    let data = account.try_borrow_data()?;
    parse_token_account(&data).ok_or_else(|| GatewayError::InvalidTokenAccount.into())
}

/// Read the decimals of a mint owned by `token_program`.
///
/// # Errors
/// [`GatewayError::InvalidMint`] on wrong owner or layout.
pub fn load_mint_decimals(mint: &AccountInfo, token_program: &Pubkey) -> Result<u8, ProgramError> {
    if mint.owner() != token_program {
        return Err(GatewayError::InvalidMint.into());
    }
    let data = mint.try_borrow_data()?;
    parse_mint_decimals(&data).ok_or_else(|| GatewayError::InvalidMint.into())
}

/// Build `TransferChecked` instruction data: `[12, amount (LE), decimals]`.
#[inline]
pub fn build_transfer_checked_data(amount: u64, decimals: u8) -> [u8; 10] {
    let mut data = [0u8; 10];
    data[0] = TRANSFER_CHECKED;
    data[1..9].copy_from_slice(&amount.to_le_bytes());
    data[9] = decimals;
    data
}

/// Accounts for a `TransferChecked` CPI.
pub struct TransferChecked<'a> {
    /// Source token account
    pub from: &'a AccountInfo,
    /// Mint of both accounts
    pub mint: &'a AccountInfo,
    /// Destination token account
    pub to: &'a AccountInfo,
    /// Owner of the source account
    pub authority: &'a AccountInfo,
    /// Program that owns the mint
    pub token_program: &'a AccountInfo,
    /// Amount in base units
    pub amount: u64,
    /// Mint decimals
    pub decimals: u8,
}

impl TransferChecked<'_> {
    /// Invoke with the authority signing at the transaction level.
    #[inline]
    pub fn invoke(&self) -> ProgramResult {
        self.invoke_signed(&[])
    }

    /// Invoke with PDA signer seeds for the authority.
    pub fn invoke_signed(&self, signers: &[Signer]) -> ProgramResult {
        let account_metas = [
            AccountMeta::writable(self.from.key()),
            AccountMeta::readonly(self.mint.key()),
            AccountMeta::writable(self.to.key()),
            AccountMeta::readonly_signer(self.authority.key()),
        ];
        let data = build_transfer_checked_data(self.amount, self.decimals);

        let instruction = Instruction {
            program_id: self.token_program.key(),
            accounts: &account_metas,
            data: &data,
        };

        invoke_signed(
            &instruction,
            &[self.from, self.mint, self.to, self.authority, self.token_program],
            signers,
        )
    }
}
