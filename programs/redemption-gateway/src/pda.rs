//! Program Derived Address (PDA) helpers
//!
//! - `X_SEED` - The seed constant as a byte string literal
//! - `find_x_pda(...)` - Derives the PDA address and bump
//! - `gen_x_seeds(...)` - Creates signer seeds for CPIs

use pinocchio::{
    instruction::Seed,
    pubkey::{Pubkey, find_program_address},
};

/// Gateway config PDA seed.
/// Seeds: ["gateway_config"]
pub const GATEWAY_CONFIG_SEED: &[u8] = b"gateway_config";

/// Derive the gateway config PDA and bump.
#[inline]
pub fn find_gateway_config_pda() -> (Pubkey, u8) {
    find_program_address(&[GATEWAY_CONFIG_SEED], &crate::ID)
}

/// Signer seeds for the gateway config PDA.
#[inline]
pub fn gen_gateway_config_seeds(bump: &[u8; 1]) -> [Seed<'_>; 2] {
    [Seed::from(GATEWAY_CONFIG_SEED), Seed::from(bump)]
}
