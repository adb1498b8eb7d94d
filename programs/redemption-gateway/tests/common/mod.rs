//! Shared test helpers for redemption-gateway tests.
//!
//! `mock_chain` drives the redemption protocol in memory. The other modules
//! drive the deployed programs through litesvm transactions.

#![allow(dead_code)]

pub mod fixture;
pub mod instructions;
pub mod mock_accounts;
pub mod mock_chain;
pub mod setup;

pub use fixture::*;
pub use instructions::*;
pub use mock_accounts::*;
pub use mock_chain::*;
pub use pda::*;
pub use setup::*;
