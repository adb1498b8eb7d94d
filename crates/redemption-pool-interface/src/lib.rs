//! Redemption Pool Interface
//!
//! Wire conventions between the redemption gateway and the liquidity pools it
//! redeems against.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   redemption-gateway                      │
//! │  • queries pool views (pair first, split as fallback)     │
//! │  • moves LP credit into pool custody, CPIs `redeem`       │
//! │  • splits fees, guarded payouts                           │
//! └──────────────────────────────────────────────────────────┘
//!          │ view CPIs (return data)      │ redeem CPI
//!          ▼                              ▼
//! ┌─────────────────────────┐   ┌─────────────────────────┐
//! │  pair-convention pool   │   │  split-convention pool  │
//! │  `tokens` → 64 bytes    │   │  `token_0` → 32 bytes   │
//! │                         │   │  `token_1` → 32 bytes   │
//! └─────────────────────────┘   └─────────────────────────┘
//! ```
//!
//! Every instruction is addressed by an 8-byte selector,
//! `sha256("global:<name>")[..8]`. Views answer through
//! `set_return_data`; a pool that does not implement a view must leave the
//! return data empty rather than fail.
//!
//! # Modules
//!
//! - [`types`]: Selectors, views and the token pair
//! - [`cpi`]: Instruction data builders/parsers, view codecs, account layouts

#![no_std]

mod cpi;
mod types;

pub use cpi::*;
pub use types::*;
