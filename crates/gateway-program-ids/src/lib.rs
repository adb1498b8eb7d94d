//! Program IDs for the redemption gateway deployment.
//!
//! IDs are `&'static str` constants so they can be decoded at compile time
//! (`five8_const::decode_32_const`) by the program and by client crates alike.
//!
//! # Feature Flags
//!
//! - `mainnet` - Use mainnet program IDs (default)
//! - `devnet` - Use devnet program IDs
//! - `localnet` - Use localnet program IDs (same as mainnet)

#![no_std]

/// Redemption gateway program ID (devnet).
#[cfg(feature = "devnet")]
pub const REDEMPTION_GATEWAY_ID: &str = "Borqy3dEjw9az7Uj9nW69A9ZDansFGHWEggUx7tkv44f";

/// Redemption gateway program ID (mainnet/localnet).
#[cfg(not(feature = "devnet"))]
pub const REDEMPTION_GATEWAY_ID: &str = "6anbDQNCcVh2f6okexjaX1VGj6tEnizJ1kV5UTBS8Zhi";
