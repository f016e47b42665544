//! Signers and the well-known local development accounts

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

use crate::error::{AppError, AppResult};

/// Default keys of a local Hardhat/Anvil chain. Public knowledge, never use
/// them outside a development network.
pub const DEV_ACCOUNT_KEYS: [&str; 5] = [
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
    "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
    "0x5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a",
    "0x7c852118294e51e653712a81e05800f419141751be58f605c371e15141b007a6",
    "0x47e179ec197488593b187f80a00eb0da91f1b9d0b13f8733639f19c30a34926a",
];

pub fn signer_from_key(private_key: &str) -> AppResult<PrivateKeySigner> {
    private_key
        .trim()
        .parse::<PrivateKeySigner>()
        .map_err(|e| AppError::InvalidInput(format!("Invalid private key: {}", e)))
}

pub fn dev_signer(index: usize) -> AppResult<PrivateKeySigner> {
    let key = DEV_ACCOUNT_KEYS.get(index).ok_or_else(|| {
        AppError::InvalidInput(format!(
            "Development account #{} does not exist ({} available)",
            index,
            DEV_ACCOUNT_KEYS.len()
        ))
    })?;
    signer_from_key(key)
}

pub fn dev_addresses() -> AppResult<Vec<Address>> {
    (0..DEV_ACCOUNT_KEYS.len())
        .map(|i| dev_signer(i).map(|s| s.address()))
        .collect()
}

pub fn parse_address(value: &str) -> AppResult<Address> {
    value
        .trim()
        .parse::<Address>()
        .map_err(|e| AppError::InvalidInput(format!("Invalid address '{}': {}", value, e)))
}
