//! Per-account vaults deployed by the factory.
//!
//! A [`SwapVault`] swaps the configured input token for the base asset
//! (single pool exact input, single pool exact output, or multi-hop
//! exact input) and manages one liquidity position through its
//! lifecycle, tracked as a [`VaultState`].

mod state;
mod swap_vault;

#[cfg(all(test, feature = "sim"))]
mod tests;

pub use state::VaultState;
pub use swap_vault::SwapVault;
