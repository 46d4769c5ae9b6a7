//! # Swap Vault
//!
//! Per-account swap vaults deployed by a role-gated factory, sitting in
//! front of an external concentrated-liquidity AMM.
//!
//! A vault lets its users swap a configured input token for a base asset
//! (single hop exact-in, single hop exact-out, or two hops through an
//! intermediate token), and lets its owner manage a single liquidity
//! position: mint it from the vault's balances, add to it, halve it,
//! collect its fees, and finally take the position token out.
//!
//! The AMM itself is reached through three collaborator traits
//! ([`TokenLedger`](traits::TokenLedger), [`Router`](traits::Router),
//! [`PositionManager`](traits::PositionManager)).  The `sim` feature
//! (on by default) supplies in-memory implementations of all three.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `sim` | yes | In-memory ledger, router and position manager |
//!
//! ## Deploy a vault and swap
//!
//! ```rust
//! use swap_vault::config::{FactoryConfig, VaultConfig, VaultConfigParams};
//! use swap_vault::domain::{Address, Amount, BasisPoints, CallContext, FeeTier, TickRange, Version};
//! use swap_vault::factory::VaultFactory;
//! use swap_vault::sim::Sandbox;
//! use swap_vault::traits::{Router, TokenLedger};
//!
//! let a = |b: u8| Address::from_bytes([b; 20]);
//! let (dai, weth, usdc, user) = (a(0xDA), a(0xEE), a(0xCC), a(0x0A));
//!
//! // 1. Vault blueprint: DAI -> WETH, via USDC for two hops
//! let vault_cfg = VaultConfig::full_range(VaultConfigParams {
//!     input_token: dai,
//!     base_asset: weth,
//!     intermediate_token: usdc,
//!     swap_fee_tier: FeeTier::TIER_0_30_PERCENT,
//!     first_hop_fee_tier: FeeTier::TIER_0_01_PERCENT,
//!     second_hop_fee_tier: FeeTier::TIER_0_05_PERCENT,
//!     token0: usdc,
//!     token1: dai,
//!     position_fee_tier: FeeTier::TIER_0_01_PERCENT,
//!     tick_range: TickRange::full_range(FeeTier::TIER_0_01_PERCENT).expect("range"),
//!     max_slippage: BasisPoints::new(50),
//! })
//! .expect("valid vault config");
//!
//! // 2. In-memory AMM with liquid pools
//! let sandbox = Sandbox::new(a(0xA0), a(0xB0));
//! sandbox.seed_pools(&vault_cfg, Amount::new(1_000_000_000)).expect("pools");
//!
//! // 3. Factory and vault
//! let config = FactoryConfig::new(a(0xFA), Version::INITIAL, vault_cfg).expect("valid");
//! let mut factory = VaultFactory::new(
//!     a(0x01),
//!     a(0x02),
//!     config,
//!     sandbox.ledger.clone(),
//!     sandbox.router.clone(),
//!     sandbox.position_manager.clone(),
//! )
//! .expect("factory");
//! let mut vault = factory.deploy_swap_vault(user).expect("vault");
//!
//! // 4. Quote, then swap 2 000 DAI for WETH within 0.5% of the quote
//! sandbox.fund(dai, user, Amount::new(2_000)).expect("fund");
//! sandbox.ledger.approve(dai, user, vault.address(), Amount::new(2_000)).expect("approve");
//! let expected = sandbox
//!     .router
//!     .quote_exact_input_single(dai, weth, FeeTier::TIER_0_30_PERCENT, Amount::new(2_000))
//!     .expect("quote");
//! let out = vault
//!     .swap_exact_input_single(CallContext::new(user, 0), Amount::new(2_000), expected)
//!     .expect("swap");
//! assert_eq!(sandbox.ledger.balance_of(weth, user), out);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │ VaultFactory │  roles, version, deployment log
//! └──────┬───────┘
//!        │ deploy_swap_vault(caller)
//!        ▼
//! ┌──────────────┐
//! │  SwapVault   │  swaps, position lifecycle, rollback on error
//! └──────┬───────┘
//!        │ TokenLedger + Router + PositionManager traits
//!        ▼
//! ┌──────────────┐
//! │ AMM backends │  external, or the in-memory `sim` ones
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Address`](domain::Address), [`Amount`](domain::Amount), [`SwapPath`](domain::SwapPath), etc. |
//! | [`traits`] | Collaborator abstractions and the [`Journaled`](traits::Journaled) checkpoint trait |
//! | [`config`] | Validated blueprints: [`VaultConfig`](config::VaultConfig), [`FactoryConfig`](config::FactoryConfig) |
//! | [`access`] | [`AccessRegistry`](access::AccessRegistry) role bookkeeping |
//! | [`factory`] | [`VaultFactory`](factory::VaultFactory) |
//! | [`vault`]  | [`SwapVault`](vault::SwapVault) and its [`VaultState`](vault::VaultState) |
//! | [`error`]  | [`VaultError`](error::VaultError) and its categories |
//! | `sim`      | In-memory collaborators (feature `sim`) |
//! | [`prelude`] | Convenience re-exports |

pub mod access;
pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod prelude;
pub mod traits;
pub mod vault;

#[cfg(feature = "sim")]
pub mod sim;
