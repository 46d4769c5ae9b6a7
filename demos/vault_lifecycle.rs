//! Swap vault lifecycle walk-through.
//!
//! Deploys a vault from a factory over the in-memory AMM, runs each kind
//! of swap, then takes a liquidity position through mint, increase,
//! halving, fee collection and retrieval.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=debug cargo run --example vault_lifecycle
//! ```

use swap_vault::config::{FactoryConfig, VaultConfig, VaultConfigParams};
use swap_vault::domain::{
    Address, Amount, BasisPoints, CallContext, FeeTier, TickRange, Version,
};
use swap_vault::factory::VaultFactory;
use swap_vault::sim::Sandbox;
use swap_vault::traits::{PositionManager, Router, TokenLedger};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("=== Swap vault lifecycle ===\n");

    // ── 1. Accounts and tokens ──────────────────────────────────────────
    let dai: Address = "0x6b175474e89094c44da98b954eedeac495271d0f".parse()?;
    let weth: Address = "0xc02aaa39b223fe8d0a4e5c4f27ead9083c756cc2".parse()?;
    let usdc: Address = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".parse()?;
    let deployer = Address::from_bytes([0x01; 20]);
    let approver = Address::from_bytes([0x02; 20]);
    let alice = Address::from_bytes([0x0A; 20]);
    let bob = Address::from_bytes([0x0B; 20]);

    // ── 2. Vault blueprint ──────────────────────────────────────────────
    let (token0, token1) = if usdc < dai { (usdc, dai) } else { (dai, usdc) };
    let vault_cfg = VaultConfig::full_range(VaultConfigParams {
        input_token: dai,
        base_asset: weth,
        intermediate_token: usdc,
        swap_fee_tier: FeeTier::TIER_0_30_PERCENT,
        first_hop_fee_tier: FeeTier::TIER_0_01_PERCENT,
        second_hop_fee_tier: FeeTier::TIER_0_05_PERCENT,
        token0,
        token1,
        position_fee_tier: FeeTier::TIER_0_01_PERCENT,
        tick_range: TickRange::full_range(FeeTier::TIER_0_01_PERCENT)?,
        max_slippage: BasisPoints::new(50),
    })?;
    println!("Multi-hop path: 0x{}", hex::encode(vault_cfg.multihop_path()?.encode()));

    // ── 3. In-memory AMM ────────────────────────────────────────────────
    let sandbox = Sandbox::new(Address::from_bytes([0xA0; 20]), Address::from_bytes([0xB0; 20]));
    sandbox.seed_pools(&vault_cfg, Amount::new(1_000_000_000_000))?;

    // ── 4. Factory and vault ────────────────────────────────────────────
    let config = FactoryConfig::new(Address::from_bytes([0xFA; 20]), Version::INITIAL, vault_cfg)?;
    let mut factory = VaultFactory::new(
        deployer,
        approver,
        config,
        sandbox.ledger.clone(),
        sandbox.router.clone(),
        sandbox.position_manager.clone(),
    )?;
    let mut vault = factory.deploy_swap_vault(alice)?;
    println!("Vault {} owned by {} (v{})", vault.address(), vault.owner(), vault.version());

    // ── 5. Swaps from a user ────────────────────────────────────────────
    let now = sandbox.router.now();
    let as_bob = CallContext::new(bob, now);
    sandbox.fund(dai, bob, Amount::new(100_000))?;
    sandbox.ledger.approve(dai, bob, vault.address(), Amount::new(100_000))?;

    let quote = sandbox.router.quote_exact_input_single(
        dai,
        weth,
        vault.config().swap_fee_tier(),
        Amount::new(2_000),
    )?;
    let out = vault.swap_exact_input_single(as_bob, Amount::new(2_000), quote)?;
    println!("\nexact-in:  2000 DAI -> {out} WETH (quoted {quote})");
    let spent = vault.swap_exact_output_single(as_bob, Amount::new(1_000), Amount::new(10_000))?;
    println!("exact-out: {spent} DAI -> 1000 WETH");
    let quote = sandbox
        .router
        .quote_exact_input(vault.multihop_path(), Amount::new(5_000))?;
    let out = vault.swap_exact_input_multihop(as_bob, Amount::new(5_000), quote)?;
    println!("multi-hop: 5000 DAI -> {out} WETH");
    println!("Bob holds {} WETH", sandbox.ledger.balance_of(weth, bob));

    // ── 6. Position lifecycle ───────────────────────────────────────────
    let as_alice = CallContext::new(alice, now);
    sandbox.fund(token0, vault.address(), Amount::new(1_000_000))?;
    sandbox.fund(token1, vault.address(), Amount::new(1_000_000))?;
    let position = vault.mint_new_position(as_alice)?;
    let id = position.token_id();
    println!("\nMinted position {id} with liquidity {}", position.liquidity());

    sandbox.fund(token0, vault.address(), Amount::new(500_000))?;
    sandbox.fund(token1, vault.address(), Amount::new(500_000))?;
    let receipt =
        vault.increase_liquidity_current_range(as_alice, id, Amount::new(500_000), Amount::new(500_000))?;
    println!("Added {} liquidity", receipt.liquidity);

    let (a0, a1) = vault.decrease_liquidity_in_half(as_alice, id)?;
    println!("Halved: received {a0} / {a1}, state {}", vault.state());

    sandbox.position_manager.accrue_fees(id, Amount::new(42), Amount::new(17))?;
    let (f0, f1) = vault.collect_all_fees(as_bob, id)?;
    println!("Collected fees {f0} / {f1}");

    vault.retrieve_nft(as_alice, id)?;
    println!(
        "Position {id} now owned by {:?}, vault state {}",
        sandbox.position_manager.owner_of(id),
        vault.state()
    );

    let leftover = vault.balance_of(token0);
    if !leftover.is_zero() {
        vault.withdraw(as_alice, token0, leftover)?;
    }
    println!("Alice holds {} of token0", sandbox.ledger.balance_of(token0, alice));

    println!("\nDeployments: {}", factory.events().len());
    Ok(())
}
