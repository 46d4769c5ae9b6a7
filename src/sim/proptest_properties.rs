//! Property-based tests using `proptest` against the in-memory backends.
//!
//! 1. **Halving** reaches zero and never removes more than half plus one.
//! 2. **Exact-out sufficiency**: the quoted input buys at least the
//!    requested output.
//! 3. **Exact-out settlement**: the vault never spends more than the
//!    maximum, delivers exactly the output, and on failure moves nothing.
//! 4. **Pool invariant** `k` is non-decreasing across swaps.
//! 5. **Liquidity conservation**: minting then removing everything
//!    returns no more than was deposited.

#![allow(clippy::panic)]

use proptest::prelude::*;

use super::{ConstantProductPool, InMemoryLedger, InMemoryPositionManager, Sandbox};
use crate::config::{VaultConfig, VaultConfigParams};
use crate::domain::{
    Address, Amount, BasisPoints, CallContext, FeeTier, Liquidity, TickRange, Version,
};
use crate::traits::{DecreaseLiquidityParams, MintParams, PositionManager, TokenLedger};
use crate::vault::SwapVault;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn addr(b: u8) -> Address {
    Address::from_bytes([b; 20])
}

fn pool(ra: u128, rb: u128, bps: u32) -> ConstantProductPool {
    let Ok(p) = ConstantProductPool::new(
        addr(1),
        addr(2),
        FeeTier::new(BasisPoints::new(bps)),
        Amount::new(ra),
        Amount::new(rb),
    ) else {
        panic!("valid pool");
    };
    p
}

fn vault_config() -> VaultConfig {
    let Ok(range) = TickRange::full_range(FeeTier::TIER_0_01_PERCENT) else {
        panic!("range");
    };
    let Ok(cfg) = VaultConfig::new(VaultConfigParams {
        input_token: addr(0xDA),
        base_asset: addr(0xEE),
        intermediate_token: addr(0xCC),
        swap_fee_tier: FeeTier::TIER_0_30_PERCENT,
        first_hop_fee_tier: FeeTier::TIER_0_01_PERCENT,
        second_hop_fee_tier: FeeTier::TIER_0_05_PERCENT,
        token0: addr(0xCC),
        token1: addr(0xDA),
        position_fee_tier: FeeTier::TIER_0_01_PERCENT,
        tick_range: range,
        max_slippage: BasisPoints::new(100),
    }) else {
        panic!("valid config");
    };
    cfg
}

// ---------------------------------------------------------------------------
// 1. Halving
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn halving_reaches_zero(start in 1u128..=u128::MAX) {
        let mut liquidity = Liquidity::new(start);
        let mut steps = 0u32;
        while !liquidity.is_zero() {
            let delta = liquidity.halving_delta();
            prop_assert!(!delta.is_zero());
            prop_assert!(delta.get() <= liquidity.get() / 2 + 1);
            let Some(next) = liquidity.checked_sub(&delta) else {
                panic!("delta exceeds liquidity");
            };
            liquidity = next;
            steps += 1;
        }
        prop_assert!(steps <= 129);
    }
}

// ---------------------------------------------------------------------------
// 2. Exact-out sufficiency
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn exact_out_quote_is_sufficient(
        ra in 1_000u128..1_000_000_000_000,
        rb in 1_000u128..1_000_000_000_000,
        out_frac in 1u128..900,
        bps in prop::sample::select(vec![1u32, 5, 30, 100]),
    ) {
        let p = pool(ra, rb, bps);
        let amount_out = Amount::new((rb * out_frac / 1_000).max(1));
        let Ok(needed) = p.quote_exact_out(addr(1), amount_out) else {
            return Ok(());
        };
        if let Ok(got) = p.quote_exact_in(addr(1), needed) {
            prop_assert!(got >= amount_out);
        }
    }
}

// ---------------------------------------------------------------------------
// 3. Exact-out settlement through the vault
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn exact_out_never_overspends(
        amount_out in 1u128..50_000,
        maximum in 1u128..100_000,
    ) {
        let sandbox = Sandbox::new(addr(0xA0), addr(0xB0));
        let config = vault_config();
        let Ok(()) = sandbox.seed_pools(&config, Amount::new(10_000_000)) else {
            panic!("pools");
        };
        let Ok(mut vault) = SwapVault::new(
            addr(0xF1),
            addr(0x0A),
            Version::INITIAL,
            config,
            sandbox.ledger.clone(),
            sandbox.router.clone(),
            sandbox.position_manager.clone(),
        ) else {
            panic!("vault");
        };
        let user = addr(0x0A);
        let dai = addr(0xDA);
        let weth = addr(0xEE);
        let Ok(()) = sandbox.fund(dai, user, Amount::new(100_000)) else {
            panic!("fund");
        };
        let Ok(()) = sandbox.ledger.approve(dai, user, addr(0xF1), Amount::new(maximum)) else {
            panic!("approve");
        };
        let dai_before = sandbox.ledger.balance_of(dai, user);

        match vault.swap_exact_output_single(
            CallContext::new(user, 0),
            Amount::new(amount_out),
            Amount::new(maximum),
        ) {
            Ok(spent) => {
                prop_assert!(spent.get() <= maximum);
                prop_assert_eq!(sandbox.ledger.balance_of(weth, user), Amount::new(amount_out));
                prop_assert_eq!(
                    sandbox.ledger.balance_of(dai, user).get(),
                    dai_before.get() - spent.get()
                );
            }
            Err(_) => {
                prop_assert_eq!(sandbox.ledger.balance_of(dai, user), dai_before);
                prop_assert_eq!(sandbox.ledger.balance_of(weth, user), Amount::ZERO);
            }
        }
        prop_assert_eq!(vault.balance_of(dai), Amount::ZERO);
    }
}

// ---------------------------------------------------------------------------
// 4. Pool invariant
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn k_non_decreasing(
        ra in 1_000u128..1_000_000_000_000,
        rb in 1_000u128..1_000_000_000_000,
        swaps in prop::collection::vec((any::<bool>(), 1u128..1_000_000), 1..10),
    ) {
        let mut p = pool(ra, rb, 30);
        for (a_to_b, size) in swaps {
            let token_in = if a_to_b { addr(1) } else { addr(2) };
            let (Some(k0), Some(k1)) = (p.reserve_of(addr(1)), p.reserve_of(addr(2))) else {
                panic!("reserves");
            };
            let k_before = k0.get() * k1.get();
            let Ok(out) = p.quote_exact_in(token_in, Amount::new(size)) else {
                continue;
            };
            prop_assert!(p.settle(token_in, Amount::new(size), out).is_ok());
            let (Some(n0), Some(n1)) = (p.reserve_of(addr(1)), p.reserve_of(addr(2))) else {
                panic!("reserves");
            };
            prop_assert!(n0.get() * n1.get() >= k_before);
        }
    }
}

// ---------------------------------------------------------------------------
// 5. Liquidity conservation
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn full_withdrawal_returns_at_most_deposit(
        a0 in 1u128..1_000_000_000,
        a1 in 1u128..1_000_000_000,
    ) {
        let ledger = InMemoryLedger::new();
        let pm = InMemoryPositionManager::new(addr(0xB0), ledger.clone());
        let lp = addr(0x10);
        for (token, amount) in [(addr(1), a0), (addr(2), a1)] {
            let Ok(()) = ledger.mint(token, lp, Amount::new(amount)) else {
                panic!("mint");
            };
            let Ok(()) = ledger.approve(token, lp, addr(0xB0), Amount::new(amount)) else {
                panic!("approve");
            };
        }
        let Ok(range) = TickRange::full_range(FeeTier::TIER_0_30_PERCENT) else {
            panic!("range");
        };
        let Ok(receipt) = pm.mint(MintParams {
            token0: addr(1),
            token1: addr(2),
            fee_tier: FeeTier::TIER_0_30_PERCENT,
            range,
            amount0_desired: Amount::new(a0),
            amount1_desired: Amount::new(a1),
            payer: lp,
            recipient: lp,
        }) else {
            panic!("mint");
        };
        let Ok((out0, out1)) = pm.decrease_liquidity(
            lp,
            DecreaseLiquidityParams {
                token_id: receipt.token_id,
                liquidity: receipt.liquidity,
                recipient: lp,
            },
        ) else {
            panic!("decrease");
        };
        prop_assert!(out0.get() <= a0);
        prop_assert!(out1.get() <= a1);
        prop_assert_eq!(pm.liquidity_of(receipt.token_id), Some(Liquidity::ZERO));
    }
}
