#![allow(clippy::panic)]

use super::*;
use crate::config::{VaultConfig, VaultConfigParams};
use crate::domain::{
    Address, Amount, BasisPoints, CallContext, FeeTier, Liquidity, PositionTokenId, TickRange,
    Version,
};
use crate::error::{AccessError, LiquidityError, SwapError, TokenError, VaultError};
use crate::sim::{InMemoryLedger, InMemoryPositionManager, InMemoryRouter, Sandbox};
use crate::traits::{ExactInputSingleParams, Journaled, PositionManager, Router, TokenLedger};

const OWNER: u8 = 0x0A;
const STRANGER: u8 = 0x0B;
const VAULT: u8 = 0xF1;
const ROUTER: u8 = 0xA0;
const PM: u8 = 0xB0;
const USDC: u8 = 0xCC;
const DAI: u8 = 0xDA;
const WETH: u8 = 0xEE;

const RESERVE: u128 = 1_000_000_000_000;
const NOW: u64 = 1_000;

type SimVault = SwapVault<InMemoryLedger, InMemoryRouter, InMemoryPositionManager>;

fn addr(b: u8) -> Address {
    Address::from_bytes([b; 20])
}

fn ctx(sender: u8) -> CallContext {
    CallContext::new(addr(sender), NOW)
}

fn config() -> VaultConfig {
    let Ok(cfg) = VaultConfig::full_range(VaultConfigParams {
        input_token: addr(DAI),
        base_asset: addr(WETH),
        intermediate_token: addr(USDC),
        swap_fee_tier: FeeTier::TIER_0_30_PERCENT,
        first_hop_fee_tier: FeeTier::TIER_0_01_PERCENT,
        second_hop_fee_tier: FeeTier::TIER_0_05_PERCENT,
        token0: addr(USDC),
        token1: addr(DAI),
        position_fee_tier: FeeTier::TIER_0_01_PERCENT,
        tick_range: placeholder_range(),
        max_slippage: BasisPoints::new(50),
    }) else {
        panic!("valid config");
    };
    cfg
}

fn placeholder_range() -> TickRange {
    let Ok(range) = TickRange::full_range(FeeTier::TIER_0_01_PERCENT) else {
        panic!("range");
    };
    range
}

fn sandbox() -> Sandbox {
    let sandbox = Sandbox::new(addr(ROUTER), addr(PM));
    let Ok(()) = sandbox.seed_pools(&config(), Amount::new(RESERVE)) else {
        panic!("pools");
    };
    sandbox
}

fn fixture() -> (Sandbox, SimVault) {
    let sb = sandbox();
    let Ok(vault) = SwapVault::new(
        addr(VAULT),
        addr(OWNER),
        Version::INITIAL,
        config(),
        sb.ledger.clone(),
        sb.router.clone(),
        sb.position_manager.clone(),
    ) else {
        panic!("vault");
    };
    (sb, vault)
}

fn fund(sb: &Sandbox, token: u8, who: Address, amount: u128) {
    let Ok(()) = sb.fund(addr(token), who, Amount::new(amount)) else {
        panic!("fund");
    };
}

fn approve_vault(sb: &Sandbox, token: u8, owner: u8, amount: u128) {
    let Ok(()) = sb
        .ledger
        .approve(addr(token), addr(owner), addr(VAULT), Amount::new(amount))
    else {
        panic!("approve");
    };
}

fn balance(sb: &Sandbox, token: u8, who: u8) -> Amount {
    sb.ledger.balance_of(addr(token), addr(who))
}

/// Mints a position from `a0` USDC and `a1` DAI sent straight to the vault.
fn open_position(sb: &Sandbox, vault: &mut SimVault, a0: u128, a1: u128) -> PositionTokenId {
    fund(sb, USDC, addr(VAULT), a0);
    fund(sb, DAI, addr(VAULT), a1);
    let Ok(position) = vault.mint_new_position(ctx(OWNER)) else {
        panic!("mint");
    };
    position.token_id()
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn new_vault_has_no_position() {
    let (_, vault) = fixture();
    assert_eq!(vault.owner(), addr(OWNER));
    assert_eq!(vault.address(), addr(VAULT));
    assert_eq!(vault.version(), Version::INITIAL);
    assert_eq!(vault.state(), VaultState::NoPosition);
    assert!(vault.position().is_none());
    assert_eq!(vault.multihop_path().hop_count(), 2);
}

#[test]
fn zero_owner_rejected() {
    let sb = sandbox();
    let result = SwapVault::new(
        addr(VAULT),
        Address::zero(),
        Version::INITIAL,
        config(),
        sb.ledger.clone(),
        sb.router.clone(),
        sb.position_manager.clone(),
    );
    assert!(matches!(result, Err(VaultError::Construction(_))));
}

// ---------------------------------------------------------------------------
// Swaps
// ---------------------------------------------------------------------------

/// Caller-side quote for selling `amount_in` DAI in the single-hop pool.
fn quote_single(sb: &Sandbox, amount_in: u128) -> Amount {
    let Ok(quote) = sb.router.quote_exact_input_single(
        addr(DAI),
        addr(WETH),
        FeeTier::TIER_0_30_PERCENT,
        Amount::new(amount_in),
    ) else {
        panic!("quote");
    };
    quote
}

/// Caller-side quote for selling `amount_in` DAI along the vault's path.
fn quote_multihop(sb: &Sandbox, vault: &SimVault, amount_in: u128) -> Amount {
    let Ok(quote) = sb
        .router
        .quote_exact_input(vault.multihop_path(), Amount::new(amount_in))
    else {
        panic!("quote");
    };
    quote
}

/// Sells `amount` DAI for WETH straight through the router, moving the
/// single-hop pool's price.
fn dump_into_pool(sb: &Sandbox, seller: u8, amount: u128) {
    fund(sb, DAI, addr(seller), amount);
    let Ok(()) = sb
        .ledger
        .approve(addr(DAI), addr(seller), addr(ROUTER), Amount::new(amount))
    else {
        panic!("approve router");
    };
    let Ok(_) = sb.router.exact_input_single(ExactInputSingleParams {
        token_in: addr(DAI),
        token_out: addr(WETH),
        fee_tier: FeeTier::TIER_0_30_PERCENT,
        payer: addr(seller),
        recipient: addr(seller),
        deadline: NOW,
        amount_in: Amount::new(amount),
        amount_out_minimum: Amount::ZERO,
    }) else {
        panic!("dump");
    };
}

#[test]
fn exact_input_single_pays_sender() {
    let (sb, mut vault) = fixture();
    fund(&sb, DAI, addr(OWNER), 10_000);
    approve_vault(&sb, DAI, OWNER, 2_000);
    let expected = quote_single(&sb, 2_000);

    let Ok(out) = vault.swap_exact_input_single(ctx(OWNER), Amount::new(2_000), expected) else {
        panic!("swap");
    };

    assert_eq!(out, expected);
    assert_eq!(balance(&sb, DAI, OWNER), Amount::new(8_000));
    assert_eq!(balance(&sb, WETH, OWNER), out);
    assert_eq!(vault.balance_of(addr(DAI)), Amount::ZERO);
    assert_eq!(
        sb.ledger.allowance(addr(DAI), addr(VAULT), addr(ROUTER)),
        Amount::ZERO
    );
}

#[test]
fn anyone_may_swap() {
    let (sb, mut vault) = fixture();
    fund(&sb, DAI, addr(STRANGER), 5_000);
    approve_vault(&sb, DAI, STRANGER, 5_000);
    let expected = quote_single(&sb, 5_000);
    assert!(vault
        .swap_exact_input_single(ctx(STRANGER), Amount::new(5_000), expected)
        .is_ok());
    assert!(!balance(&sb, WETH, STRANGER).is_zero());
}

#[test]
fn zero_swap_rejected() {
    let (_, mut vault) = fixture();
    assert_eq!(
        vault.swap_exact_input_single(ctx(OWNER), Amount::ZERO, Amount::new(1)),
        Err(VaultError::Swap(SwapError::ZeroAmount))
    );
    assert_eq!(
        vault.swap_exact_input_single(ctx(OWNER), Amount::new(1), Amount::ZERO),
        Err(VaultError::Swap(SwapError::ZeroAmount))
    );
    assert_eq!(
        vault.swap_exact_input_multihop(ctx(OWNER), Amount::new(1), Amount::ZERO),
        Err(VaultError::Swap(SwapError::ZeroAmount))
    );
    assert_eq!(
        vault.swap_exact_output_single(ctx(OWNER), Amount::new(1), Amount::ZERO),
        Err(VaultError::Swap(SwapError::ZeroAmount))
    );
}

#[test]
fn swap_without_approval_rejected() {
    let (sb, mut vault) = fixture();
    fund(&sb, DAI, addr(OWNER), 10_000);
    let expected = quote_single(&sb, 2_000);
    let result = vault.swap_exact_input_single(ctx(OWNER), Amount::new(2_000), expected);
    assert!(matches!(
        result,
        Err(VaultError::Swap(SwapError::Token(
            TokenError::InsufficientAllowance { .. }
        )))
    ));
    assert_eq!(balance(&sb, DAI, OWNER), Amount::new(10_000));
}

#[test]
fn exact_output_refunds_unspent_input() {
    let (sb, mut vault) = fixture();
    fund(&sb, DAI, addr(OWNER), 10_000);
    approve_vault(&sb, DAI, OWNER, 3_000);

    let Ok(spent) =
        vault.swap_exact_output_single(ctx(OWNER), Amount::new(1_000), Amount::new(3_000))
    else {
        panic!("swap");
    };

    // net = ceil(1e12 * 1000 / (1e12 - 1000)) = 1001, in = ceil(1001 * 10000 / 9970) = 1005
    assert_eq!(spent, Amount::new(1_005));
    assert_eq!(balance(&sb, WETH, OWNER), Amount::new(1_000));
    assert_eq!(balance(&sb, DAI, OWNER), Amount::new(8_995));
    assert_eq!(vault.balance_of(addr(DAI)), Amount::ZERO);
    assert_eq!(
        sb.ledger.allowance(addr(DAI), addr(VAULT), addr(ROUTER)),
        Amount::ZERO
    );
}

#[test]
fn exact_output_over_maximum_rolls_back() {
    let (sb, mut vault) = fixture();
    fund(&sb, DAI, addr(OWNER), 10_000);
    approve_vault(&sb, DAI, OWNER, 3_000);
    let pool_before = sb.router.checkpoint();

    let result =
        vault.swap_exact_output_single(ctx(OWNER), Amount::new(1_000), Amount::new(1_000));

    assert!(matches!(
        result,
        Err(VaultError::Swap(SwapError::ExcessiveInputAmount { .. }))
    ));
    assert_eq!(balance(&sb, DAI, OWNER), Amount::new(10_000));
    assert_eq!(
        sb.ledger.allowance(addr(DAI), addr(OWNER), addr(VAULT)),
        Amount::new(3_000)
    );
    assert_eq!(sb.router.checkpoint(), pool_before);
}

#[test]
fn multihop_routes_through_intermediate() {
    let (sb, mut vault) = fixture();
    fund(&sb, DAI, addr(OWNER), 10_000);
    approve_vault(&sb, DAI, OWNER, 10_000);
    let expected = quote_multihop(&sb, &vault, 10_000);

    let Ok(out) = vault.swap_exact_input_multihop(ctx(OWNER), Amount::new(10_000), expected)
    else {
        panic!("swap");
    };

    assert_eq!(out, expected);
    assert_eq!(balance(&sb, WETH, OWNER), out);
    assert_eq!(balance(&sb, DAI, OWNER), Amount::ZERO);
    let Some(first) = sb
        .router
        .pool(addr(DAI), addr(USDC), FeeTier::TIER_0_01_PERCENT)
    else {
        panic!("pool");
    };
    assert_eq!(
        first.reserve_of(addr(DAI)),
        Some(Amount::new(RESERVE + 10_000))
    );
}

#[test]
fn multihop_without_second_hop_pool_rolls_back() {
    let sb = Sandbox::new(addr(ROUTER), addr(PM));
    for (a, b, tier) in [
        (DAI, WETH, FeeTier::TIER_0_30_PERCENT),
        (DAI, USDC, FeeTier::TIER_0_01_PERCENT),
    ] {
        let Ok(()) = sb.router.add_pool(
            addr(a),
            addr(b),
            tier,
            Amount::new(RESERVE),
            Amount::new(RESERVE),
        ) else {
            panic!("pool");
        };
    }
    let Ok(mut vault) = SwapVault::new(
        addr(VAULT),
        addr(OWNER),
        Version::INITIAL,
        config(),
        sb.ledger.clone(),
        sb.router.clone(),
        sb.position_manager.clone(),
    ) else {
        panic!("vault");
    };
    fund(&sb, DAI, addr(OWNER), 10_000);
    approve_vault(&sb, DAI, OWNER, 10_000);
    let router_before = sb.router.checkpoint();

    let result =
        vault.swap_exact_input_multihop(ctx(OWNER), Amount::new(10_000), Amount::new(9_000));

    assert!(matches!(
        result,
        Err(VaultError::Swap(SwapError::PoolNotFound { .. }))
    ));
    assert_eq!(balance(&sb, DAI, OWNER), Amount::new(10_000));
    assert_eq!(balance(&sb, WETH, OWNER), Amount::ZERO);
    assert_eq!(vault.balance_of(addr(DAI)), Amount::ZERO);
    assert_eq!(
        sb.ledger.allowance(addr(DAI), addr(OWNER), addr(VAULT)),
        Amount::new(10_000)
    );
    assert_eq!(sb.router.checkpoint(), router_before);
}

#[test]
fn expired_deadline_rolls_back() {
    let (sb, mut vault) = fixture();
    fund(&sb, DAI, addr(OWNER), 10_000);
    approve_vault(&sb, DAI, OWNER, 2_000);
    let expected = quote_single(&sb, 2_000);
    sb.router.set_time(NOW + 1);

    let result = vault.swap_exact_input_single(ctx(OWNER), Amount::new(2_000), expected);

    assert_eq!(
        result,
        Err(VaultError::Swap(SwapError::DeadlineExpired {
            deadline: NOW,
            now: NOW + 1
        }))
    );
    assert_eq!(balance(&sb, DAI, OWNER), Amount::new(10_000));
    assert_eq!(vault.balance_of(addr(DAI)), Amount::ZERO);
}

#[test]
fn price_moved_after_quote_rejected() {
    let (sb, mut vault) = fixture();
    fund(&sb, DAI, addr(OWNER), 10_000);
    approve_vault(&sb, DAI, OWNER, 10_000);
    let expected = quote_single(&sb, 2_000);
    let expected_multihop = quote_multihop(&sb, &vault, 2_000);

    dump_into_pool(&sb, STRANGER, 9 * RESERVE);
    let dumped_pool = sb
        .router
        .pool(addr(DAI), addr(WETH), FeeTier::TIER_0_30_PERCENT);

    let single = vault.swap_exact_input_single(ctx(OWNER), Amount::new(2_000), expected);
    let Err(VaultError::Swap(SwapError::InsufficientOutputAmount { amount_out, minimum })) = single
    else {
        panic!("short fill accepted");
    };
    // max_slippage is 50 bps
    assert_eq!(minimum, Amount::new(expected.get() * 9_950 / 10_000));
    assert!(amount_out < minimum);
    assert_eq!(balance(&sb, DAI, OWNER), Amount::new(10_000));
    assert_eq!(balance(&sb, WETH, OWNER), Amount::ZERO);
    assert_eq!(
        sb.router
            .pool(addr(DAI), addr(WETH), FeeTier::TIER_0_30_PERCENT),
        dumped_pool
    );

    // The multi-hop route avoids the dumped pool, so its expectation
    // still fills.
    assert!(vault
        .swap_exact_input_multihop(ctx(OWNER), Amount::new(2_000), expected_multihop)
        .is_ok());
    assert_eq!(balance(&sb, DAI, OWNER), Amount::new(8_000));
}

#[test]
fn slippage_floor_tolerates_small_moves() {
    let (sb, mut vault) = fixture();
    fund(&sb, DAI, addr(OWNER), 10_000);
    approve_vault(&sb, DAI, OWNER, 10_000);
    let expected = quote_single(&sb, 2_000);

    // Moves the price by well under 50 bps.
    dump_into_pool(&sb, STRANGER, RESERVE / 1_000);

    let Ok(out) = vault.swap_exact_input_single(ctx(OWNER), Amount::new(2_000), expected) else {
        panic!("small move rejected");
    };
    assert!(out < expected);
    assert!(out.get() >= expected.get() * 9_950 / 10_000);
}

// ---------------------------------------------------------------------------
// Position lifecycle
// ---------------------------------------------------------------------------

#[test]
fn mint_consumes_vault_balances() {
    let (sb, mut vault) = fixture();
    fund(&sb, USDC, addr(VAULT), 1_000_000);
    fund(&sb, DAI, addr(VAULT), 4_000_000);

    let Ok(position) = vault.mint_new_position(ctx(OWNER)) else {
        panic!("mint");
    };

    assert_eq!(position.liquidity(), Liquidity::new(2_000_000));
    assert!(position.token0_deposited() <= Amount::new(1_000_000));
    assert!(position.token1_deposited() <= Amount::new(4_000_000));
    assert_eq!(vault.state(), VaultState::PositionOpen);
    assert_eq!(vault.position(), Some(&position));
    assert_eq!(
        sb.position_manager.owner_of(position.token_id()),
        Some(addr(VAULT))
    );
    assert_eq!(
        sb.ledger.allowance(addr(USDC), addr(VAULT), addr(PM)),
        Amount::ZERO
    );
}

#[test]
fn mint_by_stranger_rejected() {
    let (sb, mut vault) = fixture();
    fund(&sb, USDC, addr(VAULT), 1_000);
    fund(&sb, DAI, addr(VAULT), 1_000);
    assert_eq!(
        vault.mint_new_position(ctx(STRANGER)),
        Err(VaultError::Access(AccessError::NotOwner {
            caller: addr(STRANGER),
            owner: addr(OWNER)
        }))
    );
}

#[test]
fn mint_without_funds_rejected() {
    let (sb, mut vault) = fixture();
    fund(&sb, USDC, addr(VAULT), 1_000);
    let result = vault.mint_new_position(ctx(OWNER));
    assert_eq!(
        result,
        Err(VaultError::Liquidity(LiquidityError::InsufficientBalance {
            token: addr(DAI),
            available: Amount::ZERO,
            required: Amount::new(1),
        }))
    );
    assert_eq!(vault.state(), VaultState::NoPosition);
}

#[test]
fn second_mint_rejected() {
    let (sb, mut vault) = fixture();
    let id = open_position(&sb, &mut vault, 1_000, 1_000);
    fund(&sb, USDC, addr(VAULT), 1_000);
    fund(&sb, DAI, addr(VAULT), 1_000);
    assert_eq!(
        vault.mint_new_position(ctx(OWNER)),
        Err(VaultError::Liquidity(LiquidityError::PositionAlreadyOpen(id)))
    );
}

#[test]
fn increase_adds_liquidity() {
    let (sb, mut vault) = fixture();
    let id = open_position(&sb, &mut vault, 1_000_000, 1_000_000);
    fund(&sb, USDC, addr(VAULT), 500_000);
    fund(&sb, DAI, addr(VAULT), 800_000);

    let Ok(receipt) = vault.increase_liquidity_current_range(
        ctx(OWNER),
        id,
        Amount::new(500_000),
        Amount::new(800_000),
    ) else {
        panic!("increase");
    };

    assert_eq!(receipt.liquidity, Liquidity::new(500_000));
    let Some(position) = vault.position() else {
        panic!("position");
    };
    assert_eq!(position.liquidity(), Liquidity::new(1_500_000));
    assert_eq!(vault.balance_of(addr(DAI)), Amount::new(300_000));
}

#[test]
fn increase_unknown_position_rejected() {
    let (sb, mut vault) = fixture();
    open_position(&sb, &mut vault, 1_000, 1_000);
    let wrong = PositionTokenId::new(99);
    assert_eq!(
        vault.increase_liquidity_current_range(ctx(OWNER), wrong, Amount::new(1), Amount::new(1)),
        Err(VaultError::Liquidity(LiquidityError::UnknownPosition(wrong)))
    );
}

#[test]
fn increase_beyond_balance_rejected() {
    let (sb, mut vault) = fixture();
    let id = open_position(&sb, &mut vault, 1_000, 1_000);
    let result =
        vault.increase_liquidity_current_range(ctx(OWNER), id, Amount::new(10), Amount::new(10));
    assert!(matches!(
        result,
        Err(VaultError::Liquidity(LiquidityError::InsufficientBalance { .. }))
    ));
}

#[test]
fn failed_increase_rolls_back_approvals() {
    let (sb, mut vault) = fixture();
    // liquidity 2000 backed by 1_000_000 USDC and 4 DAI
    let id = open_position(&sb, &mut vault, 1_000_000, 4);
    fund(&sb, USDC, addr(VAULT), 10);
    let before = *vault.position().unwrap_or_else(|| panic!("position"));

    let result =
        vault.increase_liquidity_current_range(ctx(OWNER), id, Amount::new(10), Amount::ZERO);

    assert_eq!(
        result,
        Err(VaultError::Liquidity(LiquidityError::DepositTooSmall))
    );
    assert_eq!(
        sb.ledger.allowance(addr(USDC), addr(VAULT), addr(PM)),
        Amount::ZERO
    );
    assert_eq!(vault.balance_of(addr(USDC)), Amount::new(10));
    assert_eq!(vault.position(), Some(&before));
}

#[test]
fn halving_twice_removes_half_of_remaining() {
    let (sb, mut vault) = fixture();
    let id = open_position(&sb, &mut vault, 1_000_000, 1_000_000);

    let Ok(first) = vault.decrease_liquidity_in_half(ctx(OWNER), id) else {
        panic!("first halving");
    };
    assert_eq!(first, (Amount::new(500_000), Amount::new(500_000)));
    assert_eq!(
        vault.position().map(|p| p.liquidity()),
        Some(Liquidity::new(500_000))
    );

    let Ok(second) = vault.decrease_liquidity_in_half(ctx(OWNER), id) else {
        panic!("second halving");
    };
    assert_eq!(second, (Amount::new(250_000), Amount::new(250_000)));
    assert_eq!(
        vault.position().map(|p| p.liquidity()),
        Some(Liquidity::new(250_000))
    );
    assert_eq!(vault.balance_of(addr(USDC)), Amount::new(750_000));
    assert_eq!(
        sb.position_manager.liquidity_of(id),
        Some(Liquidity::new(250_000))
    );
}

#[test]
fn halving_last_unit_closes_position() {
    let (sb, mut vault) = fixture();
    let id = open_position(&sb, &mut vault, 1, 1);
    assert!(vault.decrease_liquidity_in_half(ctx(OWNER), id).is_ok());
    assert_eq!(vault.state(), VaultState::PositionClosed);
    assert_eq!(
        vault.decrease_liquidity_in_half(ctx(OWNER), id),
        Err(VaultError::Liquidity(LiquidityError::ZeroLiquidity(id)))
    );
}

#[test]
fn halving_by_stranger_rejected() {
    let (sb, mut vault) = fixture();
    let id = open_position(&sb, &mut vault, 1_000, 1_000);
    let result = vault.decrease_liquidity_in_half(ctx(STRANGER), id);
    assert!(result.is_err_and(|e| e.is_access()));
}

#[test]
fn halving_unknown_position_rejected() {
    let (sb, mut vault) = fixture();
    let id = open_position(&sb, &mut vault, 1_000, 1_000);
    let wrong = PositionTokenId::new(id.get() + 1);
    let before = vault.position().copied();

    assert_eq!(
        vault.decrease_liquidity_in_half(ctx(OWNER), wrong),
        Err(VaultError::Liquidity(LiquidityError::UnknownPosition(wrong)))
    );
    assert_eq!(vault.position().copied(), before);
    assert_eq!(sb.position_manager.liquidity_of(id), Some(Liquidity::new(1_000)));
    assert_eq!(vault.balance_of(addr(USDC)), Amount::ZERO);
}

#[test]
fn collect_unknown_position_rejected() {
    let (sb, mut vault) = fixture();
    let id = open_position(&sb, &mut vault, 1_000, 1_000);
    let Ok(()) = sb
        .position_manager
        .accrue_fees(id, Amount::new(5), Amount::new(6))
    else {
        panic!("accrue");
    };
    let wrong = PositionTokenId::new(id.get() + 1);

    assert_eq!(
        vault.collect_all_fees(ctx(STRANGER), wrong),
        Err(VaultError::Liquidity(LiquidityError::UnknownPosition(wrong)))
    );
    assert_eq!(vault.balance_of(addr(USDC)), Amount::ZERO);
    assert_eq!(
        vault.collect_all_fees(ctx(STRANGER), id),
        Ok((Amount::new(5), Amount::new(6)))
    );
}

#[test]
fn halving_and_collect_without_position_rejected() {
    let (_, mut vault) = fixture();
    let id = PositionTokenId::new(1);
    assert_eq!(
        vault.decrease_liquidity_in_half(ctx(OWNER), id),
        Err(VaultError::Liquidity(LiquidityError::UnknownPosition(id)))
    );
    assert_eq!(
        vault.collect_all_fees(ctx(OWNER), id),
        Err(VaultError::Liquidity(LiquidityError::UnknownPosition(id)))
    );
    assert_eq!(vault.state(), VaultState::NoPosition);
}

#[test]
fn collect_credits_vault_once() {
    let (sb, mut vault) = fixture();
    let id = open_position(&sb, &mut vault, 1_000, 1_000);
    let Ok(()) = sb
        .position_manager
        .accrue_fees(id, Amount::new(12), Amount::new(34))
    else {
        panic!("accrue");
    };

    assert_eq!(
        vault.collect_all_fees(ctx(STRANGER), id),
        Ok((Amount::new(12), Amount::new(34)))
    );
    assert_eq!(vault.balance_of(addr(USDC)), Amount::new(12));
    assert_eq!(vault.balance_of(addr(DAI)), Amount::new(34));
    assert_eq!(
        vault.collect_all_fees(ctx(OWNER), id),
        Ok((Amount::ZERO, Amount::ZERO))
    );
    assert_eq!(
        vault.position().map(|p| p.liquidity()),
        Some(Liquidity::new(1_000))
    );
}

#[test]
fn collect_on_closed_position_allowed() {
    let (sb, mut vault) = fixture();
    let id = open_position(&sb, &mut vault, 1, 1);
    assert!(vault.decrease_liquidity_in_half(ctx(OWNER), id).is_ok());
    assert!(vault.collect_all_fees(ctx(OWNER), id).is_ok());
}

#[test]
fn retrieve_hands_token_to_owner() {
    let (sb, mut vault) = fixture();
    let id = open_position(&sb, &mut vault, 1_000, 1_000);

    assert!(vault
        .retrieve_nft(ctx(STRANGER), id)
        .is_err_and(|e| e.is_access()));
    assert!(vault.retrieve_nft(ctx(OWNER), id).is_ok());

    assert_eq!(sb.position_manager.owner_of(id), Some(addr(OWNER)));
    assert_eq!(vault.state(), VaultState::NoPosition);
    assert_eq!(
        vault.retrieve_nft(ctx(OWNER), id),
        Err(VaultError::Liquidity(LiquidityError::UnknownPosition(id)))
    );
}

#[test]
fn mint_again_after_retrieve() {
    let (sb, mut vault) = fixture();
    let first = open_position(&sb, &mut vault, 1_000, 1_000);
    assert!(vault.retrieve_nft(ctx(OWNER), first).is_ok());
    let second = open_position(&sb, &mut vault, 1_000, 1_000);
    assert_ne!(first, second);
    assert_eq!(vault.state(), VaultState::PositionOpen);
}

#[test]
fn withdraw_sends_to_owner() {
    let (sb, mut vault) = fixture();
    fund(&sb, WETH, addr(VAULT), 700);

    assert!(vault
        .withdraw(ctx(STRANGER), addr(WETH), Amount::new(1))
        .is_err_and(|e| e.is_access()));
    assert_eq!(
        vault.withdraw(ctx(OWNER), addr(WETH), Amount::ZERO),
        Err(VaultError::Swap(SwapError::ZeroAmount))
    );
    assert!(matches!(
        vault.withdraw(ctx(OWNER), addr(WETH), Amount::new(701)),
        Err(VaultError::Token(TokenError::InsufficientBalance { .. }))
    ));
    assert!(vault
        .withdraw(ctx(OWNER), addr(WETH), Amount::new(700))
        .is_ok());
    assert_eq!(balance(&sb, WETH, OWNER), Amount::new(700));
}
