//! Per-account swap vault.

use tracing::{debug, info, warn};

use super::VaultState;
use crate::config::VaultConfig;
use crate::domain::{
    Address, Amount, CallContext, Position, PositionTokenId, Rounding, SwapPath, Version,
};
use crate::error::{AccessError, ConstructionError, LiquidityError, Result, SwapError, VaultError};
use crate::traits::{
    DecreaseLiquidityParams, ExactInputParams, ExactInputSingleParams, ExactOutputSingleParams,
    IncreaseLiquidityParams, LiquidityReceipt, MintParams, PositionManager, Router, TokenLedger,
};

/// A vault owned by one account, trading through a [`Router`] and
/// holding at most one liquidity position through a [`PositionManager`].
///
/// Token balances live in the [`TokenLedger`] under the vault's address.
/// Every mutating operation is atomic: the ledger, router and position
/// manager are checkpointed first and reverted, together with the
/// vault's own position, if any step fails.
///
/// # Access
///
/// | Operation | Caller |
/// |-----------|--------|
/// | swaps, [`collect_all_fees`](Self::collect_all_fees) | anyone |
/// | position changes, [`retrieve_nft`](Self::retrieve_nft), [`withdraw`](Self::withdraw) | owner |
///
/// # Swaps
///
/// Swaps pull the input from the caller (who must have approved the
/// vault), approve the router for it, and deliver the output to the
/// caller.  Exact-input swaps take the caller's expected output (quoted
/// before the call) and require at least
/// `expected × (1 − max_slippage)` back.
///
/// # Position
///
/// Minting consumes the vault's whole token0 / token1 balances; anything
/// the position manager does not take stays in the vault.  Principal
/// withdrawn by a decrease and fees collected are credited to the vault.
#[derive(Debug)]
pub struct SwapVault<T, R, P> {
    address: Address,
    owner: Address,
    version: Version,
    config: VaultConfig,
    multihop_path: SwapPath,
    ledger: T,
    router: R,
    position_manager: P,
    position: Option<Position>,
}

impl<T, R, P> SwapVault<T, R, P>
where
    T: TokenLedger,
    R: Router,
    P: PositionManager,
{
    /// Creates a vault with no position.
    ///
    /// Normally called by [`VaultFactory`](crate::factory::VaultFactory).
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidConfiguration`] if `config` does
    /// not validate or `address` / `owner` is zero.
    pub fn new(
        address: Address,
        owner: Address,
        version: Version,
        config: VaultConfig,
        ledger: T,
        router: R,
        position_manager: P,
    ) -> Result<Self> {
        if address.is_zero() || owner.is_zero() {
            return Err(ConstructionError::InvalidConfiguration(
                "vault address and owner must be non-zero",
            )
            .into());
        }
        config.validate()?;
        let multihop_path = config.multihop_path()?;
        Ok(Self {
            address,
            owner,
            version,
            config,
            multihop_path,
            ledger,
            router,
            position_manager,
            position: None,
        })
    }

    // -- queries ------------------------------------------------------------

    /// The vault's own account.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The account that deployed the vault.
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.owner
    }

    /// Version stamped at deployment.
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Trading and position parameters.
    #[must_use]
    pub const fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// Route used by [`swap_exact_input_multihop`](Self::swap_exact_input_multihop).
    #[must_use]
    pub const fn multihop_path(&self) -> &SwapPath {
        &self.multihop_path
    }

    /// The held position, if any.
    #[must_use]
    pub const fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    /// Position lifecycle state.
    #[must_use]
    pub fn state(&self) -> VaultState {
        VaultState::of(self.position.as_ref())
    }

    /// The vault's balance of `token`.
    #[must_use]
    pub fn balance_of(&self, token: Address) -> Amount {
        self.ledger.balance_of(token, self.address)
    }

    // -- swaps --------------------------------------------------------------

    /// Sells exactly `amount_in` of the input token for the base asset in
    /// one pool, returning the output delivered to the caller.
    ///
    /// `expected_amount_out` is the caller's own quote, taken before the
    /// call.  The swap fails unless it delivers at least
    /// `expected_amount_out × (1 − max_slippage)`, so a pool moved between
    /// quoting and execution cannot fill the caller at any price.
    ///
    /// # Errors
    ///
    /// - [`SwapError::ZeroAmount`] if `amount_in` or `expected_amount_out`
    ///   is zero.
    /// - [`SwapError::Token`] if the caller's balance or allowance is short.
    /// - [`SwapError::InsufficientOutputAmount`] below the slippage floor.
    /// - Any other router rejection.
    pub fn swap_exact_input_single(
        &mut self,
        ctx: CallContext,
        amount_in: Amount,
        expected_amount_out: Amount,
    ) -> Result<Amount> {
        if amount_in.is_zero() || expected_amount_out.is_zero() {
            return Err(SwapError::ZeroAmount.into());
        }
        let amount_out_minimum = self.slippage_floor(expected_amount_out)?;
        let token_in = self.config.input_token();
        let token_out = self.config.base_asset();
        let fee_tier = self.config.swap_fee_tier();
        self.atomically("swap_exact_input_single", |vault| {
            vault.pull_from(token_in, ctx.sender, amount_in)?;
            vault.approve_router(token_in, amount_in)?;
            let amount_out = vault.router.exact_input_single(ExactInputSingleParams {
                token_in,
                token_out,
                fee_tier,
                payer: vault.address,
                recipient: ctx.sender,
                deadline: ctx.timestamp,
                amount_in,
                amount_out_minimum,
            })?;
            debug!(
                vault = %vault.address,
                sender = %ctx.sender,
                %amount_in,
                %amount_out,
                minimum = %amount_out_minimum,
                "exact input single swap"
            );
            Ok(amount_out)
        })
    }

    /// Buys exactly `amount_out` of the base asset, spending at most
    /// `amount_in_maximum` of the input token, and returns the input
    /// actually spent.
    ///
    /// The maximum is pulled up front; the unspent part is refunded to
    /// the caller and the router's allowance is reset to zero.
    ///
    /// # Errors
    ///
    /// - [`SwapError::ZeroAmount`] if either amount is zero.
    /// - [`SwapError::ExcessiveInputAmount`] if the maximum is too low.
    /// - [`SwapError::Token`] if the caller cannot fund the maximum.
    pub fn swap_exact_output_single(
        &mut self,
        ctx: CallContext,
        amount_out: Amount,
        amount_in_maximum: Amount,
    ) -> Result<Amount> {
        if amount_out.is_zero() || amount_in_maximum.is_zero() {
            return Err(SwapError::ZeroAmount.into());
        }
        let token_in = self.config.input_token();
        let token_out = self.config.base_asset();
        let fee_tier = self.config.swap_fee_tier();
        self.atomically("swap_exact_output_single", |vault| {
            vault.pull_from(token_in, ctx.sender, amount_in_maximum)?;
            vault.approve_router(token_in, amount_in_maximum)?;
            let amount_in = vault.router.exact_output_single(ExactOutputSingleParams {
                token_in,
                token_out,
                fee_tier,
                payer: vault.address,
                recipient: ctx.sender,
                deadline: ctx.timestamp,
                amount_out,
                amount_in_maximum,
            })?;
            vault.approve_router(token_in, Amount::ZERO)?;
            let refund = amount_in_maximum
                .checked_sub(&amount_in)
                .ok_or(SwapError::ExcessiveInputAmount {
                    amount_in,
                    maximum: amount_in_maximum,
                })?;
            if !refund.is_zero() {
                vault
                    .ledger
                    .transfer(token_in, vault.address, ctx.sender, refund)
                    .map_err(SwapError::from)?;
            }
            debug!(
                vault = %vault.address,
                sender = %ctx.sender,
                %amount_in,
                %amount_out,
                %refund,
                "exact output single swap"
            );
            Ok(amount_in)
        })
    }

    /// Sells exactly `amount_in` along input → intermediate → base asset,
    /// returning the output delivered to the caller.
    ///
    /// # Errors
    ///
    /// Same as [`swap_exact_input_single`](Self::swap_exact_input_single),
    /// with the floor taken from `expected_amount_out` the same way, plus
    /// [`SwapError::InvalidPath`] or [`SwapError::PoolNotFound`] if the
    /// router cannot follow the route.
    pub fn swap_exact_input_multihop(
        &mut self,
        ctx: CallContext,
        amount_in: Amount,
        expected_amount_out: Amount,
    ) -> Result<Amount> {
        if amount_in.is_zero() || expected_amount_out.is_zero() {
            return Err(SwapError::ZeroAmount.into());
        }
        let amount_out_minimum = self.slippage_floor(expected_amount_out)?;
        let token_in = self.multihop_path.token_in();
        self.atomically("swap_exact_input_multihop", |vault| {
            vault.pull_from(token_in, ctx.sender, amount_in)?;
            vault.approve_router(token_in, amount_in)?;
            let amount_out = vault.router.exact_input(ExactInputParams {
                path: vault.multihop_path.encode(),
                payer: vault.address,
                recipient: ctx.sender,
                deadline: ctx.timestamp,
                amount_in,
                amount_out_minimum,
            })?;
            debug!(
                vault = %vault.address,
                sender = %ctx.sender,
                path = %vault.multihop_path,
                %amount_in,
                %amount_out,
                minimum = %amount_out_minimum,
                "multi-hop swap"
            );
            Ok(amount_out)
        })
    }

    // -- position -----------------------------------------------------------

    /// Opens the vault's position with its entire token0 / token1
    /// balances at the configured fee tier and range.
    ///
    /// # Errors
    ///
    /// - [`AccessError::NotOwner`] for any caller but the owner.
    /// - [`LiquidityError::PositionAlreadyOpen`] while a position is held.
    /// - [`LiquidityError::InsufficientBalance`] if either balance is zero.
    /// - Any position manager rejection.
    pub fn mint_new_position(&mut self, ctx: CallContext) -> Result<Position> {
        self.ensure_owner(ctx.sender)?;
        if let Some(held) = &self.position {
            return Err(LiquidityError::PositionAlreadyOpen(held.token_id()).into());
        }
        let token0 = self.config.token0();
        let token1 = self.config.token1();
        let amount0 = self.balance_of(token0);
        let amount1 = self.balance_of(token1);
        for (token, available) in [(token0, amount0), (token1, amount1)] {
            if available.is_zero() {
                return Err(LiquidityError::InsufficientBalance {
                    token,
                    available,
                    required: Amount::new(1),
                }
                .into());
            }
        }
        let fee_tier = self.config.position_fee_tier();
        let range = self.config.tick_range();
        self.atomically("mint_new_position", |vault| {
            vault.approve_position_manager(token0, amount0)?;
            vault.approve_position_manager(token1, amount1)?;
            let receipt = vault.position_manager.mint(MintParams {
                token0,
                token1,
                fee_tier,
                range,
                amount0_desired: amount0,
                amount1_desired: amount1,
                payer: vault.address,
                recipient: vault.address,
            })?;
            vault.approve_position_manager(token0, Amount::ZERO)?;
            vault.approve_position_manager(token1, Amount::ZERO)?;
            let position = Position::new(
                receipt.token_id,
                fee_tier,
                range,
                receipt.liquidity,
                receipt.amount0,
                receipt.amount1,
            );
            vault.position = Some(position);
            info!(
                vault = %vault.address,
                token_id = %receipt.token_id,
                liquidity = %receipt.liquidity,
                amount0 = %receipt.amount0,
                amount1 = %receipt.amount1,
                range = %position.range(),
                width = position.range().width(),
                "position minted"
            );
            Ok(position)
        })
    }

    /// Adds `amount0` / `amount1` from the vault's balances to the held
    /// position at its current range.
    ///
    /// # Errors
    ///
    /// - [`AccessError::NotOwner`] for any caller but the owner.
    /// - [`LiquidityError::UnknownPosition`] if `token_id` is not held.
    /// - [`LiquidityError::InsufficientBalance`] if the vault holds less
    ///   than requested.
    /// - Any position manager rejection.
    pub fn increase_liquidity_current_range(
        &mut self,
        ctx: CallContext,
        token_id: PositionTokenId,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<LiquidityReceipt> {
        self.ensure_owner(ctx.sender)?;
        let position = self.held_position(token_id)?;
        let token0 = self.config.token0();
        let token1 = self.config.token1();
        for (token, required) in [(token0, amount0), (token1, amount1)] {
            let available = self.balance_of(token);
            if available < required {
                return Err(LiquidityError::InsufficientBalance {
                    token,
                    available,
                    required,
                }
                .into());
            }
        }
        self.atomically("increase_liquidity_current_range", |vault| {
            vault.approve_position_manager(token0, amount0)?;
            vault.approve_position_manager(token1, amount1)?;
            let receipt = vault.position_manager.increase_liquidity(
                vault.address,
                IncreaseLiquidityParams {
                    token_id,
                    amount0_desired: amount0,
                    amount1_desired: amount1,
                    payer: vault.address,
                },
            )?;
            vault.approve_position_manager(token0, Amount::ZERO)?;
            vault.approve_position_manager(token1, Amount::ZERO)?;
            let updated = position
                .increased(receipt.liquidity, receipt.amount0, receipt.amount1)
                .ok_or(VaultError::Overflow("position liquidity"))?;
            vault.position = Some(updated);
            debug!(
                vault = %vault.address,
                %token_id,
                added = %receipt.liquidity,
                liquidity = %updated.liquidity(),
                "liquidity increased"
            );
            Ok(receipt)
        })
    }

    /// Removes half of the held position's current liquidity, crediting
    /// the principal to the vault.  A single remaining unit is removed
    /// whole, closing the position.
    ///
    /// # Errors
    ///
    /// - [`AccessError::NotOwner`] for any caller but the owner.
    /// - [`LiquidityError::UnknownPosition`] if `token_id` is not held.
    /// - [`LiquidityError::ZeroLiquidity`] if the position is closed.
    pub fn decrease_liquidity_in_half(
        &mut self,
        ctx: CallContext,
        token_id: PositionTokenId,
    ) -> Result<(Amount, Amount)> {
        self.ensure_owner(ctx.sender)?;
        let position = self.held_position(token_id)?;
        if position.is_closed() {
            return Err(LiquidityError::ZeroLiquidity(token_id).into());
        }
        let delta = position.liquidity().halving_delta();
        self.atomically("decrease_liquidity_in_half", |vault| {
            let (amount0, amount1) = vault.position_manager.decrease_liquidity(
                vault.address,
                DecreaseLiquidityParams {
                    token_id,
                    liquidity: delta,
                    recipient: vault.address,
                },
            )?;
            let updated = position
                .decreased(delta)
                .ok_or(LiquidityError::ZeroLiquidity(token_id))?;
            vault.position = Some(updated);
            debug!(
                vault = %vault.address,
                %token_id,
                removed = %delta,
                remaining = %updated.liquidity(),
                %amount0,
                %amount1,
                "liquidity halved"
            );
            Ok((amount0, amount1))
        })
    }

    /// Collects every fee owed to the held position into the vault.
    /// Open to any caller; owing nothing is not an error.
    ///
    /// # Errors
    ///
    /// - [`LiquidityError::UnknownPosition`] if `token_id` is not held.
    /// - Any position manager rejection.
    pub fn collect_all_fees(
        &mut self,
        ctx: CallContext,
        token_id: PositionTokenId,
    ) -> Result<(Amount, Amount)> {
        self.held_position(token_id)?;
        self.atomically("collect_all_fees", |vault| {
            let (fee0, fee1) =
                vault
                    .position_manager
                    .collect(vault.address, token_id, vault.address)?;
            debug!(
                vault = %vault.address,
                sender = %ctx.sender,
                %token_id,
                %fee0,
                %fee1,
                "fees collected"
            );
            Ok((fee0, fee1))
        })
    }

    /// Hands the position token to the owner and forgets the position.
    ///
    /// # Errors
    ///
    /// - [`AccessError::NotOwner`] for any caller but the owner.
    /// - [`LiquidityError::UnknownPosition`] if `token_id` is not held.
    pub fn retrieve_nft(&mut self, ctx: CallContext, token_id: PositionTokenId) -> Result<()> {
        self.ensure_owner(ctx.sender)?;
        self.held_position(token_id)?;
        self.atomically("retrieve_nft", |vault| {
            vault
                .position_manager
                .transfer(vault.address, token_id, vault.owner)?;
            vault.position = None;
            info!(vault = %vault.address, owner = %vault.owner, %token_id, "position token retrieved");
            Ok(())
        })
    }

    /// Sends `amount` of `token` from the vault to the owner.
    ///
    /// # Errors
    ///
    /// - [`AccessError::NotOwner`] for any caller but the owner.
    /// - [`SwapError::ZeroAmount`] if `amount` is zero.
    /// - [`TokenError::InsufficientBalance`](crate::error::TokenError::InsufficientBalance)
    ///   if the vault holds less.
    pub fn withdraw(&mut self, ctx: CallContext, token: Address, amount: Amount) -> Result<()> {
        self.ensure_owner(ctx.sender)?;
        if amount.is_zero() {
            return Err(SwapError::ZeroAmount.into());
        }
        self.atomically("withdraw", |vault| {
            vault
                .ledger
                .transfer(token, vault.address, vault.owner, amount)?;
            info!(vault = %vault.address, %token, %amount, "withdrawn to owner");
            Ok(())
        })
    }

    // -- internals ----------------------------------------------------------

    /// Runs `op`; on error, restores every collaborator and the position
    /// to their state before the call.
    fn atomically<O>(
        &mut self,
        operation: &'static str,
        op: impl FnOnce(&mut Self) -> Result<O>,
    ) -> Result<O> {
        let ledger = self.ledger.checkpoint();
        let router = self.router.checkpoint();
        let position_manager = self.position_manager.checkpoint();
        let position = self.position;
        match op(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.position_manager.revert_to(position_manager);
                self.router.revert_to(router);
                self.ledger.revert_to(ledger);
                self.position = position;
                warn!(vault = %self.address, operation, error = %err, "operation reverted");
                Err(err)
            }
        }
    }

    fn ensure_owner(&self, caller: Address) -> core::result::Result<(), AccessError> {
        if caller == self.owner {
            Ok(())
        } else {
            Err(AccessError::NotOwner {
                caller,
                owner: self.owner,
            })
        }
    }

    fn held_position(
        &self,
        token_id: PositionTokenId,
    ) -> core::result::Result<Position, LiquidityError> {
        match self.position {
            Some(position) if position.token_id() == token_id => Ok(position),
            _ => Err(LiquidityError::UnknownPosition(token_id)),
        }
    }

    /// Smallest output accepted when the caller expects `expected`.
    fn slippage_floor(&self, expected: Amount) -> Result<Amount> {
        let keep = self
            .config
            .max_slippage()
            .complement()
            .ok_or(VaultError::Overflow("slippage above 100%"))?;
        keep.apply(expected, Rounding::Down)
            .ok_or(VaultError::Overflow("slippage floor"))
    }

    fn pull_from(
        &self,
        token: Address,
        from: Address,
        amount: Amount,
    ) -> core::result::Result<(), SwapError> {
        self.ledger
            .transfer_from(token, self.address, from, self.address, amount)
            .map_err(SwapError::from)
    }

    fn approve_router(
        &self,
        token: Address,
        amount: Amount,
    ) -> core::result::Result<(), SwapError> {
        self.ledger
            .approve(token, self.address, self.router.address(), amount)
            .map_err(SwapError::from)
    }

    fn approve_position_manager(
        &self,
        token: Address,
        amount: Amount,
    ) -> core::result::Result<(), LiquidityError> {
        self.ledger
            .approve(token, self.address, self.position_manager.address(), amount)
            .map_err(LiquidityError::from)
    }
}
