//! Liquidity position manager consumed by the vault.
//!
//! The [`PositionManager`] owns the position lifecycle on the AMM side:
//! minting a position token, adding and removing liquidity, accruing and
//! paying out fees, and transferring the token.
//!
//! # Principal vs. Fees
//!
//! Principal and fees travel separately:
//!
//! - [`decrease_liquidity`](PositionManager::decrease_liquidity) pays the
//!   withdrawn principal to its recipient immediately.
//! - [`collect`](PositionManager::collect) pays only accrued fees and
//!   never touches liquidity.  Collecting twice without new fees returns
//!   `(0, 0)` the second time.
//!
//! # Authorisation
//!
//! Every mutating call except `mint` is made by `caller` and succeeds
//! only if `caller` owns the position token.

use super::Journaled;
use crate::domain::{Address, Amount, FeeTier, Liquidity, PositionTokenId, TickRange};
use crate::error::LiquidityError;

/// Request to open a new position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintParams {
    /// Lower-address token of the pair.
    pub token0: Address,
    /// Higher-address token of the pair.
    pub token1: Address,
    /// Pool fee tier.
    pub fee_tier: FeeTier,
    /// Price range.
    pub range: TickRange,
    /// Most token0 to deposit.
    pub amount0_desired: Amount,
    /// Most token1 to deposit.
    pub amount1_desired: Amount,
    /// Account the tokens are pulled from.
    pub payer: Address,
    /// Account that receives the position token.
    pub recipient: Address,
}

/// Request to add liquidity to an existing position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncreaseLiquidityParams {
    /// Position to grow.
    pub token_id: PositionTokenId,
    /// Most token0 to deposit.
    pub amount0_desired: Amount,
    /// Most token1 to deposit.
    pub amount1_desired: Amount,
    /// Account the tokens are pulled from.
    pub payer: Address,
}

/// Request to remove liquidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecreaseLiquidityParams {
    /// Position to shrink.
    pub token_id: PositionTokenId,
    /// Liquidity to remove.
    pub liquidity: Liquidity,
    /// Account that receives the withdrawn principal.
    pub recipient: Address,
}

/// Outcome of a deposit: liquidity added and the amounts actually taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidityReceipt {
    /// Position the deposit went to.
    pub token_id: PositionTokenId,
    /// Liquidity added.
    pub liquidity: Liquidity,
    /// token0 consumed.
    pub amount0: Amount,
    /// token1 consumed.
    pub amount1: Amount,
}

/// Position lifecycle operations.
pub trait PositionManager: Journaled {
    /// The manager's own account, used as the spender in approvals.
    #[must_use]
    fn address(&self) -> Address;

    /// Opens a position and issues its token to `recipient`.
    ///
    /// Deposits may consume less than desired; the excess stays with the
    /// payer.
    ///
    /// # Errors
    ///
    /// - [`LiquidityError::UnsupportedFeeTier`] / [`LiquidityError::InvalidTickRange`]
    ///   if the pool parameters are rejected.
    /// - [`LiquidityError::DepositTooSmall`] if no liquidity would be minted.
    /// - [`LiquidityError::Token`] if the payer cannot fund the deposit.
    fn mint(&self, params: MintParams) -> Result<LiquidityReceipt, LiquidityError>;

    /// Adds liquidity to an existing position at its current range.
    ///
    /// # Errors
    ///
    /// - [`LiquidityError::UnknownPosition`] for an unknown token.
    /// - [`LiquidityError::NotApproved`] if `caller` does not own it.
    /// - [`LiquidityError::DepositTooSmall`] / [`LiquidityError::Token`]
    ///   as for `mint`.
    fn increase_liquidity(
        &self,
        caller: Address,
        params: IncreaseLiquidityParams,
    ) -> Result<LiquidityReceipt, LiquidityError>;

    /// Removes liquidity and pays the principal to the recipient,
    /// returning `(amount0, amount1)`.
    ///
    /// # Errors
    ///
    /// - [`LiquidityError::UnknownPosition`] / [`LiquidityError::NotApproved`].
    /// - [`LiquidityError::ZeroLiquidity`] if more is removed than held.
    fn decrease_liquidity(
        &self,
        caller: Address,
        params: DecreaseLiquidityParams,
    ) -> Result<(Amount, Amount), LiquidityError>;

    /// Pays all accrued fees to `recipient`, returning `(fee0, fee1)`.
    ///
    /// # Errors
    ///
    /// - [`LiquidityError::UnknownPosition`] / [`LiquidityError::NotApproved`].
    fn collect(
        &self,
        caller: Address,
        token_id: PositionTokenId,
        recipient: Address,
    ) -> Result<(Amount, Amount), LiquidityError>;

    /// Current owner of a position token.
    #[must_use]
    fn owner_of(&self, token_id: PositionTokenId) -> Option<Address>;

    /// Liquidity currently held by a position.
    #[must_use]
    fn liquidity_of(&self, token_id: PositionTokenId) -> Option<Liquidity>;

    /// Transfers a position token.
    ///
    /// # Errors
    ///
    /// - [`LiquidityError::UnknownPosition`] / [`LiquidityError::NotApproved`].
    fn transfer(
        &self,
        caller: Address,
        token_id: PositionTokenId,
        to: Address,
    ) -> Result<(), LiquidityError>;
}
