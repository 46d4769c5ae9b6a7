//! Constant-product pool backing the simulated router.

use crate::domain::{Address, Amount, BasisPoints, FeeTier, Rounding};
use crate::error::SwapError;

/// A two-token `x · y = k` pool at one fee tier.
///
/// Reserves are bookkeeping only: the tokens themselves sit in the
/// ledger under the router's address.  `token0 < token1`.
///
/// # Pricing
///
/// The fee is taken from the input before pricing:
///
/// - exact input: `fee = ceil(in × bps / 10 000)`,
///   `out = r_out × (in − fee) / (r_in + in − fee)` rounded down.
/// - exact output: `net = ceil(r_in × out / (r_out − out))`,
///   `in = ceil(net × 10 000 / (10 000 − bps))`.
///
/// Products go through [`Amount::mul_div`] so large reserves do not
/// overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantProductPool {
    token0: Address,
    token1: Address,
    fee_tier: FeeTier,
    reserve0: Amount,
    reserve1: Amount,
}

impl ConstantProductPool {
    /// Creates a pool from two tokens in any order and their reserves.
    ///
    /// # Errors
    ///
    /// - [`SwapError::InvalidPath`] if the tokens are equal.
    /// - [`SwapError::InsufficientLiquidity`] if either reserve is zero.
    pub fn new(
        token_a: Address,
        token_b: Address,
        fee_tier: FeeTier,
        reserve_a: Amount,
        reserve_b: Amount,
    ) -> Result<Self, SwapError> {
        if token_a == token_b {
            return Err(SwapError::InvalidPath("pool tokens must differ"));
        }
        if reserve_a.is_zero() || reserve_b.is_zero() {
            return Err(SwapError::InsufficientLiquidity);
        }
        let pool = if token_a < token_b {
            Self {
                token0: token_a,
                token1: token_b,
                fee_tier,
                reserve0: reserve_a,
                reserve1: reserve_b,
            }
        } else {
            Self {
                token0: token_b,
                token1: token_a,
                fee_tier,
                reserve0: reserve_b,
                reserve1: reserve_a,
            }
        };
        Ok(pool)
    }

    /// Lower-address token.
    #[must_use]
    pub const fn token0(&self) -> Address {
        self.token0
    }

    /// Higher-address token.
    #[must_use]
    pub const fn token1(&self) -> Address {
        self.token1
    }

    /// Pool fee tier.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Reserve of `token`, or `None` if the pool does not hold it.
    #[must_use]
    pub fn reserve_of(&self, token: Address) -> Option<Amount> {
        if token == self.token0 {
            Some(self.reserve0)
        } else if token == self.token1 {
            Some(self.reserve1)
        } else {
            None
        }
    }

    /// `(reserve_in, reserve_out)` when selling `token_in`.
    fn oriented(&self, token_in: Address) -> Result<(Amount, Amount), SwapError> {
        if token_in == self.token0 {
            Ok((self.reserve0, self.reserve1))
        } else if token_in == self.token1 {
            Ok((self.reserve1, self.reserve0))
        } else {
            Err(SwapError::PoolNotFound {
                token_a: self.token0,
                token_b: self.token1,
            })
        }
    }

    /// Output for selling exactly `amount_in` of `token_in`.
    ///
    /// # Errors
    ///
    /// - [`SwapError::ZeroAmount`] if nothing is left after the fee.
    /// - [`SwapError::InsufficientLiquidity`] if the output rounds to
    ///   zero or would drain the pool.
    pub fn quote_exact_in(&self, token_in: Address, amount_in: Amount) -> Result<Amount, SwapError> {
        let (reserve_in, reserve_out) = self.oriented(token_in)?;
        let fee = self
            .fee_tier
            .apply_to_amount(amount_in, Rounding::Up)
            .ok_or(SwapError::InsufficientLiquidity)?;
        let net_input = amount_in.saturating_sub(&fee);
        if net_input.is_zero() {
            return Err(SwapError::ZeroAmount);
        }
        let denominator = reserve_in
            .checked_add(&net_input)
            .ok_or(SwapError::InsufficientLiquidity)?;
        let amount_out = reserve_out
            .mul_div(net_input, denominator, Rounding::Down)
            .ok_or(SwapError::InsufficientLiquidity)?;
        if amount_out.is_zero() || amount_out >= reserve_out {
            return Err(SwapError::InsufficientLiquidity);
        }
        Ok(amount_out)
    }

    /// Input needed to buy exactly `amount_out` by selling `token_in`.
    ///
    /// # Errors
    ///
    /// - [`SwapError::ZeroAmount`] if `amount_out` is zero.
    /// - [`SwapError::InsufficientLiquidity`] if `amount_out` reaches the
    ///   output reserve.
    pub fn quote_exact_out(
        &self,
        token_in: Address,
        amount_out: Amount,
    ) -> Result<Amount, SwapError> {
        let (reserve_in, reserve_out) = self.oriented(token_in)?;
        if amount_out.is_zero() {
            return Err(SwapError::ZeroAmount);
        }
        let remaining = reserve_out
            .checked_sub(&amount_out)
            .filter(|r| !r.is_zero())
            .ok_or(SwapError::InsufficientLiquidity)?;
        let net_input = reserve_in
            .mul_div(amount_out, remaining, Rounding::Up)
            .ok_or(SwapError::InsufficientLiquidity)?;
        let complement = self
            .fee_tier
            .basis_points()
            .complement()
            .filter(|c| *c != BasisPoints::ZERO)
            .ok_or(SwapError::InsufficientLiquidity)?;
        net_input
            .mul_div(
                Amount::new(u128::from(BasisPoints::MAX_PERCENT.get())),
                Amount::new(u128::from(complement.get())),
                Rounding::Up,
            )
            .ok_or(SwapError::InsufficientLiquidity)
    }

    /// Books a completed swap: `amount_in` of `token_in` added,
    /// `amount_out` of the other token removed.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InsufficientLiquidity`] if the output reserve
    /// cannot cover `amount_out`, or a reserve would overflow.
    pub fn settle(
        &mut self,
        token_in: Address,
        amount_in: Amount,
        amount_out: Amount,
    ) -> Result<(), SwapError> {
        let (reserve_in, reserve_out) = self.oriented(token_in)?;
        let new_in = reserve_in
            .checked_add(&amount_in)
            .ok_or(SwapError::InsufficientLiquidity)?;
        let new_out = reserve_out
            .checked_sub(&amount_out)
            .ok_or(SwapError::InsufficientLiquidity)?;
        if token_in == self.token0 {
            self.reserve0 = new_in;
            self.reserve1 = new_out;
        } else {
            self.reserve1 = new_in;
            self.reserve0 = new_out;
        }
        Ok(())
    }
}
