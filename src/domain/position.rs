//! Liquidity position held by a vault.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, FeeTier, Liquidity, Tick};
use crate::error::LiquidityError;

/// Identifier of a position token (the non-fungible token a position
/// manager issues for each position).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PositionTokenId(u64);

impl PositionTokenId {
    /// Creates a token id from its raw value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PositionTokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Price bounds of a position, `[lower, upper)`.
///
/// # Invariants
///
/// - `lower < upper`.
/// - Both bounds are valid [`Tick`]s.
///
/// Alignment to a tick spacing depends on the pool, so it is checked
/// separately by [`validate_for`](Self::validate_for).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickRange {
    lower: Tick,
    upper: Tick,
}

impl TickRange {
    /// Creates a range with validated ordering.
    ///
    /// # Errors
    ///
    /// Returns [`LiquidityError::InvalidTickRange`] if `lower >= upper`.
    pub const fn new(lower: Tick, upper: Tick) -> Result<Self, LiquidityError> {
        if lower.get() >= upper.get() {
            return Err(LiquidityError::InvalidTickRange(
                "lower tick must be less than upper tick",
            ));
        }
        Ok(Self { lower, upper })
    }

    /// The widest range a pool of `fee_tier` accepts.
    ///
    /// # Errors
    ///
    /// Returns [`LiquidityError::UnsupportedFeeTier`] for a non-standard tier.
    pub fn full_range(fee_tier: FeeTier) -> Result<Self, LiquidityError> {
        let spacing = fee_tier
            .tick_spacing()
            .ok_or(LiquidityError::UnsupportedFeeTier)?;
        Self::new(Tick::min_aligned(spacing), Tick::max_aligned(spacing))
    }

    /// Lower bound (inclusive).
    #[must_use]
    pub const fn lower(&self) -> Tick {
        self.lower
    }

    /// Upper bound (exclusive).
    #[must_use]
    pub const fn upper(&self) -> Tick {
        self.upper
    }

    /// Width in ticks.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.upper.get() - self.lower.get()
    }

    /// Returns `true` if `tick` lies in `[lower, upper)`.
    #[must_use]
    pub const fn contains(&self, tick: Tick) -> bool {
        tick.get() >= self.lower.get() && tick.get() < self.upper.get()
    }

    /// Checks that both bounds sit on the tick spacing of `fee_tier`.
    ///
    /// # Errors
    ///
    /// - [`LiquidityError::UnsupportedFeeTier`] for a non-standard tier.
    /// - [`LiquidityError::InvalidTickRange`] if a bound is misaligned.
    pub fn validate_for(&self, fee_tier: FeeTier) -> Result<(), LiquidityError> {
        let spacing = fee_tier
            .tick_spacing()
            .ok_or(LiquidityError::UnsupportedFeeTier)?;
        if !self.lower.is_aligned(spacing) || !self.upper.is_aligned(spacing) {
            return Err(LiquidityError::InvalidTickRange(
                "ticks must be multiples of the fee tier's tick spacing",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for TickRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.lower, self.upper)
    }
}

/// The single liquidity position a vault may hold.
///
/// Tracks the position token, its pool parameters, the liquidity still
/// in range, and the cumulative token amounts deposited into it.  A
/// position whose liquidity reached zero is *closed* but still exists
/// (fees may remain to collect) until its token is retrieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    token_id: PositionTokenId,
    fee_tier: FeeTier,
    range: TickRange,
    liquidity: Liquidity,
    token0_deposited: Amount,
    token1_deposited: Amount,
}

impl Position {
    /// Records a freshly minted position.
    #[must_use]
    pub const fn new(
        token_id: PositionTokenId,
        fee_tier: FeeTier,
        range: TickRange,
        liquidity: Liquidity,
        token0_deposited: Amount,
        token1_deposited: Amount,
    ) -> Self {
        Self {
            token_id,
            fee_tier,
            range,
            liquidity,
            token0_deposited,
            token1_deposited,
        }
    }

    /// Position token id.
    #[must_use]
    pub const fn token_id(&self) -> PositionTokenId {
        self.token_id
    }

    /// Pool fee tier.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Price range.
    #[must_use]
    pub const fn range(&self) -> TickRange {
        self.range
    }

    /// Liquidity currently held.
    #[must_use]
    pub const fn liquidity(&self) -> Liquidity {
        self.liquidity
    }

    /// Cumulative token0 deposited.
    pub const fn token0_deposited(&self) -> Amount {
        self.token0_deposited
    }

    /// Cumulative token1 deposited.
    pub const fn token1_deposited(&self) -> Amount {
        self.token1_deposited
    }

    /// Returns `true` once all liquidity has been removed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.liquidity.is_zero()
    }

    /// Records a deposit of `liquidity` funded by `amount0` / `amount1`.
    ///
    /// Returns `None` on overflow.
    #[must_use]
    pub fn increased(&self, liquidity: Liquidity, amount0: Amount, amount1: Amount) -> Option<Self> {
        Some(Self {
            liquidity: self.liquidity.checked_add(&liquidity)?,
            token0_deposited: self.token0_deposited.checked_add(&amount0)?,
            token1_deposited: self.token1_deposited.checked_add(&amount1)?,
            ..*self
        })
    }

    /// Records removal of `liquidity`.
    ///
    /// Returns `None` if more liquidity is removed than held.
    #[must_use]
    pub fn decreased(&self, liquidity: Liquidity) -> Option<Self> {
        Some(Self {
            liquidity: self.liquidity.checked_sub(&liquidity)?,
            ..*self
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Position({} {} {}, liquidity={})",
            self.token_id, self.fee_tier, self.range, self.liquidity
        )
    }
}
