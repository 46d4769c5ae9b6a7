//! Discrete price point for concentrated liquidity.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LiquidityError;

/// Minimum valid tick index.
const MIN_TICK: i32 = -887_272;

/// Maximum valid tick index.
const MAX_TICK: i32 = 887_272;

/// A discrete price point: `price = 1.0001^tick`.
///
/// Valid indices range from [`MIN`](Self::MIN) (`-887272`) to
/// [`MAX`](Self::MAX) (`887272`).  Pools only accept position bounds that
/// are multiples of their fee tier's tick spacing; see
/// [`is_aligned`](Self::is_aligned) and [`min_aligned`](Self::min_aligned).
///
/// # Examples
///
/// ```
/// use swap_vault::domain::Tick;
///
/// assert_eq!(Tick::min_aligned(60).get(), -887_220);
/// assert_eq!(Tick::max_aligned(60).get(), 887_220);
/// assert!(Tick::new(900_000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Tick(i32);

impl Tick {
    /// Minimum valid tick (`-887272`).
    pub const MIN: Self = Self(MIN_TICK);

    /// Maximum valid tick (`887272`).
    pub const MAX: Self = Self(MAX_TICK);

    /// Tick where `price = 1.0`.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Tick` with range validation.
    ///
    /// # Errors
    ///
    /// Returns [`LiquidityError::InvalidTickRange`] if `value` is outside
    /// `[-887272, 887272]`.
    pub const fn new(value: i32) -> Result<Self, LiquidityError> {
        if value < MIN_TICK || value > MAX_TICK {
            return Err(LiquidityError::InvalidTickRange(
                "tick out of range [-887272, 887272]",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the underlying `i32` tick index.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Returns `true` if the tick is a multiple of `spacing`.
    ///
    /// A non-positive spacing aligns nothing.
    #[must_use]
    pub const fn is_aligned(&self, spacing: i32) -> bool {
        spacing > 0 && self.0 % spacing == 0
    }

    /// Lowest tick usable at `spacing`: `MIN` truncated toward zero to a
    /// multiple of the spacing.
    ///
    /// A non-positive spacing yields [`Tick::MIN`].
    #[must_use]
    pub const fn min_aligned(spacing: i32) -> Self {
        if spacing <= 0 {
            return Self::MIN;
        }
        Self((MIN_TICK / spacing) * spacing)
    }

    /// Highest tick usable at `spacing`.
    ///
    /// A non-positive spacing yields [`Tick::MAX`].
    #[must_use]
    pub const fn max_aligned(spacing: i32) -> Self {
        if spacing <= 0 {
            return Self::MAX;
        }
        Self((MAX_TICK / spacing) * spacing)
    }
}

impl TryFrom<i32> for Tick {
    type Error = LiquidityError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Tick> for i32 {
    fn from(tick: Tick) -> Self {
        tick.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tick({})", self.0)
    }
}
