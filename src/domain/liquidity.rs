//! Liquidity units for concentrated positions.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Liquidity units held by a position.
///
/// Distinct from [`Amount`](super::Amount): liquidity measures a share of
/// a pool's depth within a price range, not a quantity of any one token.
///
/// # Examples
///
/// ```
/// use swap_vault::domain::Liquidity;
///
/// let l = Liquidity::new(1_001);
/// assert_eq!(l.halving_delta(), Liquidity::new(500));
/// assert_eq!(Liquidity::new(1).halving_delta(), Liquidity::new(1));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Liquidity(u128);

impl Liquidity {
    /// No liquidity.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Liquidity` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the liquidity is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Liquidity to remove when halving the current amount.
    ///
    /// `floor(self / 2)`, except that a single remaining unit is removed
    /// whole so repeated halving reaches zero.  Zero stays zero.
    #[must_use]
    pub const fn halving_delta(&self) -> Self {
        if self.0 == 1 {
            Self(1)
        } else {
            Self(self.0 / 2)
        }
    }
}

impl fmt::Display for Liquidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
