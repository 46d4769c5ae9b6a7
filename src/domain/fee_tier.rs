//! Pool fee tiers built on [`BasisPoints`].

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, BasisPoints, Rounding};

/// Hundredths of a basis point per basis point.
const PIPS_PER_BP: u32 = 100;

/// Largest fee encodable in a path segment (`uint24`).
const MAX_PIPS: u32 = 0x00FF_FFFF;

/// A pool fee tier wrapping [`BasisPoints`] with the four standard
/// concentrated-liquidity presets.
///
/// Pools identify a tier in *pips* (hundredths of a basis point, the
/// `uint24` found in encoded swap paths), and every standard tier implies
/// a tick spacing.  Non-standard tiers are representable but have no
/// spacing, so positions cannot be opened on them.
///
/// # Examples
///
/// ```
/// use swap_vault::domain::FeeTier;
///
/// let tier = FeeTier::TIER_0_30_PERCENT;
/// assert_eq!(tier.basis_points().get(), 30);
/// assert_eq!(tier.as_pips(), 3_000);
/// assert_eq!(tier.tick_spacing(), Some(60));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// 0.01% fee (1 bp), tick spacing 1.
    pub const TIER_0_01_PERCENT: Self = Self(BasisPoints::new(1));

    /// 0.05% fee (5 bp), tick spacing 10.
    pub const TIER_0_05_PERCENT: Self = Self(BasisPoints::new(5));

    /// 0.30% fee (30 bp), tick spacing 60.
    pub const TIER_0_30_PERCENT: Self = Self(BasisPoints::new(30));

    /// 1.00% fee (100 bp), tick spacing 200.
    pub const TIER_1_00_PERCENT: Self = Self(BasisPoints::new(100));

    /// Creates a new `FeeTier` from arbitrary [`BasisPoints`].
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Builds a tier from a pip value as found in encoded paths.
    ///
    /// Returns `None` if `pips` is not a whole number of basis points or
    /// exceeds the `uint24` range.
    #[must_use]
    pub const fn from_pips(pips: u32) -> Option<Self> {
        if pips > MAX_PIPS || pips % PIPS_PER_BP != 0 {
            return None;
        }
        Some(Self(BasisPoints::new(pips / PIPS_PER_BP)))
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Returns the tier in pips (hundredths of a basis point).
    #[must_use]
    pub const fn as_pips(&self) -> u32 {
        self.0.get().saturating_mul(PIPS_PER_BP)
    }

    /// Computes the fee charged on `amount`.
    #[must_use]
    pub fn apply_to_amount(&self, amount: Amount, rounding: Rounding) -> Option<Amount> {
        self.0.apply(amount, rounding)
    }

    /// Returns the tick spacing pools of this tier use, or `None` for a
    /// non-standard tier.
    #[must_use]
    pub const fn tick_spacing(&self) -> Option<i32> {
        match self.0.get() {
            1 => Some(1),
            5 => Some(10),
            30 => Some(60),
            100 => Some(200),
            _ => None,
        }
    }

    /// Returns `true` if this tier matches one of the four standard presets.
    #[must_use]
    pub const fn is_standard(&self) -> bool {
        self.tick_spacing().is_some()
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}
