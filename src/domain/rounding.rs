//! Rounding direction for division.

/// Rounding direction for every division on domain amounts.
///
/// Whoever holds the funds is favoured: amounts a pool or position
/// manager *receives* round up, amounts it *pays out* round down, so
/// rounding dust always stays with the holder and can never be
/// withdrawn twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Toward positive infinity (ceiling). Used for amounts owed *to* the holder.
    Up,
    /// Toward zero (floor). Used for amounts paid *by* the holder.
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}
