//! Position lifecycle state of a vault.

use core::fmt;

use crate::domain::Position;

/// Where a vault is in its position lifecycle.
///
/// ```text
/// NoPosition ──mint──▶ PositionOpen ──decrease*──▶ PositionClosed
///      ▲                    │                            │
///      └──────retrieve──────┴──────────retrieve──────────┘
/// ```
///
/// Increases keep the position open (and reopen a closed one).  Fee
/// collection is allowed in both held states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VaultState {
    /// No position token is held.
    NoPosition,
    /// A position with non-zero liquidity is held.
    PositionOpen,
    /// The held position has no liquidity left.
    PositionClosed,
}

impl VaultState {
    /// State implied by the vault's current position.
    #[must_use]
    pub fn of(position: Option<&Position>) -> Self {
        match position {
            None => Self::NoPosition,
            Some(p) if p.is_closed() => Self::PositionClosed,
            Some(_) => Self::PositionOpen,
        }
    }

    /// Returns `true` while a position token is held.
    #[must_use]
    pub const fn holds_position(&self) -> bool {
        !matches!(self, Self::NoPosition)
    }
}

impl fmt::Display for VaultState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoPosition => "no position",
            Self::PositionOpen => "position open",
            Self::PositionClosed => "position closed",
        };
        f.write_str(name)
    }
}
