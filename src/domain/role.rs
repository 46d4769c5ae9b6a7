//! Access-control roles.

use core::fmt;

use alloy_primitives::keccak256;
use serde::{Deserialize, Serialize};

/// A role recognised by the factory's access registry.
///
/// Each role has a 32-byte identifier equal to `keccak256` of its
/// upper-case name, which is how off-chain tooling refers to it.
///
/// # Examples
///
/// ```
/// use swap_vault::domain::Role;
///
/// let id = Role::Approver.identifier();
/// assert_eq!(Role::from_identifier(&id), Some(Role::Approver));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Account that deployed the factory.
    Owner,
    /// Account allowed to approve factory-level actions.
    Approver,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Self; 2] = [Self::Owner, Self::Approver];

    /// Upper-case role name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Owner => "OWNER",
            Self::Approver => "APPROVER",
        }
    }

    /// `keccak256(name)`.
    #[must_use]
    pub fn identifier(&self) -> [u8; 32] {
        keccak256(self.name().as_bytes()).0
    }

    /// Resolves a role from its identifier.
    #[must_use]
    pub fn from_identifier(id: &[u8; 32]) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.identifier() == *id)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
