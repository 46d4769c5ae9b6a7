//! Single-address-per-role registry.

use std::collections::BTreeMap;

use crate::domain::{Address, Role};
use crate::error::{AccessError, ConstructionError, VaultError};

/// Maps each [`Role`] to the one address holding it.
///
/// Roles are write-once: there is no rotation and no revocation.  An
/// unset role is reported as [`AccessError::RoleNotSet`], never as a
/// default address.
///
/// # Examples
///
/// ```
/// use swap_vault::access::AccessRegistry;
/// use swap_vault::domain::{Address, Role};
///
/// let approver = Address::from_bytes([7u8; 20]);
/// let mut registry = AccessRegistry::new();
/// registry.assign_role(Role::Approver, approver).expect("first assignment");
///
/// assert_eq!(registry.get_role(Role::Approver), Ok(approver));
/// assert!(registry.has_role(Role::Approver, approver));
/// assert!(registry.get_role(Role::Owner).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessRegistry {
    roles: BTreeMap<Role, Address>,
}

impl AccessRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `role` to `address`.
    ///
    /// # Errors
    ///
    /// - [`ConstructionError::InvalidApprover`] when assigning
    ///   [`Role::Approver`] to the zero address.
    /// - [`AccessError::RoleAlreadyAssigned`] if `role` is already held.
    pub fn assign_role(&mut self, role: Role, address: Address) -> Result<(), VaultError> {
        if role == Role::Approver && address.is_zero() {
            return Err(ConstructionError::InvalidApprover.into());
        }
        if self.roles.contains_key(&role) {
            return Err(AccessError::RoleAlreadyAssigned(role).into());
        }
        self.roles.insert(role, address);
        Ok(())
    }

    /// Address holding `role`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::RoleNotSet`] if the role was never assigned.
    pub fn get_role(&self, role: Role) -> Result<Address, AccessError> {
        self.roles
            .get(&role)
            .copied()
            .ok_or(AccessError::RoleNotSet(role))
    }

    /// Address holding the role whose `keccak256(name)` is `identifier`.
    ///
    /// # Errors
    ///
    /// - [`AccessError::UnknownRole`] if no role has that identifier.
    /// - [`AccessError::RoleNotSet`] if the role was never assigned.
    pub fn get_role_by_identifier(&self, identifier: &[u8; 32]) -> Result<Address, AccessError> {
        let role = Role::from_identifier(identifier).ok_or(AccessError::UnknownRole(*identifier))?;
        self.get_role(role)
    }

    /// Returns `true` if `address` holds `role`.
    #[must_use]
    pub fn has_role(&self, role: Role, address: Address) -> bool {
        self.roles.get(&role) == Some(&address)
    }

    /// Fails with [`AccessError::MissingRole`] unless `caller` holds `role`.
    ///
    /// # Errors
    ///
    /// See above.
    pub fn require_role(&self, role: Role, caller: Address) -> Result<(), AccessError> {
        if self.has_role(role, caller) {
            Ok(())
        } else {
            Err(AccessError::MissingRole { role, caller })
        }
    }
}
