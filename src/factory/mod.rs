//! Vault deployment through a role-gated factory.
//!
//! [`VaultFactory`] owns the shared [`VaultConfig`](crate::config::VaultConfig)
//! and a handle to each AMM collaborator.  Each call to
//! [`deploy_swap_vault`](VaultFactory::deploy_swap_vault) hands the caller
//! a new [`SwapVault`](crate::vault::SwapVault) wired to clones of those
//! handles, and records a [`VaultDeployed`](crate::domain::VaultDeployed)
//! event.
//!
//! Vault configuration is fixed for the factory's lifetime; only the
//! version stamped on new vaults can change, and only through the `OWNER`
//! role.

mod vault_factory;

pub use vault_factory::VaultFactory;
