//! Deployment record emitted by the factory.

use serde::{Deserialize, Serialize};

use super::{Address, Version};

/// Event emitted exactly once per vault deployment.
///
/// The factory keeps these in an append-only log; it is the only record
/// of which vaults exist.  Field names follow the event's wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultDeployed {
    /// Address of the new vault.
    pub deployed_at: Address,
    /// Caller that requested the deployment and owns the vault.
    pub owner: Address,
    /// Version stamped on the vault.
    pub version: Version,
}
