//! Role-gated factory that deploys one swap vault per request.

use alloy_primitives::keccak256;
use tracing::info;

use crate::access::AccessRegistry;
use crate::config::{FactoryConfig, VaultConfig};
use crate::domain::{Address, Role, VaultDeployed, Version};
use crate::error::{AccessError, ConstructionError, Result, VaultError};
use crate::traits::{PositionManager, Router, TokenLedger};
use crate::vault::SwapVault;

/// Deploys [`SwapVault`]s sharing one vault configuration and one set of
/// AMM collaborators.
///
/// The factory records who deployed it (`OWNER`) and who approved it
/// (`APPROVER`) in an [`AccessRegistry`].  Deployment itself is open to
/// any caller: every call produces a fresh vault at a fresh address owned
/// by the caller, and appends a [`VaultDeployed`] event to the factory's
/// log.
///
/// Vault addresses are the last 20 bytes of
/// `keccak256(factory_address ‖ nonce)`, with the nonce as a big-endian
/// `u64` that starts at zero and grows by one per deployment.
///
/// # Examples
///
/// ```
/// use swap_vault::config::{FactoryConfig, VaultConfig, VaultConfigParams};
/// use swap_vault::domain::{Address, BasisPoints, FeeTier, Role, TickRange, Version};
/// use swap_vault::factory::VaultFactory;
/// use swap_vault::sim::Sandbox;
///
/// let a = |b: u8| Address::from_bytes([b; 20]);
/// let vault = VaultConfig::full_range(VaultConfigParams {
///     input_token: a(0xDA),
///     base_asset: a(0xEE),
///     intermediate_token: a(0xCC),
///     swap_fee_tier: FeeTier::TIER_0_30_PERCENT,
///     first_hop_fee_tier: FeeTier::TIER_0_01_PERCENT,
///     second_hop_fee_tier: FeeTier::TIER_0_05_PERCENT,
///     token0: a(0xCC),
///     token1: a(0xDA),
///     position_fee_tier: FeeTier::TIER_0_01_PERCENT,
///     tick_range: TickRange::full_range(FeeTier::TIER_0_01_PERCENT).expect("range"),
///     max_slippage: BasisPoints::new(50),
/// })
/// .expect("valid vault config");
/// let config = FactoryConfig::new(a(0xFA), Version::INITIAL, vault).expect("valid");
///
/// let sandbox = Sandbox::new(a(0xA0), a(0xB0));
/// let mut factory = VaultFactory::new(
///     a(0x01),
///     a(0x02),
///     config,
///     sandbox.ledger.clone(),
///     sandbox.router.clone(),
///     sandbox.position_manager.clone(),
/// )
/// .expect("factory");
/// assert_eq!(factory.get_role(Role::Approver).expect("set"), a(0x02));
///
/// let vault = factory.deploy_swap_vault(a(0x0A)).expect("deployed");
/// assert_eq!(vault.owner(), a(0x0A));
/// assert_eq!(factory.events()[0].deployed_at, vault.address());
/// ```
#[derive(Debug)]
pub struct VaultFactory<T, R, P> {
    address: Address,
    registry: AccessRegistry,
    version: Version,
    config: VaultConfig,
    ledger: T,
    router: R,
    position_manager: P,
    nonce: u64,
    events: Vec<VaultDeployed>,
}

impl<T, R, P> VaultFactory<T, R, P>
where
    T: TokenLedger + Clone,
    R: Router + Clone,
    P: PositionManager + Clone,
{
    /// Creates a factory deployed by `deployer` and approved by `approver`.
    ///
    /// # Errors
    ///
    /// - [`ConstructionError::InvalidApprover`] if `approver` is zero.
    /// - [`ConstructionError::InvalidConfiguration`] if `config` fails
    ///   validation or `deployer` is zero.
    pub fn new(
        deployer: Address,
        approver: Address,
        config: FactoryConfig,
        ledger: T,
        router: R,
        position_manager: P,
    ) -> Result<Self> {
        if approver.is_zero() {
            return Err(ConstructionError::InvalidApprover.into());
        }
        if deployer.is_zero() {
            return Err(
                ConstructionError::InvalidConfiguration("deployer must be non-zero").into(),
            );
        }
        config.validate()?;

        let mut registry = AccessRegistry::new();
        registry.assign_role(Role::Approver, approver)?;
        registry.assign_role(Role::Owner, deployer)?;

        info!(
            factory = %config.address(),
            %deployer,
            %approver,
            version = %config.version(),
            "vault factory constructed"
        );

        Ok(Self {
            address: config.address(),
            registry,
            version: config.version(),
            config: config.vault().clone(),
            ledger,
            router,
            position_manager,
            nonce: 0,
            events: Vec::new(),
        })
    }

    /// Deploys a new vault owned by `caller`.
    ///
    /// Not idempotent: every call yields a distinct vault, and earlier
    /// vaults keep working independently.
    ///
    /// # Errors
    ///
    /// - [`VaultError::Overflow`] once the deployment nonce is exhausted.
    /// - [`ConstructionError::InvalidConfiguration`] if `caller` is zero.
    pub fn deploy_swap_vault(&mut self, caller: Address) -> Result<SwapVault<T, R, P>> {
        let next_nonce = self
            .nonce
            .checked_add(1)
            .ok_or(VaultError::Overflow("deployment nonce"))?;
        let deployed_at = self.vault_address(self.nonce);

        let vault = SwapVault::new(
            deployed_at,
            caller,
            self.version,
            self.config.clone(),
            self.ledger.clone(),
            self.router.clone(),
            self.position_manager.clone(),
        )?;

        self.nonce = next_nonce;
        let event = VaultDeployed {
            deployed_at,
            owner: caller,
            version: self.version,
        };
        self.events.push(event);
        info!(%deployed_at, owner = %caller, version = %self.version, "swap vault deployed");
        Ok(vault)
    }

    /// Stamps `version` on every vault deployed from now on.
    ///
    /// # Errors
    ///
    /// - [`AccessError::MissingRole`] unless `caller` holds `OWNER`.
    /// - [`AccessError::VersionNotIncreasing`] unless `version` is
    ///   strictly greater than the current one.
    pub fn set_version(&mut self, caller: Address, version: Version) -> Result<()> {
        self.registry.require_role(Role::Owner, caller)?;
        if version <= self.version {
            return Err(AccessError::VersionNotIncreasing.into());
        }
        info!(from = %self.version, to = %version, "factory version changed");
        self.version = version;
        Ok(())
    }

    fn vault_address(&self, nonce: u64) -> Address {
        let mut seed = [0u8; 28];
        seed[..20].copy_from_slice(&self.address.as_bytes());
        seed[20..].copy_from_slice(&nonce.to_be_bytes());
        Address::from_word(keccak256(seed).0)
    }
}

impl<T, R, P> VaultFactory<T, R, P> {
    /// The factory's own account.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Version stamped on newly deployed vaults.
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Configuration every vault is deployed with.
    #[must_use]
    pub const fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// Deployment log, oldest first.
    #[must_use]
    pub fn events(&self) -> &[VaultDeployed] {
        &self.events
    }

    /// Address holding `role`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::RoleNotSet`] if the role was never assigned.
    pub fn get_role(&self, role: Role) -> core::result::Result<Address, AccessError> {
        self.registry.get_role(role)
    }

    /// Address holding the role whose keccak identifier is `identifier`.
    ///
    /// # Errors
    ///
    /// [`AccessError::UnknownRole`] or [`AccessError::RoleNotSet`].
    pub fn get_role_by_identifier(
        &self,
        identifier: &[u8; 32],
    ) -> core::result::Result<Address, AccessError> {
        self.registry.get_role_by_identifier(identifier)
    }

    /// `true` if `address` holds `role`.
    #[must_use]
    pub fn has_role(&self, role: Role, address: Address) -> bool {
        self.registry.has_role(role, address)
    }
}
