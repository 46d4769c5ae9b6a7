//! Factory construction parameters.

use serde::{Deserialize, Serialize};

use super::VaultConfig;
use crate::domain::{Address, Version};
use crate::error::ConstructionError;

/// Parameters a [`VaultFactory`](crate::factory::VaultFactory) is built from.
///
/// - `address`: the factory's own account, the seed for vault addresses.
/// - `version`: stamped on every vault until changed.
/// - `vault`: shared by every vault the factory deploys.
///
/// # TOML
///
/// ```
/// use swap_vault::config::FactoryConfig;
///
/// let toml = r#"
///     address = "0x00000000000000000000000000000000000000fa"
///     version = "1.0.0"
///
///     [vault]
///     input_token = "0x6b175474e89094c44da98b954eedeac495271d0f"
///     base_asset = "0xc02aaa39b223fe8d0a4e5c4f27ead9083c756cc2"
///     intermediate_token = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"
///     swap_fee_tier = 30
///     first_hop_fee_tier = 1
///     second_hop_fee_tier = 5
///     token0 = "0x6b175474e89094c44da98b954eedeac495271d0f"
///     token1 = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"
///     position_fee_tier = 1
///     tick_range = { lower = -887272, upper = 887272 }
///     max_slippage = 50
/// "#;
///
/// let cfg = FactoryConfig::from_toml_str(toml).expect("valid config");
/// assert_eq!(cfg.vault().max_slippage().get(), 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryConfig {
    address: Address,
    #[serde(default)]
    version: Version,
    vault: VaultConfig,
}

impl FactoryConfig {
    /// Creates a validated `FactoryConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidConfiguration`] if the factory
    /// address is zero or the vault config is invalid.
    pub fn new(
        address: Address,
        version: Version,
        vault: VaultConfig,
    ) -> Result<Self, ConstructionError> {
        let config = Self {
            address,
            version,
            vault,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidConfiguration`] if the document
    /// does not parse or fails validation.
    pub fn from_toml_str(source: &str) -> Result<Self, ConstructionError> {
        let config: Self = toml::from_str(source).map_err(|_| {
            ConstructionError::InvalidConfiguration("factory config is not valid TOML")
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidConfiguration`] naming the
    /// first violated rule.
    pub fn validate(&self) -> Result<(), ConstructionError> {
        if self.address.is_zero() {
            return Err(ConstructionError::InvalidConfiguration(
                "factory address must be non-zero",
            ));
        }
        self.vault.validate()
    }

    /// The factory's own account.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Initial version stamped on deployed vaults.
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Parameters shared by deployed vaults.
    #[must_use]
    pub const fn vault(&self) -> &VaultConfig {
        &self.vault
    }
}
