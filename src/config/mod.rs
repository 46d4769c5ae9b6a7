//! Declarative, validated configuration for factories and vaults.
//!
//! Each config type validates on construction and exposes read-only
//! accessors.  [`FactoryConfig`] can also be loaded from TOML, in which
//! case the same validation runs after parsing.

mod factory_config;
mod vault_config;

pub use factory_config::FactoryConfig;
pub use vault_config::{VaultConfig, VaultConfigParams};
