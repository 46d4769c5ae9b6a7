//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use swap_vault::prelude::*;
//! ```

pub use crate::domain::{
    Address, Amount, BasisPoints, CallContext, FeeTier, Liquidity, Position, PositionTokenId,
    Role, SwapPath, Tick, TickRange, VaultDeployed, Version,
};

pub use crate::traits::{Journaled, PositionManager, Router, TokenLedger};

pub use crate::config::{FactoryConfig, VaultConfig, VaultConfigParams};

pub use crate::error::{Result, VaultError};

pub use crate::factory::VaultFactory;

pub use crate::vault::{SwapVault, VaultState};
