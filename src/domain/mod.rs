//! Fundamental domain value types used throughout the vault library.
//!
//! Addresses, amounts, fee tiers, ticks, positions, swap paths, roles and
//! versions.  All types are newtypes or small structs with validated
//! constructors so invalid states are rejected at the boundary.

mod address;
mod amount;
mod basis_points;
mod call_context;
mod deployment;
mod fee_tier;
mod liquidity;
mod position;
mod role;
mod rounding;
mod swap_path;
mod tick;
mod version;

pub use address::{Address, ParseAddressError};
pub use amount::Amount;
pub use basis_points::BasisPoints;
pub use call_context::CallContext;
pub use deployment::VaultDeployed;
pub use fee_tier::FeeTier;
pub use liquidity::Liquidity;
pub use position::{Position, PositionTokenId, TickRange};
pub use role::Role;
pub use rounding::Rounding;
pub use swap_path::{Hop, SwapPath};
pub use tick::Tick;
pub use version::{ParseVersionError, Version};
