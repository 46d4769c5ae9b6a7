//! Interfaces to the external collaborators a vault delegates to.
//!
//! - [`TokenLedger`]: fungible token balances, allowances and transfers.
//! - [`Router`]: swap execution and quoting.
//! - [`PositionManager`]: liquidity position lifecycle.
//! - [`Journaled`]: checkpoint and revert. A supertrait of the other
//!   three so a vault operation can roll every collaborator back on failure.
//!
//! Vaults are generic over these traits (static dispatch, no `dyn`) and
//! hold one handle of each, injected by the factory.

mod journaled;
mod position_manager;
mod router;
mod token_ledger;

pub use journaled::Journaled;
pub use position_manager::{
    DecreaseLiquidityParams, IncreaseLiquidityParams, LiquidityReceipt, MintParams,
    PositionManager,
};
pub use router::{ExactInputParams, ExactInputSingleParams, ExactOutputSingleParams, Router};
pub use token_ledger::TokenLedger;
