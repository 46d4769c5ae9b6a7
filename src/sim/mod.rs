//! In-memory collaborators for tests, demos and local experimentation.
//!
//! Enabled by the `sim` feature (on by default).  These stand in for the
//! external AMM: a multi-token ledger, a router over constant-product
//! pools, and a position manager issuing position tokens.  Their pricing
//! and liquidity math is deliberately simple; it is a test double, not a
//! model of a concentrated-liquidity AMM.
//!
//! Every type here is a cheap handle (`Rc<RefCell<_>>` inside): clones
//! share state, and [`Journaled`](crate::traits::Journaled) snapshots
//! clone the inner state.

mod ledger;
mod pool;
mod position_manager;
mod router;
mod sandbox;

#[cfg(test)]
mod proptest_properties;

pub use ledger::{InMemoryLedger, LedgerState};
pub use pool::ConstantProductPool;
pub use position_manager::{InMemoryPositionManager, PositionBook, PositionRecord};
pub use router::{InMemoryRouter, RouterState};
pub use sandbox::Sandbox;
