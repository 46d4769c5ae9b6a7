//! Caller identity and time for a single operation.

use super::Address;

/// Who is calling and when.
///
/// Every vault operation receives one.  `sender` decides ownership
/// checks and whose tokens a swap pulls; `timestamp` becomes the
/// router deadline, so a router whose clock has moved past it rejects
/// the trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallContext {
    /// Account invoking the operation.
    pub sender: Address,
    /// Ledger time of the call, in seconds.
    pub timestamp: u64,
}

impl CallContext {
    /// Creates a context.
    #[must_use]
    pub const fn new(sender: Address, timestamp: u64) -> Self {
        Self { sender, timestamp }
    }
}
