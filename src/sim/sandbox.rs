//! One ledger, router and position manager wired together.

use super::{InMemoryLedger, InMemoryPositionManager, InMemoryRouter};
use crate::config::VaultConfig;
use crate::domain::{Address, Amount};
use crate::error::{SwapError, TokenError};

/// The three in-memory collaborators sharing one ledger.
///
/// Each field is a handle; cloning one (or the whole sandbox) shares
/// state, so the handles given to a factory and the ones kept for
/// inspection always agree.
///
/// # Examples
///
/// ```
/// use swap_vault::domain::{Address, Amount};
/// use swap_vault::sim::Sandbox;
/// use swap_vault::traits::Router;
///
/// let sandbox = Sandbox::new(Address::from_bytes([0xA0; 20]), Address::from_bytes([0xB0; 20]));
/// assert_eq!(sandbox.router.address(), Address::from_bytes([0xA0; 20]));
/// ```
#[derive(Debug, Clone)]
pub struct Sandbox {
    /// Shared token ledger.
    pub ledger: InMemoryLedger,
    /// Router over constant-product pools.
    pub router: InMemoryRouter,
    /// Position manager.
    pub position_manager: InMemoryPositionManager,
}

impl Sandbox {
    /// Creates empty collaborators at the given addresses.
    #[must_use]
    pub fn new(router: Address, position_manager: Address) -> Self {
        let ledger = InMemoryLedger::new();
        Self {
            router: InMemoryRouter::new(router, ledger.clone()),
            position_manager: InMemoryPositionManager::new(position_manager, ledger.clone()),
            ledger,
        }
    }

    /// Opens every pool `config` routes through with `reserve` of each
    /// token: input / base asset, input / intermediate, and
    /// intermediate / base asset.
    ///
    /// # Errors
    ///
    /// Any error [`InMemoryRouter::add_pool`] returns.
    pub fn seed_pools(&self, config: &VaultConfig, reserve: Amount) -> Result<(), SwapError> {
        let pools = [
            (config.input_token(), config.base_asset(), config.swap_fee_tier()),
            (
                config.input_token(),
                config.intermediate_token(),
                config.first_hop_fee_tier(),
            ),
            (
                config.intermediate_token(),
                config.base_asset(),
                config.second_hop_fee_tier(),
            ),
        ];
        for (token_a, token_b, fee_tier) in pools {
            self.router
                .add_pool(token_a, token_b, fee_tier, reserve, reserve)?;
        }
        Ok(())
    }

    /// Mints `amount` of `token` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Overflow`] if the balance would overflow.
    pub fn fund(&self, token: Address, to: Address, amount: Amount) -> Result<(), TokenError> {
        self.ledger.mint(token, to, amount)
    }
}
