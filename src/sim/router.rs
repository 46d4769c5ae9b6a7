//! In-memory swap router over constant-product pools.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::debug;

use super::{ConstantProductPool, InMemoryLedger};
use crate::domain::{Address, Amount, FeeTier, SwapPath};
use crate::error::SwapError;
use crate::traits::{
    ExactInputParams, ExactInputSingleParams, ExactOutputSingleParams, Journaled, Router,
    TokenLedger,
};

type PoolKey = (Address, Address, FeeTier);

fn pool_key(token_a: Address, token_b: Address, fee_tier: FeeTier) -> PoolKey {
    if token_a < token_b {
        (token_a, token_b, fee_tier)
    } else {
        (token_b, token_a, fee_tier)
    }
}

/// Pools and clock of an [`InMemoryRouter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouterState {
    pools: BTreeMap<PoolKey, ConstantProductPool>,
    now: u64,
}

impl RouterState {
    fn pool(
        &self,
        token_a: Address,
        token_b: Address,
        fee_tier: FeeTier,
    ) -> Result<&ConstantProductPool, SwapError> {
        self.pools
            .get(&pool_key(token_a, token_b, fee_tier))
            .ok_or(SwapError::PoolNotFound { token_a, token_b })
    }

    fn pool_mut(
        &mut self,
        token_a: Address,
        token_b: Address,
        fee_tier: FeeTier,
    ) -> Result<&mut ConstantProductPool, SwapError> {
        self.pools
            .get_mut(&pool_key(token_a, token_b, fee_tier))
            .ok_or(SwapError::PoolNotFound { token_a, token_b })
    }

    fn check_deadline(&self, deadline: u64) -> Result<(), SwapError> {
        if self.now > deadline {
            return Err(SwapError::DeadlineExpired {
                deadline,
                now: self.now,
            });
        }
        Ok(())
    }

    /// Runs every hop of `path`, booking each one, and returns the final
    /// output.  Callers work on a copy so a failed route leaves no trace.
    fn route_exact_input(&mut self, path: &SwapPath, amount_in: Amount) -> Result<Amount, SwapError> {
        let mut amount = amount_in;
        for hop in path.iter() {
            let pool = self.pool_mut(hop.token_in, hop.token_out, hop.fee_tier)?;
            let out = pool.quote_exact_in(hop.token_in, amount)?;
            pool.settle(hop.token_in, amount, out)?;
            amount = out;
        }
        Ok(amount)
    }
}

/// Swap router whose pools keep their tokens in an [`InMemoryLedger`]
/// under the router's own address.
///
/// Cloning the handle shares pools and clock.  The clock starts at zero
/// and only moves through [`set_time`](Self::set_time) and
/// [`advance_time`](Self::advance_time); swaps whose deadline is before
/// the clock are rejected.
#[derive(Debug, Clone)]
pub struct InMemoryRouter {
    address: Address,
    ledger: InMemoryLedger,
    state: Rc<RefCell<RouterState>>,
}

impl InMemoryRouter {
    /// Creates a router with no pools.
    #[must_use]
    pub fn new(address: Address, ledger: InMemoryLedger) -> Self {
        Self {
            address,
            ledger,
            state: Rc::default(),
        }
    }

    /// Opens a pool and mints its initial reserves to the router.
    ///
    /// # Errors
    ///
    /// - Any error [`ConstantProductPool::new`] returns.
    /// - [`SwapError::Token`] if minting the reserves overflows.
    pub fn add_pool(
        &self,
        token_a: Address,
        token_b: Address,
        fee_tier: FeeTier,
        reserve_a: Amount,
        reserve_b: Amount,
    ) -> Result<(), SwapError> {
        let pool = ConstantProductPool::new(token_a, token_b, fee_tier, reserve_a, reserve_b)?;
        self.ledger.mint(token_a, self.address, reserve_a)?;
        self.ledger.mint(token_b, self.address, reserve_b)?;
        self.state
            .borrow_mut()
            .pools
            .insert(pool_key(token_a, token_b, fee_tier), pool);
        debug!(%token_a, %token_b, %fee_tier, "pool added");
        Ok(())
    }

    /// Snapshot of the pool for a pair and tier.
    #[must_use]
    pub fn pool(
        &self,
        token_a: Address,
        token_b: Address,
        fee_tier: FeeTier,
    ) -> Option<ConstantProductPool> {
        self.state.borrow().pool(token_a, token_b, fee_tier).ok().copied()
    }

    /// Current clock.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.state.borrow().now
    }

    /// Sets the clock.
    pub fn set_time(&self, now: u64) {
        self.state.borrow_mut().now = now;
    }

    /// Moves the clock forward by `seconds`, saturating.
    pub fn advance_time(&self, seconds: u64) {
        let mut state = self.state.borrow_mut();
        state.now = state.now.saturating_add(seconds);
    }
}

impl Journaled for InMemoryRouter {
    type Checkpoint = RouterState;

    fn checkpoint(&self) -> RouterState {
        self.state.borrow().clone()
    }

    fn revert_to(&self, checkpoint: RouterState) {
        *self.state.borrow_mut() = checkpoint;
    }
}

impl Router for InMemoryRouter {
    fn address(&self) -> Address {
        self.address
    }

    fn quote_exact_input_single(
        &self,
        token_in: Address,
        token_out: Address,
        fee_tier: FeeTier,
        amount_in: Amount,
    ) -> Result<Amount, SwapError> {
        self.state
            .borrow()
            .pool(token_in, token_out, fee_tier)?
            .quote_exact_in(token_in, amount_in)
    }

    fn quote_exact_input(&self, path: &SwapPath, amount_in: Amount) -> Result<Amount, SwapError> {
        let mut scratch = self.state.borrow().clone();
        scratch.route_exact_input(path, amount_in)
    }

    fn exact_input_single(&self, params: ExactInputSingleParams) -> Result<Amount, SwapError> {
        let amount_out = {
            let state = self.state.borrow();
            state.check_deadline(params.deadline)?;
            state
                .pool(params.token_in, params.token_out, params.fee_tier)?
                .quote_exact_in(params.token_in, params.amount_in)?
        };
        if amount_out < params.amount_out_minimum {
            return Err(SwapError::InsufficientOutputAmount {
                amount_out,
                minimum: params.amount_out_minimum,
            });
        }
        self.ledger.transfer_from(
            params.token_in,
            self.address,
            params.payer,
            self.address,
            params.amount_in,
        )?;
        self.ledger
            .transfer(params.token_out, self.address, params.recipient, amount_out)?;
        self.state
            .borrow_mut()
            .pool_mut(params.token_in, params.token_out, params.fee_tier)?
            .settle(params.token_in, params.amount_in, amount_out)?;
        debug!(
            token_in = %params.token_in,
            token_out = %params.token_out,
            amount_in = %params.amount_in,
            %amount_out,
            "exact input swap"
        );
        Ok(amount_out)
    }

    fn exact_output_single(&self, params: ExactOutputSingleParams) -> Result<Amount, SwapError> {
        let amount_in = {
            let state = self.state.borrow();
            state.check_deadline(params.deadline)?;
            state
                .pool(params.token_in, params.token_out, params.fee_tier)?
                .quote_exact_out(params.token_in, params.amount_out)?
        };
        if amount_in > params.amount_in_maximum {
            return Err(SwapError::ExcessiveInputAmount {
                amount_in,
                maximum: params.amount_in_maximum,
            });
        }
        self.ledger.transfer_from(
            params.token_in,
            self.address,
            params.payer,
            self.address,
            amount_in,
        )?;
        self.ledger.transfer(
            params.token_out,
            self.address,
            params.recipient,
            params.amount_out,
        )?;
        self.state
            .borrow_mut()
            .pool_mut(params.token_in, params.token_out, params.fee_tier)?
            .settle(params.token_in, amount_in, params.amount_out)?;
        debug!(
            token_in = %params.token_in,
            token_out = %params.token_out,
            %amount_in,
            amount_out = %params.amount_out,
            "exact output swap"
        );
        Ok(amount_in)
    }

    fn exact_input(&self, params: ExactInputParams) -> Result<Amount, SwapError> {
        let path = SwapPath::decode(&params.path)?;
        let mut next = self.state.borrow().clone();
        next.check_deadline(params.deadline)?;
        let amount_out = next.route_exact_input(&path, params.amount_in)?;
        if amount_out < params.amount_out_minimum {
            return Err(SwapError::InsufficientOutputAmount {
                amount_out,
                minimum: params.amount_out_minimum,
            });
        }
        self.ledger.transfer_from(
            path.token_in(),
            self.address,
            params.payer,
            self.address,
            params.amount_in,
        )?;
        self.ledger
            .transfer(path.token_out(), self.address, params.recipient, amount_out)?;
        *self.state.borrow_mut() = next;
        debug!(
            hops = path.hop_count(),
            amount_in = %params.amount_in,
            %amount_out,
            "multi-hop swap"
        );
        Ok(amount_out)
    }
}
