//! Multi-token in-memory ledger.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::domain::{Address, Amount};
use crate::error::TokenError;
use crate::traits::{Journaled, TokenLedger};

/// Balances and allowances for every token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerState {
    balances: BTreeMap<(Address, Address), Amount>,
    allowances: BTreeMap<(Address, Address, Address), Amount>,
}

/// Shared handle to an in-memory token ledger.
///
/// Cloning the handle shares the underlying state, so a vault, a router
/// and a position manager built from clones of one ledger all see the
/// same balances.
///
/// # Examples
///
/// ```
/// use swap_vault::domain::{Address, Amount};
/// use swap_vault::sim::InMemoryLedger;
/// use swap_vault::traits::TokenLedger;
///
/// let dai = Address::from_bytes([1u8; 20]);
/// let alice = Address::from_bytes([2u8; 20]);
/// let bob = Address::from_bytes([3u8; 20]);
///
/// let ledger = InMemoryLedger::new();
/// ledger.mint(dai, alice, Amount::new(100)).expect("mint");
/// ledger.transfer(dai, alice, bob, Amount::new(40)).expect("transfer");
///
/// assert_eq!(ledger.balance_of(dai, alice), Amount::new(60));
/// assert_eq!(ledger.balance_of(dai, bob), Amount::new(40));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    state: Rc<RefCell<LedgerState>>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `amount` of `token` out of thin air and credits it to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Overflow`] if the balance would overflow.
    pub fn mint(&self, token: Address, to: Address, amount: Amount) -> Result<(), TokenError> {
        let mut state = self.state.borrow_mut();
        let balance = state.balances.entry((token, to)).or_default();
        *balance = balance.checked_add(&amount).ok_or(TokenError::Overflow)?;
        Ok(())
    }
}

impl LedgerState {
    fn balance(&self, token: Address, owner: Address) -> Amount {
        self.balances
            .get(&(token, owner))
            .copied()
            .unwrap_or_default()
    }

    fn move_balance(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let available = self.balance(token, from);
        let debited = available
            .checked_sub(&amount)
            .ok_or(TokenError::InsufficientBalance {
                token,
                owner: from,
                available,
                required: amount,
            })?;
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance(token, to)
            .checked_add(&amount)
            .ok_or(TokenError::Overflow)?;
        self.balances.insert((token, from), debited);
        self.balances.insert((token, to), credited);
        Ok(())
    }
}

impl Journaled for InMemoryLedger {
    type Checkpoint = LedgerState;

    fn checkpoint(&self) -> LedgerState {
        self.state.borrow().clone()
    }

    fn revert_to(&self, checkpoint: LedgerState) {
        *self.state.borrow_mut() = checkpoint;
    }
}

impl TokenLedger for InMemoryLedger {
    fn balance_of(&self, token: Address, owner: Address) -> Amount {
        self.state.borrow().balance(token, owner)
    }

    fn allowance(&self, token: Address, owner: Address, spender: Address) -> Amount {
        self.state
            .borrow()
            .allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or_default()
    }

    fn approve(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let mut state = self.state.borrow_mut();
        if amount.is_zero() {
            state.allowances.remove(&(token, owner, spender));
        } else {
            state.allowances.insert((token, owner, spender), amount);
        }
        Ok(())
    }

    fn transfer(
        &self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        self.state.borrow_mut().move_balance(token, from, to, amount)
    }

    fn transfer_from(
        &self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let mut state = self.state.borrow_mut();
        let key = (token, from, spender);
        let available = state.allowances.get(&key).copied().unwrap_or_default();
        let remaining = available
            .checked_sub(&amount)
            .ok_or(TokenError::InsufficientAllowance {
                token,
                spender,
                available,
                required: amount,
            })?;
        state.move_balance(token, from, to, amount)?;
        if remaining.is_zero() {
            state.allowances.remove(&key);
        } else {
            state.allowances.insert(key, remaining);
        }
        Ok(())
    }
}
