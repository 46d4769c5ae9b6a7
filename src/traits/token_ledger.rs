//! Fungible token ledger consumed by vaults, routers and position managers.
//!
//! One [`TokenLedger`] tracks every fungible token: balances are keyed by
//! `(token, owner)` and allowances by `(token, owner, spender)`.  Methods
//! take `&self`; implementations hold their state behind interior
//! mutability so the same ledger can be shared by every collaborator.
//!
//! # Atomicity
//!
//! Each method either applies in full or returns an error without
//! changing anything.  Multi-step rollback is the caller's job via
//! [`Journaled`].

use super::Journaled;
use crate::domain::{Address, Amount};
use crate::error::TokenError;

/// Balance, allowance and transfer operations over fungible tokens.
pub trait TokenLedger: Journaled {
    /// Balance of `owner` in `token`.
    #[must_use]
    fn balance_of(&self, token: Address, owner: Address) -> Amount;

    /// Amount `spender` may still pull from `owner` in `token`.
    #[must_use]
    fn allowance(&self, token: Address, owner: Address, spender: Address) -> Amount;

    /// Sets `spender`'s allowance over `owner`'s `token` to `amount`
    /// (replacing, not adding to, any previous allowance).
    ///
    /// # Errors
    ///
    /// Implementations may reject approvals; the in-memory ledger never does.
    fn approve(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<(), TokenError>;

    /// Moves `amount` of `token` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`TokenError::InsufficientBalance`] if `from` holds less than `amount`.
    /// - [`TokenError::Overflow`] if `to`'s balance would overflow.
    fn transfer(
        &self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError>;

    /// Moves `amount` of `token` from `from` to `to` on behalf of
    /// `spender`, consuming that much allowance.
    ///
    /// # Errors
    ///
    /// - [`TokenError::InsufficientAllowance`] if the allowance is too low.
    /// - Any error [`transfer`](Self::transfer) can return.
    fn transfer_from(
        &self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError>;
}
