//! Swap router consumed by the vault.
//!
//! The [`Router`] executes swaps against the AMM's pools.  Callers quote
//! through it before calling the vault; the vault turns that expectation
//! into a minimum output, approves the router for the input, and lets
//! the router pull the input and pay the recipient.
//!
//! # Payment Model
//!
//! The router pulls input with
//! [`TokenLedger::transfer_from`](super::TokenLedger::transfer_from)
//! using `payer` as the owner and itself as the spender, so the payer
//! must have approved the router beforehand.  Output goes straight to
//! `recipient`.
//!
//! # Failure Semantics
//!
//! A swap either completes in full or returns an error.  Limits are
//! enforced by the router:
//!
//! - output below `amount_out_minimum` → [`SwapError::InsufficientOutputAmount`]
//! - input above `amount_in_maximum` → [`SwapError::ExcessiveInputAmount`]
//! - clock past `deadline` → [`SwapError::DeadlineExpired`]

use super::Journaled;
use crate::domain::{Address, Amount, FeeTier, SwapPath};
use crate::error::SwapError;

/// Single-pool exact-input swap request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactInputSingleParams {
    /// Token sold.
    pub token_in: Address,
    /// Token bought.
    pub token_out: Address,
    /// Fee tier identifying the pool.
    pub fee_tier: FeeTier,
    /// Account whose input is pulled.
    pub payer: Address,
    /// Account that receives the output.
    pub recipient: Address,
    /// Latest acceptable execution time.
    pub deadline: u64,
    /// Exact input amount.
    pub amount_in: Amount,
    /// Smallest acceptable output.
    pub amount_out_minimum: Amount,
}

/// Single-pool exact-output swap request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactOutputSingleParams {
    /// Token sold.
    pub token_in: Address,
    /// Token bought.
    pub token_out: Address,
    /// Fee tier identifying the pool.
    pub fee_tier: FeeTier,
    /// Account whose input is pulled.
    pub payer: Address,
    /// Account that receives the output.
    pub recipient: Address,
    /// Latest acceptable execution time.
    pub deadline: u64,
    /// Exact output amount.
    pub amount_out: Amount,
    /// Largest acceptable input.
    pub amount_in_maximum: Amount,
}

/// Multi-pool exact-input swap request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactInputParams {
    /// Packed route (see [`SwapPath::encode`]).
    pub path: Vec<u8>,
    /// Account whose input is pulled.
    pub payer: Address,
    /// Account that receives the final output.
    pub recipient: Address,
    /// Latest acceptable execution time.
    pub deadline: u64,
    /// Exact input amount for the first hop.
    pub amount_in: Amount,
    /// Smallest acceptable final output.
    pub amount_out_minimum: Amount,
}

/// Swap execution against the AMM.
pub trait Router: Journaled {
    /// The router's own account, used as the spender in approvals.
    #[must_use]
    fn address(&self) -> Address;

    /// Output a single-pool exact-input swap would yield right now.
    ///
    /// # Errors
    ///
    /// - [`SwapError::PoolNotFound`] if no pool matches.
    /// - [`SwapError::InsufficientLiquidity`] if the pool cannot fill it.
    fn quote_exact_input_single(
        &self,
        token_in: Address,
        token_out: Address,
        fee_tier: FeeTier,
        amount_in: Amount,
    ) -> Result<Amount, SwapError>;

    /// Final output a multi-pool exact-input swap would yield right now.
    ///
    /// # Errors
    ///
    /// Any error a hop's quote can return.
    fn quote_exact_input(&self, path: &SwapPath, amount_in: Amount) -> Result<Amount, SwapError>;

    /// Sells exactly `amount_in`, returning the output delivered.
    ///
    /// # Errors
    ///
    /// See the module-level failure semantics.
    fn exact_input_single(&self, params: ExactInputSingleParams) -> Result<Amount, SwapError>;

    /// Buys exactly `amount_out`, returning the input consumed.
    ///
    /// # Errors
    ///
    /// See the module-level failure semantics.
    fn exact_output_single(&self, params: ExactOutputSingleParams) -> Result<Amount, SwapError>;

    /// Sells exactly `amount_in` along a packed path, returning the
    /// final output delivered.
    ///
    /// # Errors
    ///
    /// - [`SwapError::InvalidPath`] if the path does not decode.
    /// - See the module-level failure semantics.
    fn exact_input(&self, params: ExactInputParams) -> Result<Amount, SwapError>;
}
