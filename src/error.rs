//! Unified error types for the swap vault library.
//!
//! Every fallible operation in the crate returns [`VaultError`] (or one of
//! the category enums it wraps).  The categories mirror where a failure
//! originates:
//!
//! | Category | Raised by |
//! |----------|-----------|
//! | [`ConstructionError`] | factory / config construction |
//! | [`AccessError`] | role registry and owner-restricted vault calls |
//! | [`SwapError`] | router-backed swap operations |
//! | [`LiquidityError`] | position-manager-backed liquidity operations |
//! | [`TokenError`] | the fungible token ledger |
//!
//! Any error aborts the triggering vault operation in full; the vault
//! reverts every collaborator to its pre-call checkpoint before returning.

use thiserror::Error;

use crate::domain::{Address, Amount, PositionTokenId, Role};

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, VaultError>;

/// Top-level error returned by factory and vault operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    /// Factory or configuration could not be constructed.
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    /// Caller lacks the role or ownership the operation requires.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// A swap was rejected by the vault or the router.
    #[error(transparent)]
    Swap(#[from] SwapError),

    /// A liquidity operation was rejected by the vault or the position manager.
    #[error(transparent)]
    Liquidity(#[from] LiquidityError),

    /// A direct token movement (e.g. a withdrawal) failed.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Checked arithmetic overflowed.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),
}

impl VaultError {
    /// Returns `true` if this is an access-control failure.
    #[must_use]
    pub const fn is_access(&self) -> bool {
        matches!(self, Self::Access(_))
    }

    /// Returns `true` if this is a swap failure.
    #[must_use]
    pub const fn is_swap(&self) -> bool {
        matches!(self, Self::Swap(_))
    }

    /// Returns `true` if this is a liquidity failure.
    #[must_use]
    pub const fn is_liquidity(&self) -> bool {
        matches!(self, Self::Liquidity(_))
    }
}

/// Errors raised while constructing the factory or its configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// The approver address supplied was the zero address.
    #[error("F: Invalid approver")]
    InvalidApprover,

    /// A configuration parameter is out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Role and ownership failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The caller is not the vault owner.
    #[error("Not the owner: {caller} is not {owner}")]
    NotOwner {
        /// Address that attempted the call.
        caller: Address,
        /// Address that owns the vault.
        owner: Address,
    },

    /// The caller does not hold the role required for the operation.
    #[error("{caller} is missing role {role}")]
    MissingRole {
        /// Role the operation requires.
        role: Role,
        /// Address that attempted the call.
        caller: Address,
    },

    /// The role was never assigned.
    #[error("role {0} is not set")]
    RoleNotSet(Role),

    /// The role has already been assigned and cannot be reassigned.
    #[error("role {0} is already assigned")]
    RoleAlreadyAssigned(Role),

    /// No role matches the supplied identifier.
    #[error("unknown role identifier 0x{}", hex::encode(.0))]
    UnknownRole([u8; 32]),

    /// A version update did not move the version forward.
    #[error("version must increase")]
    VersionNotIncreasing,
}

/// Swap failures, raised by the vault or surfaced from the router.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwapError {
    /// The requested amount was zero.
    #[error("swap amount must be non-zero")]
    ZeroAmount,

    /// The router's output would fall below the minimum accepted.
    #[error("Too little received: {amount_out} < {minimum}")]
    InsufficientOutputAmount {
        /// Output the router could deliver.
        amount_out: Amount,
        /// Minimum output the caller accepts.
        minimum: Amount,
    },

    /// Delivering the requested output would need more input than allowed.
    #[error("Too much requested: {amount_in} > {maximum}")]
    ExcessiveInputAmount {
        /// Input the router would consume.
        amount_in: Amount,
        /// Maximum input the caller allows.
        maximum: Amount,
    },

    /// The transaction deadline has passed.
    #[error("Transaction too old: deadline {deadline} < now {now}")]
    DeadlineExpired {
        /// Deadline supplied with the swap.
        deadline: u64,
        /// Router clock at execution time.
        now: u64,
    },

    /// The encoded multi-hop path is malformed.
    #[error("invalid swap path: {0}")]
    InvalidPath(&'static str),

    /// No pool exists for a requested hop.
    #[error("no pool for {token_a}/{token_b}")]
    PoolNotFound {
        /// First token of the hop.
        token_a: Address,
        /// Second token of the hop.
        token_b: Address,
    },

    /// Pool reserves cannot satisfy the swap.
    #[error("insufficient pool liquidity")]
    InsufficientLiquidity,

    /// A token transfer or approval failed.
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Liquidity-position failures, raised by the vault or surfaced from the
/// position manager.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiquidityError {
    /// The token id does not match the position held by the vault.
    #[error("unknown position {0}")]
    UnknownPosition(PositionTokenId),

    /// The vault already holds a position.
    #[error("vault already holds position {0}")]
    PositionAlreadyOpen(PositionTokenId),

    /// The position has no liquidity left to remove.
    #[error("position {0} has zero liquidity")]
    ZeroLiquidity(PositionTokenId),

    /// The vault holds less of a token than the operation needs.
    #[error("insufficient balance of {token}: have {available}, need {required}")]
    InsufficientBalance {
        /// Token that is short.
        token: Address,
        /// Balance currently held.
        available: Amount,
        /// Amount the operation needs.
        required: Amount,
    },

    /// Tick bounds are out of range, unordered, or not aligned to spacing.
    #[error("invalid tick range: {0}")]
    InvalidTickRange(&'static str),

    /// The fee tier has no pool / tick spacing.
    #[error("unsupported fee tier")]
    UnsupportedFeeTier,

    /// The caller is not the owner of the position token.
    #[error("Not approved for position {0}")]
    NotApproved(PositionTokenId),

    /// Deposit is too small to mint any liquidity.
    #[error("deposit too small to mint liquidity")]
    DepositTooSmall,

    /// A token transfer or approval failed.
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Failures raised by the fungible token ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The sender does not hold enough of the token.
    #[error("transfer amount exceeds balance of {owner}: {available} < {required}")]
    InsufficientBalance {
        /// Token being moved.
        token: Address,
        /// Account being debited.
        owner: Address,
        /// Balance held.
        available: Amount,
        /// Amount requested.
        required: Amount,
    },

    /// The spender's allowance is too low.
    #[error("insufficient allowance for {spender}: {available} < {required}")]
    InsufficientAllowance {
        /// Token being moved.
        token: Address,
        /// Spender pulling the funds.
        spender: Address,
        /// Allowance granted.
        available: Amount,
        /// Amount requested.
        required: Amount,
    },

    /// Crediting the recipient would overflow its balance.
    #[error("balance overflow")]
    Overflow,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn construction_converts_into_vault_error() {
        let err: VaultError = ConstructionError::InvalidApprover.into();
        assert_eq!(
            err,
            VaultError::Construction(ConstructionError::InvalidApprover)
        );
        assert_eq!(err.to_string(), "F: Invalid approver");
    }

    #[test]
    fn token_error_nests_inside_swap_error() {
        let token = TokenError::Overflow;
        let swap: SwapError = token.clone().into();
        let err: VaultError = swap.into();
        assert!(err.is_swap());
        assert!(!err.is_liquidity());
        assert_eq!(err, VaultError::Swap(SwapError::Token(token)));
    }

    #[test]
    fn not_owner_is_access() {
        let err: VaultError = AccessError::NotOwner {
            caller: Address::from_bytes([1u8; 20]),
            owner: Address::from_bytes([2u8; 20]),
        }
        .into();
        assert!(err.is_access());
        assert!(err.to_string().starts_with("Not the owner"));
    }

    #[test]
    fn unknown_role_renders_hex() {
        let err = AccessError::UnknownRole([0xab; 32]);
        assert!(err.to_string().contains("0xabab"));
    }

    #[test]
    fn liquidity_display_mentions_token_id() {
        let err = LiquidityError::ZeroLiquidity(PositionTokenId::new(7));
        assert_eq!(err.to_string(), "position #7 has zero liquidity");
    }
}
