//! In-memory position manager issuing position tokens.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use alloy_primitives::U256;
use tracing::debug;

use super::InMemoryLedger;
use crate::domain::{Address, Amount, FeeTier, Liquidity, PositionTokenId, Rounding, TickRange};
use crate::error::{LiquidityError, TokenError};
use crate::traits::{
    DecreaseLiquidityParams, IncreaseLiquidityParams, Journaled, LiquidityReceipt, MintParams,
    PositionManager, TokenLedger,
};

/// Book entry for one position token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionRecord {
    /// Holder of the position token.
    pub owner: Address,
    /// Lower-address token of the pair.
    pub token0: Address,
    /// Higher-address token of the pair.
    pub token1: Address,
    /// Pool fee tier.
    pub fee_tier: FeeTier,
    /// Price range.
    pub range: TickRange,
    /// Liquidity held.
    pub liquidity: Liquidity,
    /// token0 principal backing the liquidity.
    pub principal0: Amount,
    /// token1 principal backing the liquidity.
    pub principal1: Amount,
    /// token0 fees accrued and not yet collected.
    pub owed0: Amount,
    /// token1 fees accrued and not yet collected.
    pub owed1: Amount,
}

/// Issued positions and the next token id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionBook {
    next_id: u64,
    positions: BTreeMap<PositionTokenId, PositionRecord>,
}

impl PositionBook {
    fn owned_mut(
        &mut self,
        caller: Address,
        token_id: PositionTokenId,
    ) -> Result<&mut PositionRecord, LiquidityError> {
        let record = self
            .positions
            .get_mut(&token_id)
            .ok_or(LiquidityError::UnknownPosition(token_id))?;
        if record.owner != caller {
            return Err(LiquidityError::NotApproved(token_id));
        }
        Ok(record)
    }
}

/// Integer square root of a 256-bit value, rounded down.
fn isqrt(n: U256) -> U256 {
    if n.is_zero() {
        return n;
    }
    let mut x = n;
    let mut y = (x >> 1_usize) + U256::from(1u8);
    while y < x {
        x = y;
        y = (x + n / x) >> 1_usize;
    }
    x
}

/// Liquidity minted by a first deposit: `floor(sqrt(amount0 × amount1))`.
fn initial_liquidity(amount0: Amount, amount1: Amount) -> Result<Liquidity, LiquidityError> {
    let root = isqrt(U256::from(amount0.get()) * U256::from(amount1.get()));
    let value = u128::try_from(root).map_err(|_| LiquidityError::Token(TokenError::Overflow))?;
    Ok(Liquidity::new(value))
}

/// Largest liquidity both desired amounts can fund at the position's
/// current principal ratio, and what it costs.
fn proportional_deposit(
    record: &PositionRecord,
    amount0_desired: Amount,
    amount1_desired: Amount,
) -> Result<(Liquidity, Amount, Amount), LiquidityError> {
    let total = Amount::new(record.liquidity.get());
    let overflow = LiquidityError::Token(TokenError::Overflow);
    let by0 = if record.principal0.is_zero() {
        None
    } else {
        Some(
            amount0_desired
                .mul_div(total, record.principal0, Rounding::Down)
                .ok_or(overflow.clone())?,
        )
    };
    let by1 = if record.principal1.is_zero() {
        None
    } else {
        Some(
            amount1_desired
                .mul_div(total, record.principal1, Rounding::Down)
                .ok_or(overflow.clone())?,
        )
    };
    let minted = match (by0, by1) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => Amount::ZERO,
    };
    if minted.is_zero() {
        return Err(LiquidityError::DepositTooSmall);
    }
    let amount0 = minted
        .mul_div(record.principal0, total, Rounding::Up)
        .ok_or(overflow.clone())?
        .min(amount0_desired);
    let amount1 = minted
        .mul_div(record.principal1, total, Rounding::Up)
        .ok_or(overflow)?
        .min(amount1_desired);
    Ok((Liquidity::new(minted.get()), amount0, amount1))
}

/// Position manager that keeps deposited principal and accrued fees in
/// an [`InMemoryLedger`] under its own address.
///
/// - A first deposit into a position mints `floor(sqrt(a0 × a1))`
///   liquidity and consumes both amounts in full.
/// - Later deposits consume at the position's principal ratio; the
///   excess stays with the payer.
/// - Withdrawals return principal pro rata.
/// - Fees only appear through [`accrue_fees`](Self::accrue_fees), which
///   stands in for trading activity in the pool.
///
/// Cloning the handle shares the book.
#[derive(Debug, Clone)]
pub struct InMemoryPositionManager {
    address: Address,
    ledger: InMemoryLedger,
    book: Rc<RefCell<PositionBook>>,
}

impl InMemoryPositionManager {
    /// Creates a manager with no positions.  Token ids start at 1.
    #[must_use]
    pub fn new(address: Address, ledger: InMemoryLedger) -> Self {
        Self {
            address,
            ledger,
            book: Rc::default(),
        }
    }

    /// Book entry for `token_id`.
    #[must_use]
    pub fn record(&self, token_id: PositionTokenId) -> Option<PositionRecord> {
        self.book.borrow().positions.get(&token_id).copied()
    }

    /// Credits trading fees to a position, minting them into the ledger
    /// under the manager's address until collected.
    ///
    /// # Errors
    ///
    /// - [`LiquidityError::UnknownPosition`] for an unknown token.
    /// - [`LiquidityError::Token`] on overflow.
    pub fn accrue_fees(
        &self,
        token_id: PositionTokenId,
        fee0: Amount,
        fee1: Amount,
    ) -> Result<(), LiquidityError> {
        let Some(record) = self.record(token_id) else {
            return Err(LiquidityError::UnknownPosition(token_id));
        };
        let owed0 = record
            .owed0
            .checked_add(&fee0)
            .ok_or(TokenError::Overflow)?;
        let owed1 = record
            .owed1
            .checked_add(&fee1)
            .ok_or(TokenError::Overflow)?;
        self.ledger.mint(record.token0, self.address, fee0)?;
        self.ledger.mint(record.token1, self.address, fee1)?;
        if let Some(entry) = self.book.borrow_mut().positions.get_mut(&token_id) {
            entry.owed0 = owed0;
            entry.owed1 = owed1;
        }
        debug!(%token_id, %fee0, %fee1, "fees accrued");
        Ok(())
    }

    fn pull(&self, token: Address, payer: Address, amount: Amount) -> Result<(), TokenError> {
        if amount.is_zero() {
            return Ok(());
        }
        self.ledger
            .transfer_from(token, self.address, payer, self.address, amount)
    }

    fn pay(&self, token: Address, recipient: Address, amount: Amount) -> Result<(), TokenError> {
        if amount.is_zero() {
            return Ok(());
        }
        self.ledger.transfer(token, self.address, recipient, amount)
    }
}

impl Journaled for InMemoryPositionManager {
    type Checkpoint = PositionBook;

    fn checkpoint(&self) -> PositionBook {
        self.book.borrow().clone()
    }

    fn revert_to(&self, checkpoint: PositionBook) {
        *self.book.borrow_mut() = checkpoint;
    }
}

impl PositionManager for InMemoryPositionManager {
    fn address(&self) -> Address {
        self.address
    }

    fn mint(&self, params: MintParams) -> Result<LiquidityReceipt, LiquidityError> {
        params.range.validate_for(params.fee_tier)?;
        let liquidity = initial_liquidity(params.amount0_desired, params.amount1_desired)?;
        if liquidity.is_zero() {
            return Err(LiquidityError::DepositTooSmall);
        }
        let token_id = {
            let book = self.book.borrow();
            let next = book
                .next_id
                .checked_add(1)
                .ok_or(LiquidityError::Token(TokenError::Overflow))?;
            PositionTokenId::new(next)
        };
        self.pull(params.token0, params.payer, params.amount0_desired)?;
        self.pull(params.token1, params.payer, params.amount1_desired)?;
        let record = PositionRecord {
            owner: params.recipient,
            token0: params.token0,
            token1: params.token1,
            fee_tier: params.fee_tier,
            range: params.range,
            liquidity,
            principal0: params.amount0_desired,
            principal1: params.amount1_desired,
            owed0: Amount::ZERO,
            owed1: Amount::ZERO,
        };
        {
            let mut book = self.book.borrow_mut();
            book.next_id = token_id.get();
            book.positions.insert(token_id, record);
        }
        debug!(%token_id, %liquidity, "position minted");
        Ok(LiquidityReceipt {
            token_id,
            liquidity,
            amount0: params.amount0_desired,
            amount1: params.amount1_desired,
        })
    }

    fn increase_liquidity(
        &self,
        caller: Address,
        params: IncreaseLiquidityParams,
    ) -> Result<LiquidityReceipt, LiquidityError> {
        let record = *self.book.borrow_mut().owned_mut(caller, params.token_id)?;
        let (liquidity, amount0, amount1) = if record.liquidity.is_zero() {
            let minted = initial_liquidity(params.amount0_desired, params.amount1_desired)?;
            if minted.is_zero() {
                return Err(LiquidityError::DepositTooSmall);
            }
            (minted, params.amount0_desired, params.amount1_desired)
        } else {
            proportional_deposit(&record, params.amount0_desired, params.amount1_desired)?
        };
        let overflow = || LiquidityError::Token(TokenError::Overflow);
        let updated = PositionRecord {
            liquidity: record.liquidity.checked_add(&liquidity).ok_or_else(overflow)?,
            principal0: record.principal0.checked_add(&amount0).ok_or_else(overflow)?,
            principal1: record.principal1.checked_add(&amount1).ok_or_else(overflow)?,
            ..record
        };
        self.pull(record.token0, params.payer, amount0)?;
        self.pull(record.token1, params.payer, amount1)?;
        self.book
            .borrow_mut()
            .positions
            .insert(params.token_id, updated);
        debug!(token_id = %params.token_id, %liquidity, "liquidity increased");
        Ok(LiquidityReceipt {
            token_id: params.token_id,
            liquidity,
            amount0,
            amount1,
        })
    }

    fn decrease_liquidity(
        &self,
        caller: Address,
        params: DecreaseLiquidityParams,
    ) -> Result<(Amount, Amount), LiquidityError> {
        let record = *self.book.borrow_mut().owned_mut(caller, params.token_id)?;
        if params.liquidity.is_zero() || params.liquidity > record.liquidity {
            return Err(LiquidityError::ZeroLiquidity(params.token_id));
        }
        let removed = Amount::new(params.liquidity.get());
        let total = Amount::new(record.liquidity.get());
        let overflow = || LiquidityError::Token(TokenError::Overflow);
        let amount0 = record
            .principal0
            .mul_div(removed, total, Rounding::Down)
            .ok_or_else(overflow)?;
        let amount1 = record
            .principal1
            .mul_div(removed, total, Rounding::Down)
            .ok_or_else(overflow)?;
        let updated = PositionRecord {
            liquidity: record
                .liquidity
                .checked_sub(&params.liquidity)
                .ok_or(LiquidityError::ZeroLiquidity(params.token_id))?,
            principal0: record.principal0.saturating_sub(&amount0),
            principal1: record.principal1.saturating_sub(&amount1),
            ..record
        };
        self.pay(record.token0, params.recipient, amount0)?;
        self.pay(record.token1, params.recipient, amount1)?;
        self.book
            .borrow_mut()
            .positions
            .insert(params.token_id, updated);
        debug!(token_id = %params.token_id, liquidity = %params.liquidity, "liquidity decreased");
        Ok((amount0, amount1))
    }

    fn collect(
        &self,
        caller: Address,
        token_id: PositionTokenId,
        recipient: Address,
    ) -> Result<(Amount, Amount), LiquidityError> {
        let record = *self.book.borrow_mut().owned_mut(caller, token_id)?;
        self.pay(record.token0, recipient, record.owed0)?;
        self.pay(record.token1, recipient, record.owed1)?;
        if let Some(entry) = self.book.borrow_mut().positions.get_mut(&token_id) {
            entry.owed0 = Amount::ZERO;
            entry.owed1 = Amount::ZERO;
        }
        debug!(%token_id, fee0 = %record.owed0, fee1 = %record.owed1, "fees collected");
        Ok((record.owed0, record.owed1))
    }

    fn owner_of(&self, token_id: PositionTokenId) -> Option<Address> {
        self.record(token_id).map(|r| r.owner)
    }

    fn liquidity_of(&self, token_id: PositionTokenId) -> Option<Liquidity> {
        self.record(token_id).map(|r| r.liquidity)
    }

    fn transfer(
        &self,
        caller: Address,
        token_id: PositionTokenId,
        to: Address,
    ) -> Result<(), LiquidityError> {
        self.book.borrow_mut().owned_mut(caller, token_id)?.owner = to;
        debug!(%token_id, %to, "position token transferred");
        Ok(())
    }
}
