//! Encoded multi-hop swap route.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Address, FeeTier};
use crate::error::SwapError;

/// Bytes used by a fee segment (`uint24`, big-endian).
const FEE_LEN: usize = 3;

/// Bytes used by one `fee ‖ token` hop after the first token.
const HOP_LEN: usize = FEE_LEN + Address::LEN;

/// One pool traversal within a [`SwapPath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hop {
    /// Token sold into the pool.
    pub token_in: Address,
    /// Fee tier identifying the pool.
    pub fee_tier: FeeTier,
    /// Token bought from the pool.
    pub token_out: Address,
}

/// A route of one or more pools, from an input token to an output token.
///
/// The wire form is the packed encoding routers consume:
///
/// ```text
/// token0 (20 bytes) ‖ fee0 (3 bytes) ‖ token1 (20 bytes) ‖ fee1 ‖ token2 …
/// ```
///
/// A valid encoding is `20 + 23·n` bytes long with `n ≥ 1`, no hop's
/// tokens are equal, and every fee is a whole number of basis points.
///
/// # Examples
///
/// ```
/// use swap_vault::domain::{Address, FeeTier, SwapPath};
///
/// let dai = Address::from_bytes([1u8; 20]);
/// let usdc = Address::from_bytes([2u8; 20]);
/// let weth = Address::from_bytes([3u8; 20]);
///
/// let path = SwapPath::new(
///     dai,
///     vec![(FeeTier::TIER_0_30_PERCENT, usdc), (FeeTier::TIER_0_30_PERCENT, weth)],
/// )
/// .expect("valid path");
///
/// let bytes = path.encode();
/// assert_eq!(bytes.len(), 20 + 2 * 23);
/// assert_eq!(SwapPath::decode(&bytes), Ok(path));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapPath {
    token_in: Address,
    hops: Vec<(FeeTier, Address)>,
}

impl SwapPath {
    /// Builds a path starting at `token_in` through each `(fee, token)` hop.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidPath`] if there are no hops or a hop
    /// swaps a token for itself.
    pub fn new(token_in: Address, hops: Vec<(FeeTier, Address)>) -> Result<Self, SwapError> {
        let path = Self { token_in, hops };
        path.validate()?;
        Ok(path)
    }

    /// Checks the path invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidPath`] on an empty route, a zero
    /// token, or a hop whose input equals its output.
    pub fn validate(&self) -> Result<(), SwapError> {
        if self.hops.is_empty() {
            return Err(SwapError::InvalidPath("path needs at least one hop"));
        }
        if self.token_in.is_zero() || self.hops.iter().any(|(_, t)| t.is_zero()) {
            return Err(SwapError::InvalidPath("path contains the zero address"));
        }
        if self.iter().any(|hop| hop.token_in == hop.token_out) {
            return Err(SwapError::InvalidPath("hop swaps a token for itself"));
        }
        Ok(())
    }

    /// First token of the route.
    #[must_use]
    pub const fn token_in(&self) -> Address {
        self.token_in
    }

    /// Last token of the route.
    #[must_use]
    pub fn token_out(&self) -> Address {
        self.hops
            .last()
            .map_or(self.token_in, |(_, token)| *token)
    }

    /// Number of pools traversed.
    #[must_use]
    pub fn hop_count(&self) -> usize {
        self.hops.len()
    }

    /// Iterates the pools in routing order.
    pub fn iter(&self) -> impl Iterator<Item = Hop> + '_ {
        let inputs = core::iter::once(self.token_in).chain(self.hops.iter().map(|(_, t)| *t));
        inputs.zip(self.hops.iter()).map(|(token_in, (fee_tier, token_out))| Hop {
            token_in,
            fee_tier: *fee_tier,
            token_out: *token_out,
        })
    }

    /// Packs the path into router wire form.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Address::LEN + HOP_LEN * self.hops.len());
        out.extend_from_slice(&self.token_in.as_bytes());
        for (fee, token) in &self.hops {
            out.extend_from_slice(&fee.as_pips().to_be_bytes()[1..]);
            out.extend_from_slice(&token.as_bytes());
        }
        out
    }

    /// Parses a packed path.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidPath`] on a bad length, a fee that is
    /// not a whole basis point, or any violation of [`validate`](Self::validate).
    pub fn decode(bytes: &[u8]) -> Result<Self, SwapError> {
        if bytes.len() < Address::LEN + HOP_LEN || (bytes.len() - Address::LEN) % HOP_LEN != 0 {
            return Err(SwapError::InvalidPath("encoded length must be 20 + 23n, n >= 1"));
        }
        let token_in = read_address(&bytes[..Address::LEN]);
        let hops = bytes[Address::LEN..]
            .chunks_exact(HOP_LEN)
            .map(|chunk| {
                let pips = u32::from_be_bytes([0, chunk[0], chunk[1], chunk[2]]);
                let fee = FeeTier::from_pips(pips)
                    .ok_or(SwapError::InvalidPath("fee is not a whole basis point"))?;
                Ok((fee, read_address(&chunk[FEE_LEN..])))
            })
            .collect::<Result<Vec<_>, SwapError>>()?;
        Self::new(token_in, hops)
    }
}

fn read_address(bytes: &[u8]) -> Address {
    let mut raw = [0u8; 20];
    raw.copy_from_slice(bytes);
    Address::from_bytes(raw)
}

impl fmt::Display for SwapPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token_in)?;
        for (fee, token) in &self.hops {
            write!(f, " -[{}]-> {}", fee.basis_points(), token)?;
        }
        Ok(())
    }
}
