//! 20-byte account address.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An account address on the hosting ledger: token contracts, vaults,
/// routers and externally owned accounts all share this type.
///
/// Wraps a fixed-size `[u8; 20]` byte array.  All 20-byte sequences are
/// valid addresses; the all-zero address is reserved as a "not set"
/// sentinel and rejected wherever a real account is required.
///
/// Displays and parses as `0x`-prefixed lowercase hex, which is also its
/// serde representation.
///
/// # Examples
///
/// ```
/// use swap_vault::domain::Address;
///
/// let addr = Address::from_bytes([1u8; 20]);
/// assert_eq!(addr.as_bytes(), [1u8; 20]);
/// assert_eq!(addr.to_string().parse::<Address>(), Ok(addr));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// Byte length of an address.
    pub const LEN: usize = 20;

    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 20-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 20] {
        self.0
    }

    /// Returns the all-zero address.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 20])
    }

    /// Returns `true` if this is the all-zero address.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        let mut i = 0;
        while i < 20 {
            if self.0[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Builds an address from the trailing 20 bytes of a 32-byte word,
    /// the way contract addresses are cut from a keccak digest.
    #[must_use]
    pub fn from_word(word: [u8; 32]) -> Self {
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&word[12..]);
        Self(bytes)
    }
}

/// Error returned when parsing an [`Address`] from a string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseAddressError {
    /// The hex body was not exactly 40 characters.
    #[error("address must be 20 bytes (40 hex characters)")]
    InvalidLength,
    /// The string contained a non-hex character.
    #[error("address contains invalid hex")]
    InvalidHex,
}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if body.len() != 40 {
            return Err(ParseAddressError::InvalidLength);
        }
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(body, &mut bytes).map_err(|_| ParseAddressError::InvalidHex)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
