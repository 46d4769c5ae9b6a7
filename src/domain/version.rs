//! Deployment version stamped on every vault.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// A `major.minor.patch` version.
///
/// The factory stamps its current version on each vault it deploys and
/// reports the same value in the deployment event.  Ordering is
/// lexicographic on `(major, minor, patch)`.
///
/// # Examples
///
/// ```
/// use swap_vault::domain::Version;
///
/// let v: Version = "1.2.0".parse().expect("valid version");
/// assert!(v > Version::new(1, 1, 9));
/// assert_eq!(v.to_string(), "1.2.0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    major: u16,
    minor: u16,
    patch: u16,
}

impl Version {
    /// Initial release.
    pub const INITIAL: Self = Self::new(1, 0, 0);

    /// Creates a version from its components.
    #[must_use]
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Major component.
    #[must_use]
    pub const fn major(&self) -> u16 {
        self.major
    }

    /// Minor component.
    #[must_use]
    pub const fn minor(&self) -> u16 {
        self.minor
    }

    /// Patch component.
    #[must_use]
    pub const fn patch(&self) -> u16 {
        self.patch
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Error returned when a version string is not `major.minor.patch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("version must be major.minor.patch")]
pub struct ParseVersionError;

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix('v').unwrap_or(s);
        let mut parts = s.split('.').map(|p| p.parse::<u16>().map_err(|_| ParseVersionError));
        let (Some(major), Some(minor), Some(patch), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(ParseVersionError);
        };
        Ok(Self::new(major?, minor?, patch?))
    }
}

impl TryFrom<String> for Version {
    type Error = ParseVersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(v: Version) -> Self {
        v.to_string()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
