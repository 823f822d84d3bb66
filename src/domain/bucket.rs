// ============================================================================
// Rank Bucket
// Three-valued cyclic namespace prefixed to every rank key
// ============================================================================

use crate::errors::RankError;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of three cyclic key spaces.
///
/// When a bucket's precision is exhausted, callers move their ranks into the
/// next bucket and keep ordering there. Keys sort by bucket first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Bucket {
    #[default]
    Bucket0 = 0,
    Bucket1 = 1,
    Bucket2 = 2,
}

impl Bucket {
    pub const VALUES: [Bucket; 3] = [Bucket::Bucket0, Bucket::Bucket1, Bucket::Bucket2];

    pub const COUNT: usize = Self::VALUES.len();

    /// Last bucket in the ring.
    pub const fn max() -> Self {
        Bucket::Bucket2
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// # Errors
    /// Returns `UnknownBucket` for values outside `0..3`.
    pub fn from_value(value: u8) -> Result<Self, RankError> {
        Self::VALUES
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| RankError::UnknownBucket(value.to_string()))
    }

    pub fn next(self) -> Self {
        Self::VALUES[(self.index() + 1) % Self::COUNT]
    }

    pub fn prev(self) -> Self {
        Self::VALUES[(self.index() + Self::COUNT - 1) % Self::COUNT]
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        usize::from(self.value())
    }
}

impl FromStr for Bucket {
    type Err = RankError;

    /// Accepts exactly `"0"`, `"1"` or `"2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Bucket::Bucket0),
            "1" => Ok(Bucket::Bucket1),
            "2" => Ok(Bucket::Bucket2),
            _ => Err(RankError::UnknownBucket(s.to_string())),
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
