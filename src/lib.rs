// ============================================================================
// LexoRank Library
// String-comparable rank keys for ordered lists with cheap reordering
// ============================================================================

//! # LexoRank
//!
//! Generates string keys whose byte-wise ordering is the order of a list.
//! Moving an item only rewrites that item's key: pick the key between its new
//! neighbours, or one gap past the list end.
//!
//! ## Features
//!
//! - **Arbitrary precision** keys built on digit-array integers and decimals
//! - **Pluggable numeral systems** (base 10, base 36, base 64, custom alphabets)
//! - **Shortest midpoint search** so keys grow as slowly as possible
//! - **Three buckets** for re-balancing a list without downtime
//!
//! ## Example
//!
//! ```rust
//! use lexorank::prelude::*;
//!
//! let ranker = RankerBuilder::base36().build()?;
//!
//! assert_eq!(ranker.min().format(), "0|000000:");
//! assert_eq!(ranker.max().format(), "0|zzzzzz:");
//!
//! // Insert between two existing items
//! let first = ranker.parse("0|100000:")?;
//! let second = first.gen_next()?;
//! let moved = first.between(&second)?;
//! assert_eq!(moved.format(), "0|100004:");
//!
//! // Keys sort like the list
//! let mut keys = vec![second.format(), first.format(), moved.format()];
//! keys.sort();
//! assert_eq!(keys, ["0|100000:", "0|100004:", "0|100008:"]);
//! # Ok::<(), lexorank::RankError>(())
//! ```

pub mod domain;
pub mod engine;
pub mod errors;
pub mod interfaces;
pub mod numeric;

pub use errors::{RankError, RankResult};

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{Bucket, Precision, Rank, RankConfig, RankOptions};
    pub use crate::engine::{create_from_config, Ranker, RankerBuilder};
    pub use crate::errors::{RankError, RankResult};
    pub use crate::interfaces::{NumeralSystem, SystemRef};
    pub use crate::numeric::{BigInteger, FixedDecimal, NumeralSystemKind};
}
