// ============================================================================
// Rank
// Bucketed decimal position with a string-comparable key
// ============================================================================

use super::bucket::Bucket;
use super::config::RankConfig;
use crate::engine::midpoint;
use crate::errors::{RankError, RankResult};
use crate::numeric::{FixedDecimal, RANK_SEPARATOR};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A position in a ranked list.
///
/// The key `"<bucket>|<decimal>"` is built once at construction. Byte-wise
/// ordering of keys matches numeric ordering of `(bucket, decimal)` inside
/// one configuration, so ranks sort, compare and hash by their key.
#[derive(Clone)]
pub struct Rank {
    bucket: Bucket,
    decimal: FixedDecimal,
    key: String,
    config: Arc<RankConfig>,
}

impl Rank {
    /// # Errors
    /// - `IncompatibleSystem` if `decimal` is not in the configured base
    /// - `OutOfRange` if `decimal` lies outside `[min, max]`
    /// - `InvalidDigit` if a digit cannot be rendered
    pub(crate) fn new(
        config: &Arc<RankConfig>,
        bucket: Bucket,
        decimal: FixedDecimal,
    ) -> RankResult<Self> {
        let (expected, actual) = (config.system().base(), decimal.system().base());
        if expected != actual {
            return Err(RankError::IncompatibleSystem {
                left: expected,
                right: actual,
            });
        }
        if decimal < *config.min() || decimal > *config.max() {
            return Err(RankError::OutOfRange(decimal.to_string()));
        }

        let mut key = bucket.to_string();
        key.push(RANK_SEPARATOR);
        key.push_str(&format_decimal(config, &decimal)?);

        Ok(Self {
            bucket,
            decimal,
            key,
            config: Arc::clone(config),
        })
    }

    /// Same configuration and bucket, different decimal.
    fn with_decimal(&self, decimal: FixedDecimal) -> RankResult<Self> {
        Self::new(&self.config, self.bucket, decimal)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn bucket(&self) -> Bucket {
        self.bucket
    }

    #[inline]
    pub fn decimal(&self) -> &FixedDecimal {
        &self.decimal
    }

    /// The storable key, e.g. `"0|hzzzzz:"`.
    #[inline]
    pub fn format(&self) -> &str {
        &self.key
    }

    pub fn config(&self) -> &Arc<RankConfig> {
        &self.config
    }

    pub fn is_min(&self) -> bool {
        self.decimal == *self.config.min()
    }

    pub fn is_max(&self) -> bool {
        self.decimal == *self.config.max()
    }

    // ========================================================================
    // Generation
    // ========================================================================

    /// Rank after this one, one gap above its ceiling when there is room.
    ///
    /// The minimum jumps straight to the initial minimum. Near the top the
    /// result is the midpoint towards the maximum; the maximum itself is a
    /// fixed point.
    ///
    /// # Errors
    /// Arithmetic errors only, which a valid configuration never produces.
    pub fn gen_next(&self) -> RankResult<Self> {
        let config = &self.config;
        if self.is_min() {
            tracing::trace!(rank = %self, "minimum advances to the initial minimum");
            return self.with_decimal(config.initial_min().clone());
        }

        let ceil = FixedDecimal::from_integer(self.decimal.ceil()?);
        let mut next = ceil.add(config.default_gap())?;
        if next.compare(config.max())?.is_ge() {
            tracing::trace!(rank = %self, "gap overruns the maximum, bisecting");
            next = midpoint::between(&self.decimal, config.max())?;
        }
        self.with_decimal(next)
    }

    /// Rank before this one, one gap below its floor when there is room.
    ///
    /// Mirrors [`gen_next`](Self::gen_next): the maximum jumps to the initial
    /// maximum and the minimum is a fixed point.
    ///
    /// # Errors
    /// Arithmetic errors only, which a valid configuration never produces.
    pub fn gen_prev(&self) -> RankResult<Self> {
        let config = &self.config;
        if self.is_max() {
            tracing::trace!(rank = %self, "maximum retreats to the initial maximum");
            return self.with_decimal(config.initial_max().clone());
        }

        let floor = FixedDecimal::from_integer(self.decimal.floor());
        let mut prev = floor.subtract(config.default_gap())?;
        if prev.compare(config.min())?.is_le() {
            tracing::trace!(rank = %self, "gap underruns the minimum, bisecting");
            prev = midpoint::between(config.min(), &self.decimal)?;
        }
        self.with_decimal(prev)
    }

    /// Shortest rank strictly between `self` and `other`, in either order.
    ///
    /// # Errors
    /// - `CrossBucket` if the ranks live in different buckets
    /// - `EqualRank` if both ranks hold the same decimal
    /// - `IncompatibleKeySpace` if `other` comes from a configuration with a
    ///   different base or key width
    pub fn between(&self, other: &Rank) -> RankResult<Self> {
        if self.bucket != other.bucket {
            return Err(RankError::CrossBucket {
                left: self.key.clone(),
                right: other.key.clone(),
            });
        }
        if !self.same_key_space(other) {
            return Err(RankError::IncompatibleKeySpace {
                left: self.key.clone(),
                right: other.key.clone(),
            });
        }

        let decimal = match self.decimal.compare(&other.decimal)? {
            Ordering::Less => midpoint::between(&self.decimal, &other.decimal)?,
            Ordering::Greater => midpoint::between(&other.decimal, &self.decimal)?,
            Ordering::Equal => return Err(RankError::EqualRank(self.key.clone())),
        };
        self.with_decimal(decimal)
    }

    /// Both ranks format their keys to the same width in the same base.
    fn same_key_space(&self, other: &Rank) -> bool {
        Arc::ptr_eq(&self.config, &other.config)
            || (self.config.system().base() == other.config.system().base()
                && self.config.max_order() == other.config.max_order()
                && self.config.max() == other.config.max())
    }

    // ========================================================================
    // Bucket moves
    // ========================================================================

    /// Same decimal in the following bucket.
    pub fn in_next_bucket(&self) -> RankResult<Self> {
        Self::new(&self.config, self.bucket.next(), self.decimal.clone())
    }

    /// Same decimal in the preceding bucket.
    pub fn in_prev_bucket(&self) -> RankResult<Self> {
        Self::new(&self.config, self.bucket.prev(), self.decimal.clone())
    }
}

/// Render a decimal with its radix point at index `max_order`.
///
/// Short integer parts are left-padded with the zero digit, and trailing zero
/// digits are dropped, so the radix point is always present and keys of one
/// configuration compare correctly as plain strings.
fn format_decimal(config: &RankConfig, decimal: &FixedDecimal) -> RankResult<String> {
    let system = config.system();
    let zero = system.to_char(0)?;
    let radix = system.radix_point_char();

    let mut formatted = decimal.format()?;
    let point = match formatted.chars().position(|ch| ch == radix) {
        Some(point) => point,
        None => {
            formatted.push(radix);
            formatted.chars().count() - 1
        },
    };

    let padding = config.max_order().saturating_sub(point);
    let mut key = String::with_capacity(formatted.len() + padding);
    key.extend(std::iter::repeat_n(zero, padding));
    key.push_str(formatted.trim_end_matches(zero));
    Ok(key)
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl PartialEq for Rank {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Rank {}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl Hash for Rank {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl fmt::Debug for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Rank").field(&self.key).finish()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Rank {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key)
    }
}
