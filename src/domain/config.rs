// ============================================================================
// Rank Configuration
// User-facing options and the derived, immutable rank configuration
// ============================================================================

use crate::engine::midpoint;
use crate::errors::{RankError, RankResult};
use crate::interfaces::SystemRef;
use crate::numeric::{BigInteger, FixedDecimal, NumeralSystemKind, Sign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Precision
// ============================================================================

/// Size of the integer key space.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Precision {
    /// `n` integer digits: the largest rank decimal is `base^n - 1`.
    /// At most [`MAX_ORDER_LIMIT`]
    Digits(usize),

    /// Exclusive ceiling written in the configured numeral system
    /// (`"1000000"` in base 36 is the same as `Digits(6)`)
    MaxDecimal(String),
}

/// Largest supported number of integer digits per key.
pub const MAX_ORDER_LIMIT: usize = 1024;

impl Default for Precision {
    fn default() -> Self {
        Precision::Digits(6)
    }
}

// ============================================================================
// Rank Options
// ============================================================================

/// Plain-data description of a rank key space.
///
/// Every field has a default; the derived values live in [`RankConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RankOptions {
    /// Alphabet used for every digit of the key
    pub numeral_system: NumeralSystemKind,

    /// Integer step used by `gen_next`/`gen_prev`
    pub default_gap: String,

    /// Size of the integer key space
    pub precision: Precision,

    /// First rank handed out after the minimum.
    /// None means `1` followed by `max_order - 1` zeros
    pub initial_min: Option<String>,

    /// First rank handed out before the maximum.
    /// None means the second-largest digit followed by `max_order - 1` zeros
    pub initial_max: Option<String>,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            numeral_system: NumeralSystemKind::Base36,
            default_gap: "8".to_string(),
            precision: Precision::default(),
            initial_min: None,
            initial_max: None,
        }
    }
}

impl RankOptions {
    pub fn new(numeral_system: NumeralSystemKind) -> Self {
        Self {
            numeral_system,
            ..Self::default()
        }
    }

    /// Builder method: Set the numeral system
    pub fn with_numeral_system(mut self, numeral_system: NumeralSystemKind) -> Self {
        self.numeral_system = numeral_system;
        self
    }

    /// Builder method: Set the generation gap
    pub fn with_default_gap(mut self, gap: impl Into<String>) -> Self {
        self.default_gap = gap.into();
        self
    }

    /// Builder method: Use `digits` integer digits
    pub fn with_max_order(mut self, digits: usize) -> Self {
        self.precision = Precision::Digits(digits);
        self
    }

    /// Builder method: Use an explicit exclusive ceiling
    pub fn with_max_decimal(mut self, max_decimal: impl Into<String>) -> Self {
        self.precision = Precision::MaxDecimal(max_decimal.into());
        self
    }

    pub fn with_initial_min(mut self, initial_min: impl Into<String>) -> Self {
        self.initial_min = Some(initial_min.into());
        self
    }

    pub fn with_initial_max(mut self, initial_max: impl Into<String>) -> Self {
        self.initial_max = Some(initial_max.into());
        self
    }

    /// Validate the options by deriving a configuration from them.
    ///
    /// # Errors
    /// Returns the same errors as [`RankConfig::from_options`].
    pub fn validate(&self) -> RankResult<()> {
        RankConfig::from_options(self).map(|_| ())
    }

    /// Load options from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns `InvalidConfig` carrying the deserializer message.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> RankResult<Self> {
        serde_json::from_str(json).map_err(|e| RankError::invalid_config(e.to_string()))
    }
}

// ============================================================================
// Preset Options (Factory Methods)
// ============================================================================

impl RankOptions {
    /// Decimal digits, `.` radix point, six integer digits
    pub fn base10() -> Self {
        Self::new(NumeralSystemKind::Base10)
    }

    /// `0-9a-z`, six integer digits, gap 8
    pub fn base36() -> Self {
        Self::default()
    }

    /// `0-9A-Z^_a-z`, eight integer digits, gap `1000`, initial minimum `1000`
    pub fn base64() -> Self {
        Self::new(NumeralSystemKind::Base64)
            .with_default_gap("1000")
            .with_max_decimal("100000000")
            .with_initial_min("1000")
    }
}

// ============================================================================
// Rank Configuration
// ============================================================================

/// Immutable key-space parameters shared by every rank of one ranker.
#[derive(Debug, Clone)]
pub struct RankConfig {
    system: SystemRef,
    max_order: usize,
    zero: FixedDecimal,
    one: FixedDecimal,
    default_gap: FixedDecimal,
    min: FixedDecimal,
    max: FixedDecimal,
    initial_min: FixedDecimal,
    initial_max: FixedDecimal,
    middle: FixedDecimal,
}

impl RankConfig {
    /// Derive the configuration described by `options`.
    ///
    /// # Errors
    /// - `InvalidConfig` if a value does not parse, the gap is not positive,
    ///   the key space is empty, fractional or wider than
    ///   [`MAX_ORDER_LIMIT`] digits, an initial anchor lies outside the open
    ///   interval `(min, max)`, or the initial minimum exceeds the initial
    ///   maximum
    /// - Alphabet validation errors from the numeral system
    pub fn from_options(options: &RankOptions) -> RankResult<Self> {
        let system = options.numeral_system.instantiate()?;
        let zero = FixedDecimal::zero(&system);
        let one = FixedDecimal::one(&system);

        let default_gap = parse_option("default gap", &options.default_gap, &system)?;
        if default_gap <= zero {
            return Err(RankError::invalid_config(format!(
                "default gap must be positive, got {}",
                options.default_gap
            )));
        }

        let (max, max_order) = match &options.precision {
            Precision::Digits(0) => {
                return Err(RankError::invalid_config("max order must be at least 1"));
            },
            Precision::Digits(n) if *n > MAX_ORDER_LIMIT => {
                return Err(RankError::invalid_config(format!(
                    "max order must be at most {MAX_ORDER_LIMIT}, got {n}"
                )));
            },
            Precision::Digits(n) => {
                let ceiling = BigInteger::one(&system).shift_left(*n);
                (FixedDecimal::from_integer(ceiling).subtract(&one)?, *n)
            },
            Precision::MaxDecimal(s) => {
                let max = parse_option("max decimal", s, &system)?.subtract(&one)?;
                if max <= zero || max.scale() > 0 {
                    return Err(RankError::invalid_config(format!(
                        "max decimal must be an integer greater than one, got {s}"
                    )));
                }
                let order = max.floor().len();
                if order > MAX_ORDER_LIMIT {
                    return Err(RankError::invalid_config(format!(
                        "max decimal must have at most {MAX_ORDER_LIMIT} digits, got {order}"
                    )));
                }
                (max, order)
            },
        };
        let min = zero.clone();

        let initial_min = match &options.initial_min {
            Some(s) => parse_option("initial min", s, &system)?,
            None => {
                FixedDecimal::from_integer(BigInteger::one(&system).shift_left(max_order - 1))
            },
        };
        let initial_max = match &options.initial_max {
            Some(s) => parse_option("initial max", s, &system)?,
            None => {
                let lead = BigInteger::make(&system, Sign::Positive, &[system.base() - 2])?;
                FixedDecimal::from_integer(lead.shift_left(max_order - 1))
            },
        };

        for (name, anchor) in [("initial min", &initial_min), ("initial max", &initial_max)] {
            if *anchor <= min || *anchor >= max {
                return Err(RankError::invalid_config(format!(
                    "{name} {anchor} must lie strictly between {min} and {max}"
                )));
            }
        }

        if initial_min > initial_max {
            return Err(RankError::invalid_config(format!(
                "initial min {initial_min} must not exceed initial max {initial_max}"
            )));
        }

        let middle = midpoint::between(&min, &max)?;

        tracing::debug!(
            system = system.name(),
            base = system.base(),
            max_order,
            %max,
            %initial_min,
            %initial_max,
            "derived rank configuration"
        );

        Ok(Self {
            system,
            max_order,
            zero,
            one,
            default_gap,
            min,
            max,
            initial_min,
            initial_max,
            middle,
        })
    }

    #[inline]
    pub fn system(&self) -> &SystemRef {
        &self.system
    }

    /// Number of integer digits every formatted key is padded to.
    #[inline]
    pub fn max_order(&self) -> usize {
        self.max_order
    }

    pub fn zero(&self) -> &FixedDecimal {
        &self.zero
    }

    pub fn one(&self) -> &FixedDecimal {
        &self.one
    }

    pub fn default_gap(&self) -> &FixedDecimal {
        &self.default_gap
    }

    pub fn min(&self) -> &FixedDecimal {
        &self.min
    }

    pub fn max(&self) -> &FixedDecimal {
        &self.max
    }

    pub fn initial_min(&self) -> &FixedDecimal {
        &self.initial_min
    }

    pub fn initial_max(&self) -> &FixedDecimal {
        &self.initial_max
    }

    /// Shortest decimal between `min` and `max`.
    pub fn middle(&self) -> &FixedDecimal {
        &self.middle
    }
}

fn parse_option(name: &str, value: &str, system: &SystemRef) -> RankResult<FixedDecimal> {
    FixedDecimal::parse(value, system)
        .map_err(|e| RankError::invalid_config(format!("{name} {value:?}: {e}")))
}
