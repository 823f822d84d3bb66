// ============================================================================
// Ranker Factory
// Creates rankers from options with proper validation
// ============================================================================

use crate::domain::config::{RankConfig, RankOptions};
use crate::engine::Ranker;
use crate::errors::RankResult;
use crate::numeric::NumeralSystemKind;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a ranker from options
///
/// # Errors
/// Returns `InvalidConfig` (or an alphabet error) if the options do not
/// describe a usable key space.
///
/// # Example
/// ```
/// use lexorank::prelude::*;
///
/// let ranker = create_from_config(RankOptions::base64())?;
/// assert_eq!(ranker.middle().format(), "0|Vzzzzzzz:");
/// # Ok::<(), lexorank::RankError>(())
/// ```
pub fn create_from_config(options: RankOptions) -> RankResult<Ranker> {
    let config = RankConfig::from_options(&options)?;
    Ranker::new(config)
}

// ============================================================================
// Builder Pattern
// ============================================================================

/// Builder for creating rankers with fluent API
///
/// # Example
/// ```
/// use lexorank::prelude::*;
///
/// let ranker = RankerBuilder::new()
///     .alphabet("0123456789abcdef")
///     .max_order(4)
///     .default_gap("10")
///     .build()?;
///
/// assert_eq!(ranker.max().format(), "0|ffff:");
/// assert_eq!(ranker.min().gen_next()?.format(), "0|1000:");
/// # Ok::<(), lexorank::RankError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RankerBuilder {
    options: RankOptions,
}

impl RankerBuilder {
    /// Start from the default base-36 options
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Numeral System
    // ========================================================================

    pub fn numeral_system(mut self, kind: NumeralSystemKind) -> Self {
        self.options.numeral_system = kind;
        self
    }

    /// Use a custom alphabet with the default `:` radix point
    pub fn alphabet(mut self, chars: impl Into<String>) -> Self {
        self.options.numeral_system = NumeralSystemKind::Alphabet {
            chars: chars.into(),
            radix_point: None,
        };
        self
    }

    /// Use a custom alphabet and radix point
    pub fn alphabet_with_radix_point(mut self, chars: impl Into<String>, radix_point: char) -> Self {
        self.options.numeral_system = NumeralSystemKind::Alphabet {
            chars: chars.into(),
            radix_point: Some(radix_point),
        };
        self
    }

    // ========================================================================
    // Key Space
    // ========================================================================

    pub fn default_gap(mut self, gap: impl Into<String>) -> Self {
        self.options = self.options.with_default_gap(gap);
        self
    }

    /// Number of integer digits per key
    pub fn max_order(mut self, digits: usize) -> Self {
        self.options = self.options.with_max_order(digits);
        self
    }

    /// Exclusive ceiling, written in the chosen numeral system
    pub fn max_decimal(mut self, max_decimal: impl Into<String>) -> Self {
        self.options = self.options.with_max_decimal(max_decimal);
        self
    }

    pub fn initial_min(mut self, initial_min: impl Into<String>) -> Self {
        self.options = self.options.with_initial_min(initial_min);
        self
    }

    pub fn initial_max(mut self, initial_max: impl Into<String>) -> Self {
        self.options = self.options.with_initial_max(initial_max);
        self
    }

    // ========================================================================
    // Preset Configurations
    // ========================================================================

    pub fn base10() -> Self {
        Self {
            options: RankOptions::base10(),
        }
    }

    pub fn base36() -> Self {
        Self {
            options: RankOptions::base36(),
        }
    }

    pub fn base64() -> Self {
        Self {
            options: RankOptions::base64(),
        }
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the ranker
    ///
    /// # Errors
    /// Same as [`create_from_config`].
    pub fn build(self) -> RankResult<Ranker> {
        create_from_config(self.options)
    }

    /// Get the options without building (for inspection)
    pub fn options(&self) -> &RankOptions {
        &self.options
    }
}

impl From<RankOptions> for RankerBuilder {
    fn from(options: RankOptions) -> Self {
        Self { options }
    }
}
