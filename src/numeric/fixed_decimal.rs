// ============================================================================
// Fixed-Point Decimal
// Arbitrary-precision decimal as magnitude / base^scale
// ============================================================================

use super::big_integer::{BigInteger, Sign};
use crate::errors::{RankError, RankResult};
use crate::interfaces::SystemRef;
use std::cmp::Ordering;
use std::fmt;

/// Fixed-point decimal over a numeral system.
///
/// Represents `magnitude / base^scale`. Trailing fractional zero digits are
/// always stripped, so equal values share one representation and zero has
/// scale 0.
///
/// # Example
/// ```
/// use lexorank::numeric::{FixedDecimal, NumeralSystem10};
/// use std::sync::Arc;
///
/// let system: lexorank::interfaces::SystemRef = Arc::new(NumeralSystem10);
/// let x = FixedDecimal::parse("2.50", &system)?;
/// assert_eq!(x.scale(), 1);
/// assert_eq!(x.to_string(), "2.5");
/// # Ok::<(), lexorank::RankError>(())
/// ```
#[derive(Clone)]
pub struct FixedDecimal {
    mag: BigInteger,
    scale: usize,
}

impl FixedDecimal {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Canonicalize `integer / base^scale`.
    pub fn make(integer: BigInteger, scale: usize) -> Self {
        if integer.is_zero() {
            return Self {
                mag: integer,
                scale: 0,
            };
        }

        let zeros = (0..scale.min(integer.len()))
            .take_while(|&i| integer.digit(i) == 0)
            .count();

        Self {
            mag: integer.shift_right(zeros),
            scale: scale - zeros,
        }
    }

    #[inline]
    pub fn from_integer(integer: BigInteger) -> Self {
        Self::make(integer, 0)
    }

    pub fn zero(system: &SystemRef) -> Self {
        Self::from_integer(BigInteger::zero(system))
    }

    pub fn one(system: &SystemRef) -> Self {
        Self::from_integer(BigInteger::one(system))
    }

    /// One half in the given system (`0.5` in base 10, `0:i` in base 36).
    pub fn half(system: &SystemRef) -> Self {
        let digit = system.base() / 2;
        Self::make(
            BigInteger::canonical(system.clone(), Sign::Positive, smallvec::smallvec![digit]),
            1,
        )
    }

    /// Parse a decimal string with at most one radix point.
    ///
    /// # Errors
    /// - `MultipleRadixPoints` if the radix point appears more than once
    /// - `EmptyInput` / `InvalidChar` from the digit parser
    pub fn parse(s: &str, system: &SystemRef) -> RankResult<Self> {
        let radix = system.radix_point_char();
        let mut parts = s.splitn(3, radix);
        let int_part = parts.next().unwrap_or_default();

        match (parts.next(), parts.next()) {
            (None, _) => Ok(Self::from_integer(BigInteger::parse(s, system)?)),
            (Some(frac_part), None) => {
                let digits = format!("{int_part}{frac_part}");
                Ok(Self::make(
                    BigInteger::parse(&digits, system)?,
                    frac_part.chars().count(),
                ))
            },
            (Some(_), Some(_)) => Err(RankError::MultipleRadixPoints(radix)),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn system(&self) -> &SystemRef {
        self.mag.system()
    }

    /// Unscaled magnitude.
    #[inline]
    pub fn magnitude(&self) -> &BigInteger {
        &self.mag
    }

    /// Number of fractional digits.
    #[inline]
    pub fn scale(&self) -> usize {
        self.scale
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.mag.is_zero()
    }

    /// True when every fractional digit is zero.
    pub fn is_exact(&self) -> bool {
        (0..self.scale).all(|i| self.mag.digit(i) == 0)
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Shift the lower-scale magnitude up so both share one scale.
    fn align_scale(&self, other: &Self) -> (BigInteger, BigInteger, usize) {
        match self.scale.cmp(&other.scale) {
            Ordering::Less => (
                self.mag.shift_left(other.scale - self.scale),
                other.mag.clone(),
                other.scale,
            ),
            Ordering::Greater => (
                self.mag.clone(),
                other.mag.shift_left(self.scale - other.scale),
                self.scale,
            ),
            Ordering::Equal => (self.mag.clone(), other.mag.clone(), self.scale),
        }
    }

    /// # Errors
    /// Returns `IncompatibleSystem` if the operands have different bases.
    pub fn add(&self, other: &Self) -> RankResult<Self> {
        let (lhs, rhs, scale) = self.align_scale(other);
        Ok(Self::make(lhs.add(&rhs)?, scale))
    }

    /// # Errors
    /// Returns `IncompatibleSystem` if the operands have different bases.
    pub fn subtract(&self, other: &Self) -> RankResult<Self> {
        let (lhs, rhs, scale) = self.align_scale(other);
        Ok(Self::make(lhs.subtract(&rhs)?, scale))
    }

    /// # Errors
    /// Returns `IncompatibleSystem` if the operands have different bases.
    pub fn multiply(&self, other: &Self) -> RankResult<Self> {
        Ok(Self::make(
            self.mag.multiply(&other.mag)?,
            self.scale + other.scale,
        ))
    }

    /// Integer part, truncating the fractional digits.
    pub fn floor(&self) -> BigInteger {
        self.mag.shift_right(self.scale)
    }

    /// Integer part, adding one unit when the value is not exact.
    pub fn ceil(&self) -> RankResult<BigInteger> {
        let floor = self.floor();
        if self.is_exact() {
            return Ok(floor);
        }
        floor.add(&BigInteger::one(self.system()))
    }

    /// Reduce precision to `new_scale` fractional digits.
    ///
    /// Truncates, then adds one unit at the new scale if `round_up`. A
    /// `new_scale` at or above the current scale returns the value unchanged.
    pub fn set_scale(&self, new_scale: usize, round_up: bool) -> RankResult<Self> {
        if new_scale >= self.scale {
            return Ok(self.clone());
        }

        let mut mag = self.mag.shift_right(self.scale - new_scale);
        if round_up {
            mag = mag.add(&BigInteger::one(self.system()))?;
        }
        Ok(Self::make(mag, new_scale))
    }

    /// # Errors
    /// Returns `IncompatibleSystem` if the operands have different bases.
    pub fn compare(&self, other: &Self) -> RankResult<Ordering> {
        let (lhs, rhs, _) = self.align_scale(other);
        lhs.compare(&rhs)
    }

    // ========================================================================
    // Formatting
    // ========================================================================

    /// Digits with the radix point inserted `scale` digits from the right.
    ///
    /// Values below one get a single leading zero digit (`0:i`).
    pub fn format(&self) -> RankResult<String> {
        let int_str = self.mag.format()?;
        if self.scale == 0 {
            return Ok(int_str);
        }

        let system = self.system();
        let (head, digits) = match int_str.strip_prefix(system.negative_char()) {
            Some(rest) => (Some(system.negative_char()), rest),
            None => (None, int_str.as_str()),
        };

        let digit_count = digits.chars().count();
        let padding = (self.scale + 1).saturating_sub(digit_count);
        let point = digit_count + padding - self.scale;
        let zero = system.to_char(0)?;

        let mut out = String::with_capacity(digit_count + padding + 2);
        out.extend(head);
        for (i, ch) in std::iter::repeat_n(zero, padding)
            .chain(digits.chars())
            .enumerate()
        {
            if i == point {
                out.push(system.radix_point_char());
            }
            out.push(ch);
        }
        Ok(out)
    }
}

// ============================================================================
// Conversion from rust_decimal (for API boundaries)
// ============================================================================

impl FixedDecimal {
    fn require_base10(system: &SystemRef) -> RankResult<()> {
        if system.base() != 10 {
            return Err(RankError::IncompatibleSystem {
                left: 10,
                right: system.base(),
            });
        }
        Ok(())
    }

    /// Convert from rust_decimal::Decimal into a base-10 system.
    ///
    /// # Errors
    /// Returns `IncompatibleSystem` unless `system` has base 10.
    pub fn from_decimal(d: rust_decimal::Decimal, system: &SystemRef) -> RankResult<Self> {
        Self::require_base10(system)?;
        Ok(Self::make(
            BigInteger::from_i128(d.mantissa(), system),
            d.scale() as usize,
        ))
    }

    /// Convert a base-10 decimal to rust_decimal::Decimal.
    ///
    /// # Errors
    /// - `IncompatibleSystem` unless the decimal uses base 10
    /// - `Overflow` if the value exceeds rust_decimal's 96-bit mantissa or scale 28
    pub fn to_decimal(&self) -> RankResult<rust_decimal::Decimal> {
        Self::require_base10(self.system())?;
        let scale = u32::try_from(self.scale).map_err(|_| RankError::Overflow)?;
        rust_decimal::Decimal::try_from_i128_with_scale(self.mag.to_i128()?, scale)
            .map_err(|_| RankError::Overflow)
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl PartialEq for FixedDecimal {
    fn eq(&self, other: &Self) -> bool {
        self.scale == other.scale && self.mag == other.mag
    }
}

impl Eq for FixedDecimal {}

impl PartialOrd for FixedDecimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

impl fmt::Display for FixedDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format().map_err(|_| fmt::Error)?)
    }
}

impl fmt::Debug for FixedDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FixedDecimal<{}>({}, scale={})",
            self.system().name(),
            self,
            self.scale
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
