// ============================================================================
// Big Integer
// Arbitrary-precision signed integer over a pluggable numeral system
// ============================================================================

use crate::errors::{RankError, RankResult};
use crate::interfaces::{Digit, SystemRef};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;
use std::sync::Arc;

/// Digit storage, least-significant digit first.
///
/// Rank keys rarely exceed a dozen digits, so they stay inline.
pub type Magnitude = SmallVec<[Digit; 12]>;

/// Sign of a [`BigInteger`]. Ordered `Negative < Zero < Positive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    #[inline]
    fn flip(self) -> Self {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }
}

/// Arbitrary-precision signed integer.
///
/// The magnitude never carries most-significant zero digits, and zero is
/// always `[0]` with `Sign::Zero`. Every constructor goes through
/// [`BigInteger::canonical`] to keep that invariant.
#[derive(Clone)]
pub struct BigInteger {
    system: SystemRef,
    sign: Sign,
    mag: Magnitude,
}

// ============================================================================
// Digit-array primitives
// ============================================================================

fn add_mag(base: Digit, l: &[Digit], r: &[Digit]) -> Magnitude {
    let len = l.len().max(r.len());
    let mut result = Magnitude::with_capacity(len + 1);
    let mut carry = 0;

    for i in 0..len {
        let sum = l.get(i).copied().unwrap_or(0) + r.get(i).copied().unwrap_or(0) + carry;
        if sum >= base {
            result.push(sum - base);
            carry = 1;
        } else {
            result.push(sum);
            carry = 0;
        }
    }

    if carry > 0 {
        result.push(carry);
    }
    result
}

/// Radix complement of `mag` widened (or cut) to `digits` digits.
fn complement_mag(base: Digit, mag: &[Digit], digits: usize) -> Magnitude {
    (0..digits)
        .map(|i| base - 1 - mag.get(i).copied().unwrap_or(0))
        .collect()
}

/// `l - r` for `l > r`, via `l + complement(r) - base^n + 1`.
fn subtract_mag(base: Digit, l: &[Digit], r: &[Digit]) -> Magnitude {
    let r_complement = complement_mag(base, r, l.len());
    let mut sum = add_mag(base, l, &r_complement);
    // drop the overflow digit
    sum.truncate(l.len());
    add_mag(base, &sum, &[1])
}

fn multiply_mag(base: Digit, l: &[Digit], r: &[Digit]) -> Magnitude {
    let base = u64::from(base);
    let mut acc = vec![0u64; l.len() + r.len()];

    for (li, &ld) in l.iter().enumerate() {
        let mut carry = 0u64;
        for (ri, &rd) in r.iter().enumerate() {
            let cur = acc[li + ri] + u64::from(ld) * u64::from(rd) + carry;
            acc[li + ri] = cur % base;
            carry = cur / base;
        }

        let mut index = li + r.len();
        while carry > 0 {
            let cur = acc[index] + carry;
            acc[index] = cur % base;
            carry = cur / base;
            index += 1;
        }
    }

    acc.into_iter().map(|d| d as Digit).collect()
}

fn compare_mag(l: &[Digit], r: &[Digit]) -> Ordering {
    l.len()
        .cmp(&r.len())
        .then_with(|| l.iter().rev().cmp(r.iter().rev()))
}

impl BigInteger {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Canonicalizing constructor for digits already known to be in range.
    ///
    /// Trims most-significant zeros and collapses an all-zero magnitude to the
    /// canonical zero. A non-zero magnitude given `Sign::Zero` is positive.
    pub(crate) fn canonical(system: SystemRef, sign: Sign, mut mag: Magnitude) -> Self {
        while mag.last() == Some(&0) {
            mag.pop();
        }

        if mag.is_empty() {
            return Self::zero(&system);
        }

        let sign = if sign == Sign::Zero { Sign::Positive } else { sign };
        Self { system, sign, mag }
    }

    /// Build an integer from least-significant-first digits.
    ///
    /// # Errors
    /// Returns `InvalidDigit` if any digit is outside `[0, base)`.
    pub fn make(system: &SystemRef, sign: Sign, digits: &[Digit]) -> RankResult<Self> {
        let base = system.base();
        if let Some(&digit) = digits.iter().find(|&&d| d >= base) {
            return Err(RankError::InvalidDigit(digit));
        }
        Ok(Self::canonical(
            Arc::clone(system),
            sign,
            Magnitude::from_slice(digits),
        ))
    }

    pub fn zero(system: &SystemRef) -> Self {
        Self {
            system: Arc::clone(system),
            sign: Sign::Zero,
            mag: smallvec::smallvec![0],
        }
    }

    pub fn one(system: &SystemRef) -> Self {
        Self {
            system: Arc::clone(system),
            sign: Sign::Positive,
            mag: smallvec::smallvec![1],
        }
    }

    /// Parse an optionally signed digit string, most-significant digit first.
    ///
    /// # Errors
    /// - `EmptyInput` if there are no digits
    /// - `InvalidChar` for characters outside the alphabet
    pub fn parse(s: &str, system: &SystemRef) -> RankResult<Self> {
        let (sign, digits) = if let Some(rest) = s.strip_prefix(system.positive_char()) {
            (Sign::Positive, rest)
        } else if let Some(rest) = s.strip_prefix(system.negative_char()) {
            (Sign::Negative, rest)
        } else {
            (Sign::Positive, s)
        };

        if digits.is_empty() {
            return Err(RankError::EmptyInput);
        }

        let mag = digits
            .chars()
            .rev()
            .map(|ch| system.to_digit(ch))
            .collect::<RankResult<Magnitude>>()?;

        Ok(Self::canonical(Arc::clone(system), sign, mag))
    }

    /// Convert a primitive integer into the given numeral system.
    pub fn from_i128(value: i128, system: &SystemRef) -> Self {
        let sign = match value.cmp(&0) {
            Ordering::Less => Sign::Negative,
            Ordering::Equal => return Self::zero(system),
            Ordering::Greater => Sign::Positive,
        };

        let base = u128::from(system.base());
        let mut rest = value.unsigned_abs();
        let mut mag = Magnitude::new();
        while rest > 0 {
            mag.push((rest % base) as Digit);
            rest /= base;
        }

        Self::canonical(Arc::clone(system), sign, mag)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn system(&self) -> &SystemRef {
        &self.system
    }

    #[inline]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Digit at `index` (least significant first); zero past the end.
    #[inline]
    pub fn digit(&self, index: usize) -> Digit {
        self.mag.get(index).copied().unwrap_or(0)
    }

    /// Number of significant digits (zero has one).
    #[inline]
    pub fn len(&self) -> usize {
        self.mag.len()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.sign == Sign::Zero
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.sign == Sign::Positive && self.is_oneish()
    }

    #[inline]
    fn is_oneish(&self) -> bool {
        self.mag.as_slice() == [1]
    }

    #[inline]
    fn base(&self) -> Digit {
        self.system.base()
    }

    fn check_system(&self, other: &Self) -> RankResult<()> {
        if self.base() != other.base() {
            return Err(RankError::IncompatibleSystem {
                left: self.base(),
                right: other.base(),
            });
        }
        Ok(())
    }

    /// Convert back to a primitive integer.
    ///
    /// # Errors
    /// Returns `Overflow` if the value does not fit in an `i128`.
    pub fn to_i128(&self) -> RankResult<i128> {
        let base = u128::from(self.base());
        let magnitude = self.mag.iter().rev().try_fold(0u128, |acc, &d| {
            acc.checked_mul(base)
                .and_then(|acc| acc.checked_add(u128::from(d)))
                .ok_or(RankError::Overflow)
        })?;

        match self.sign {
            Sign::Negative if magnitude <= i128::MIN.unsigned_abs() => {
                Ok((magnitude as i128).wrapping_neg())
            },
            Sign::Negative => Err(RankError::Overflow),
            _ => i128::try_from(magnitude).map_err(|_| RankError::Overflow),
        }
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// # Errors
    /// Returns `IncompatibleSystem` if the operands have different bases.
    pub fn add(&self, other: &Self) -> RankResult<Self> {
        self.check_system(other)?;
        if self.is_zero() {
            return Ok(other.clone());
        }
        if other.is_zero() {
            return Ok(self.clone());
        }

        if self.sign != other.sign {
            if self.sign == Sign::Negative {
                // -a + b == -(a - b)
                return Ok(self.negate().subtract(other)?.negate());
            }
            return self.subtract(&other.negate());
        }

        let mag = add_mag(self.base(), &self.mag, &other.mag);
        Ok(Self::canonical(Arc::clone(&self.system), self.sign, mag))
    }

    /// # Errors
    /// Returns `IncompatibleSystem` if the operands have different bases.
    pub fn subtract(&self, other: &Self) -> RankResult<Self> {
        self.check_system(other)?;
        if self.is_zero() {
            return Ok(other.negate());
        }
        if other.is_zero() {
            return Ok(self.clone());
        }

        if self.sign != other.sign {
            if self.sign == Sign::Negative {
                // -a - b == -(a + b)
                return Ok(self.negate().add(other)?.negate());
            }
            return self.add(&other.negate());
        }

        let base = self.base();
        let system = Arc::clone(&self.system);
        Ok(match compare_mag(&self.mag, &other.mag) {
            Ordering::Equal => Self::zero(&system),
            Ordering::Less => Self::canonical(
                system,
                self.sign.flip(),
                subtract_mag(base, &other.mag, &self.mag),
            ),
            Ordering::Greater => {
                Self::canonical(system, self.sign, subtract_mag(base, &self.mag, &other.mag))
            },
        })
    }

    /// # Errors
    /// Returns `IncompatibleSystem` if the operands have different bases.
    pub fn multiply(&self, other: &Self) -> RankResult<Self> {
        self.check_system(other)?;
        if self.is_zero() || other.is_zero() {
            return Ok(Self::zero(&self.system));
        }

        let sign = if self.sign == other.sign {
            Sign::Positive
        } else {
            Sign::Negative
        };

        let mag = if self.is_oneish() {
            other.mag.clone()
        } else if other.is_oneish() {
            self.mag.clone()
        } else {
            multiply_mag(self.base(), &self.mag, &other.mag)
        };

        Ok(Self::canonical(Arc::clone(&self.system), sign, mag))
    }

    pub fn negate(&self) -> Self {
        let mut negated = self.clone();
        negated.sign = self.sign.flip();
        negated
    }

    /// Multiply by `base^times`.
    pub fn shift_left(&self, times: usize) -> Self {
        if times == 0 || self.is_zero() {
            return self.clone();
        }

        let mut mag = Magnitude::with_capacity(self.mag.len() + times);
        mag.extend(std::iter::repeat_n(0, times));
        mag.extend_from_slice(&self.mag);
        Self::canonical(Arc::clone(&self.system), self.sign, mag)
    }

    /// Divide by `base^times`, truncating toward zero.
    pub fn shift_right(&self, times: usize) -> Self {
        if self.mag.len() <= times {
            return Self::zero(&self.system);
        }

        let mag = Magnitude::from_slice(&self.mag[times..]);
        Self::canonical(Arc::clone(&self.system), self.sign, mag)
    }

    /// Radix complement of the magnitude over its own digit count.
    pub fn complement(&self) -> Self {
        self.complement_digits(self.mag.len())
    }

    /// Radix complement of the magnitude over `digits` digits.
    ///
    /// Digits above `digits` are dropped; `digits == 0` yields zero.
    pub fn complement_digits(&self, digits: usize) -> Self {
        Self::canonical(
            Arc::clone(&self.system),
            self.sign,
            complement_mag(self.base(), &self.mag, digits),
        )
    }

    // ========================================================================
    // Comparison and formatting
    // ========================================================================

    /// # Errors
    /// Returns `IncompatibleSystem` if the operands have different bases.
    pub fn compare(&self, other: &Self) -> RankResult<Ordering> {
        self.check_system(other)?;
        Ok(match (self.sign, other.sign) {
            (Sign::Positive, Sign::Positive) => compare_mag(&self.mag, &other.mag),
            (Sign::Negative, Sign::Negative) => compare_mag(&other.mag, &self.mag),
            (lhs, rhs) => lhs.cmp(&rhs),
        })
    }

    /// Most-significant-first digit string with an optional negative sign.
    ///
    /// # Errors
    /// Returns `InvalidDigit` if a digit has no character in the system.
    pub fn format(&self) -> RankResult<String> {
        let mut out = String::with_capacity(self.mag.len() + 1);
        if self.sign == Sign::Negative {
            out.push(self.system.negative_char());
        }
        for &digit in self.mag.iter().rev() {
            out.push(self.system.to_char(digit)?);
        }
        Ok(out)
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl PartialEq for BigInteger {
    fn eq(&self, other: &Self) -> bool {
        self.base() == other.base() && self.sign == other.sign && self.mag == other.mag
    }
}

impl Eq for BigInteger {}

impl PartialOrd for BigInteger {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

impl Neg for &BigInteger {
    type Output = BigInteger;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Neg for BigInteger {
    type Output = BigInteger;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format().map_err(|_| fmt::Error)?)
    }
}

impl fmt::Debug for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BigInteger<{}>({:?}, mag={:?})",
            self.system.name(),
            self.sign,
            self.mag.as_slice()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{NumeralSystem10, NumeralSystem36, NumeralSystem64};
    use proptest::prelude::*;

    fn systems() -> Vec<SystemRef> {
        vec![
            Arc::new(NumeralSystem10),
            Arc::new(NumeralSystem36),
            Arc::new(NumeralSystem64),
        ]
    }

    fn int(value: i128, system: &SystemRef) -> BigInteger {
        BigInteger::from_i128(value, system)
    }

    #[test]
    fn test_special_values() {
        for system in systems() {
            let zero = BigInteger::zero(&system);
            assert!(zero.is_zero());
            assert!(!zero.is_one());
            assert_eq!(zero.sign(), Sign::Zero);

            let one = BigInteger::one(&system);
            assert!(one.is_one());
            assert!(!one.is_zero());
        }
    }

    #[test]
    fn test_parse() {
        for system in systems() {
            let expected = BigInteger::make(&system, Sign::Positive, &[2, 4]).unwrap();
            assert_eq!(BigInteger::parse("42", &system).unwrap(), expected);
            assert_eq!(BigInteger::parse("+42", &system).unwrap(), expected);
            assert_eq!(
                BigInteger::parse("-42", &system).unwrap(),
                BigInteger::make(&system, Sign::Negative, &[2, 4]).unwrap()
            );
            assert_eq!(
                BigInteger::parse("?", &system),
                Err(RankError::InvalidChar('?'))
            );
            assert_eq!(BigInteger::parse("-", &system), Err(RankError::EmptyInput));
        }
    }

    #[test]
    fn test_make_canonicalizes() {
        let system: SystemRef = Arc::new(NumeralSystem10);

        let trimmed = BigInteger::make(&system, Sign::Positive, &[5, 0, 0]).unwrap();
        assert_eq!(trimmed.len(), 1);
        assert_eq!(trimmed.to_string(), "5");

        let zero = BigInteger::make(&system, Sign::Negative, &[0, 0]).unwrap();
        assert!(zero.is_zero());
        assert_eq!(zero, BigInteger::zero(&system));
        assert_eq!(BigInteger::parse("-000", &system).unwrap(), zero);

        assert_eq!(
            BigInteger::make(&system, Sign::Positive, &[10]),
            Err(RankError::InvalidDigit(10))
        );
    }

    #[test]
    fn test_arithmetic() {
        for system in [
            Arc::new(NumeralSystem10) as SystemRef,
            Arc::new(NumeralSystem36),
        ] {
            let first = int(42, &system);
            let second = int(314, &system);
            let third = int(-19, &system);
            let zero = BigInteger::zero(&system);
            let one = BigInteger::one(&system);
            let minus_one = int(-1, &system);

            // Add
            assert_eq!(first.add(&zero).unwrap(), first);
            assert_eq!(zero.add(&first).unwrap(), first);
            assert_eq!(first.add(&second).unwrap(), int(356, &system));
            assert_eq!(first.add(&third).unwrap(), int(23, &system));
            assert_eq!(third.add(&first).unwrap(), int(23, &system));

            // Subtract
            assert_eq!(zero.subtract(&first).unwrap(), int(-42, &system));
            assert_eq!(first.subtract(&zero).unwrap(), first);
            assert_eq!(first.subtract(&first).unwrap(), zero);
            assert_eq!(first.subtract(&third).unwrap(), int(61, &system));
            assert_eq!(third.subtract(&first).unwrap(), int(-61, &system));

            // Multiply
            assert_eq!(zero.multiply(&first).unwrap(), zero);
            assert_eq!(first.multiply(&zero).unwrap(), zero);
            assert_eq!(one.multiply(&first).unwrap(), first);
            assert_eq!(first.multiply(&one).unwrap(), first);
            assert_eq!(minus_one.multiply(&first).unwrap(), int(-42, &system));
            assert_eq!(first.multiply(&minus_one).unwrap(), int(-42, &system));
            assert_eq!(first.multiply(&third).unwrap(), int(-798, &system));

            // Negate
            assert_eq!(zero.negate(), zero);
            assert_eq!(one.negate(), minus_one);
            assert_eq!(-&one, minus_one);
        }
    }

    #[test]
    fn test_compare() {
        let system: SystemRef = Arc::new(NumeralSystem36);
        let first = int(42, &system);
        let third = int(-19, &system);

        assert_eq!(first.compare(&first), Ok(Ordering::Equal));
        assert_eq!(third.compare(&third), Ok(Ordering::Equal));
        assert_eq!(third.compare(&first), Ok(Ordering::Less));
        assert_eq!(first.compare(&third), Ok(Ordering::Greater));
        assert_eq!(third.compare(&int(-42, &system)), Ok(Ordering::Greater));
        assert_eq!(int(-42, &system).compare(&third), Ok(Ordering::Less));
        assert!(BigInteger::zero(&system) < first);
        assert!(third < BigInteger::zero(&system));
    }

    #[test]
    fn test_format() {
        let ten: SystemRef = Arc::new(NumeralSystem10);
        let b36: SystemRef = Arc::new(NumeralSystem36);

        assert_eq!(int(42, &ten).to_string(), "42");
        assert_eq!(int(-19, &ten).to_string(), "-19");
        assert_eq!(int(42, &b36).to_string(), "16");
        assert_eq!(int(-19, &b36).to_string(), "-j");
        assert_eq!(BigInteger::zero(&b36).to_string(), "0");
    }

    #[test]
    fn test_shifts() {
        let system: SystemRef = Arc::new(NumeralSystem10);
        let x = int(123, &system);

        assert_eq!(x.shift_left(2), int(12300, &system));
        assert_eq!(x.shift_right(1), int(12, &system));
        assert_eq!(x.shift_right(3), BigInteger::zero(&system));
        assert_eq!(x.shift_right(10), BigInteger::zero(&system));
        assert_eq!(int(-123, &system).shift_right(2), int(-1, &system));
        assert_eq!(BigInteger::zero(&system).shift_left(3), BigInteger::zero(&system));
    }

    #[test]
    fn test_complement() {
        let system: SystemRef = Arc::new(NumeralSystem10);

        assert_eq!(int(123, &system).complement(), int(876, &system));
        assert_eq!(int(123, &system).complement_digits(5), int(99876, &system));
        assert_eq!(int(999, &system).complement(), BigInteger::zero(&system));
        assert_eq!(int(123, &system).complement_digits(0), BigInteger::zero(&system));
    }

    #[test]
    fn test_incompatible_systems() {
        let ten: SystemRef = Arc::new(NumeralSystem10);
        let b36: SystemRef = Arc::new(NumeralSystem36);
        let err = Err(RankError::IncompatibleSystem { left: 10, right: 36 });

        let a = int(5, &ten);
        let b = int(5, &b36);
        assert_eq!(a.add(&b), err);
        assert_eq!(a.subtract(&b), err);
        assert_eq!(a.multiply(&b), err);
        assert_eq!(a.compare(&b), Err(RankError::IncompatibleSystem { left: 10, right: 36 }));
        assert_ne!(a, b);
        assert_eq!(a.partial_cmp(&b), None);
    }

    #[test]
    fn test_i128_conversion() {
        let system: SystemRef = Arc::new(NumeralSystem64);
        for value in [0, 1, -1, 63, 64, -4096, i128::MAX, i128::MIN] {
            assert_eq!(int(value, &system).to_i128(), Ok(value));
        }

        let huge = BigInteger::one(&system).shift_left(40);
        assert_eq!(huge.to_i128(), Err(RankError::Overflow));
    }

    proptest! {
        #[test]
        fn arithmetic_matches_i128(a in -1_000_000_000i64..1_000_000_000, b in -1_000_000_000i64..1_000_000_000) {
            for system in systems() {
                let (x, y) = (int(a.into(), &system), int(b.into(), &system));
                let (a, b) = (i128::from(a), i128::from(b));
                prop_assert_eq!(x.add(&y).unwrap().to_i128(), Ok(a + b));
                prop_assert_eq!(x.subtract(&y).unwrap().to_i128(), Ok(a - b));
                prop_assert_eq!(x.multiply(&y).unwrap().to_i128(), Ok(a * b));
                prop_assert_eq!(x.compare(&y).unwrap(), a.cmp(&b));
            }
        }

        #[test]
        fn arithmetic_identities(a in any::<i64>(), b in any::<i64>()) {
            for system in systems() {
                let (x, y) = (int(a.into(), &system), int(b.into(), &system));
                let zero = BigInteger::zero(&system);
                let one = BigInteger::one(&system);

                prop_assert_eq!(x.add(&y).unwrap(), y.add(&x).unwrap());
                prop_assert_eq!(x.multiply(&y).unwrap(), y.multiply(&x).unwrap());
                prop_assert_eq!(x.subtract(&x).unwrap(), zero.clone());
                prop_assert_eq!(x.multiply(&one).unwrap(), x.clone());
                prop_assert_eq!(x.multiply(&zero).unwrap(), zero.clone());
                prop_assert_eq!(x.add(&x.negate()).unwrap(), zero);
            }
        }

        #[test]
        fn format_parse_round_trip(a in any::<i128>()) {
            for system in systems() {
                let x = int(a, &system);
                prop_assert_eq!(BigInteger::parse(&x.format().unwrap(), &system).unwrap(), x);
            }
        }
    }
}
