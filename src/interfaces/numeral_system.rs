// ============================================================================
// Numeral System Interface
// Defines the contract for digit <-> character alphabets
// ============================================================================

use crate::errors::RankResult;
use std::fmt;
use std::sync::Arc;

/// A single digit value in `[0, base)`.
pub type Digit = u32;

/// Shared handle to a numeral system.
///
/// Every integer, decimal and rank built from a configuration holds a clone of
/// the same handle.
pub type SystemRef = Arc<dyn NumeralSystem>;

/// Maps digits `0..base` to characters and back.
///
/// Implementations must keep `to_char(to_digit(c)?)? == c` for every character
/// of the alphabet, and the alphabet must be ascending in code-point order so
/// that formatted keys sort the same way lexicographically and numerically.
///
/// # Thread Safety
/// All implementations must be `Send + Sync`; one instance is shared by every
/// value built from a configuration.
pub trait NumeralSystem: Send + Sync + fmt::Debug {
    /// Number of digits in the alphabet.
    fn base(&self) -> u32;

    /// Sign character accepted (and ignored) in front of positive numbers.
    fn positive_char(&self) -> char {
        '+'
    }

    /// Sign character written in front of negative numbers.
    fn negative_char(&self) -> char {
        '-'
    }

    /// Character separating the integer and fractional digits.
    fn radix_point_char(&self) -> char {
        ':'
    }

    /// Convert a character to its digit value.
    ///
    /// # Errors
    /// Returns `InvalidChar` if the character is outside the alphabet.
    fn to_digit(&self, ch: char) -> RankResult<Digit>;

    /// Convert a digit value to its character.
    ///
    /// # Errors
    /// Returns `InvalidDigit` if `digit >= base`.
    fn to_char(&self, digit: Digit) -> RankResult<char>;

    /// Get the system name for logging.
    fn name(&self) -> &str;
}
