// ============================================================================
// Numeral Systems
// Lookup-table alphabets for base 10, 36, 64 and user-supplied alphabets
// ============================================================================

use crate::errors::{RankError, RankResult};
use crate::interfaces::{Digit, NumeralSystem, SystemRef};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Character separating bucket and decimal in a formatted rank.
pub(crate) const RANK_SEPARATOR: char = '|';

#[inline]
fn table_char(table: &[u8], digit: Digit) -> RankResult<char> {
    table
        .get(digit as usize)
        .map(|&b| b as char)
        .ok_or(RankError::InvalidDigit(digit))
}

// ============================================================================
// Base 10
// ============================================================================

/// Decimal digits `0-9` with `.` as radix point.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumeralSystem10;

impl NumeralSystem10 {
    const CHARS: &'static [u8; 10] = b"0123456789";
}

impl NumeralSystem for NumeralSystem10 {
    fn base(&self) -> u32 {
        10
    }

    fn radix_point_char(&self) -> char {
        '.'
    }

    fn to_digit(&self, ch: char) -> RankResult<Digit> {
        match ch {
            '0'..='9' => Ok(ch as Digit - '0' as Digit),
            _ => Err(RankError::InvalidChar(ch)),
        }
    }

    fn to_char(&self, digit: Digit) -> RankResult<char> {
        table_char(Self::CHARS, digit)
    }

    fn name(&self) -> &str {
        "Base10"
    }
}

// ============================================================================
// Base 36
// ============================================================================

/// Digits `0-9a-z`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumeralSystem36;

impl NumeralSystem36 {
    const CHARS: &'static [u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
}

impl NumeralSystem for NumeralSystem36 {
    fn base(&self) -> u32 {
        36
    }

    fn to_digit(&self, ch: char) -> RankResult<Digit> {
        match ch {
            '0'..='9' => Ok(ch as Digit - '0' as Digit),
            'a'..='z' => Ok(ch as Digit - 'a' as Digit + 10),
            _ => Err(RankError::InvalidChar(ch)),
        }
    }

    fn to_char(&self, digit: Digit) -> RankResult<char> {
        table_char(Self::CHARS, digit)
    }

    fn name(&self) -> &str {
        "Base36"
    }
}

// ============================================================================
// Base 64
// ============================================================================

/// Digits `0-9A-Z^_a-z`, ascending in ASCII order.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumeralSystem64;

impl NumeralSystem64 {
    const CHARS: &'static [u8; 64] =
        b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ^_abcdefghijklmnopqrstuvwxyz";
}

impl NumeralSystem for NumeralSystem64 {
    fn base(&self) -> u32 {
        64
    }

    fn to_digit(&self, ch: char) -> RankResult<Digit> {
        match ch {
            '0'..='9' => Ok(ch as Digit - '0' as Digit),
            'A'..='Z' => Ok(ch as Digit - 'A' as Digit + 10),
            '^' => Ok(36),
            '_' => Ok(37),
            'a'..='z' => Ok(ch as Digit - 'a' as Digit + 38),
            _ => Err(RankError::InvalidChar(ch)),
        }
    }

    fn to_char(&self, digit: Digit) -> RankResult<char> {
        table_char(Self::CHARS, digit)
    }

    fn name(&self) -> &str {
        "Base64"
    }
}

// ============================================================================
// User-supplied alphabet
// ============================================================================

/// Numeral system over an arbitrary alphabet.
///
/// The alphabet must have an even number (at least 2) of unique characters in
/// strictly ascending code-point order, and must not contain the sign, radix
/// point or rank separator characters.
#[derive(Debug, Clone)]
pub struct AlphabetSystem {
    chars: Vec<char>,
    radix_point: char,
    name: String,
}

impl AlphabetSystem {
    /// Create a system with `:` as radix point.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the alphabet violates the rules above.
    pub fn new(alphabet: &str) -> RankResult<Self> {
        Self::with_radix_point(alphabet, ':')
    }

    /// Create a system with a custom radix point character.
    pub fn with_radix_point(alphabet: &str, radix_point: char) -> RankResult<Self> {
        let chars: Vec<char> = alphabet.chars().collect();

        if chars.len() < 2 {
            return Err(RankError::invalid_config("alphabet needs at least 2 characters"));
        }
        if chars.len() % 2 != 0 {
            return Err(RankError::invalid_config(format!(
                "alphabet size must be even to halve exactly, got {}",
                chars.len()
            )));
        }
        if !chars.windows(2).all(|w| w[0] < w[1]) {
            return Err(RankError::invalid_config(
                "alphabet must be unique and in ascending order",
            ));
        }

        let reserved = ['+', '-', RANK_SEPARATOR];
        if reserved.contains(&radix_point) {
            return Err(RankError::invalid_config(format!(
                "radix point {radix_point:?} is reserved"
            )));
        }
        if let Some(ch) = chars
            .iter()
            .find(|&&ch| reserved.contains(&ch) || ch == radix_point)
        {
            return Err(RankError::invalid_config(format!(
                "alphabet contains reserved character {ch:?}"
            )));
        }

        Ok(Self {
            name: format!("Alphabet{}", chars.len()),
            chars,
            radix_point,
        })
    }
}

impl NumeralSystem for AlphabetSystem {
    fn base(&self) -> u32 {
        self.chars.len() as u32
    }

    fn radix_point_char(&self) -> char {
        self.radix_point
    }

    fn to_digit(&self, ch: char) -> RankResult<Digit> {
        self.chars
            .binary_search(&ch)
            .map(|index| index as Digit)
            .map_err(|_| RankError::InvalidChar(ch))
    }

    fn to_char(&self, digit: Digit) -> RankResult<char> {
        self.chars
            .get(digit as usize)
            .copied()
            .ok_or(RankError::InvalidDigit(digit))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// System selection (configuration)
// ============================================================================

/// Names a numeral system in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NumeralSystemKind {
    Base10,
    #[default]
    Base36,
    Base64,
    /// User-supplied alphabet; radix point defaults to `:`
    Alphabet {
        chars: String,
        radix_point: Option<char>,
    },
}

impl NumeralSystemKind {
    /// Build the shared system handle for this choice.
    pub fn instantiate(&self) -> RankResult<SystemRef> {
        Ok(match self {
            NumeralSystemKind::Base10 => Arc::new(NumeralSystem10),
            NumeralSystemKind::Base36 => Arc::new(NumeralSystem36),
            NumeralSystemKind::Base64 => Arc::new(NumeralSystem64),
            NumeralSystemKind::Alphabet { chars, radix_point } => Arc::new(
                AlphabetSystem::with_radix_point(chars, radix_point.unwrap_or(':'))?,
            ),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
