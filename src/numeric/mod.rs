// ============================================================================
// Numeric Module
// Arbitrary-precision arithmetic over pluggable numeral systems
// ============================================================================
//
// This module provides:
// - Numeral systems: base 10/36/64 lookup tables and user alphabets
// - BigInteger: signed digit-array integer with carry/borrow arithmetic
// - FixedDecimal: magnitude / base^scale with canonical trailing-zero stripping
//
// Design principles:
// - Values are immutable; every operation returns a new value
// - Mixing bases is an error, never a silent conversion
// - Canonicalization happens at every construction site

mod big_integer;
mod fixed_decimal;
mod numeral_systems;

pub use big_integer::{BigInteger, Magnitude, Sign};
pub use fixed_decimal::FixedDecimal;
pub use numeral_systems::{
    AlphabetSystem, NumeralSystem10, NumeralSystem36, NumeralSystem64, NumeralSystemKind,
};

pub(crate) use numeral_systems::RANK_SEPARATOR;
