// ============================================================================
// Rank Errors
// Error types shared by numeral systems, arithmetic and the rank engine
// ============================================================================

use std::fmt;

/// Errors that can occur while parsing, computing or generating ranks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankError {
    /// Character is not part of the numeral system's alphabet
    InvalidChar(char),
    /// Digit value is outside `[0, base)`
    InvalidDigit(u32),
    /// Operands were built on numeral systems with different bases
    IncompatibleSystem { left: u32, right: u32 },
    /// Decimal string contains more than one radix point
    MultipleRadixPoints(char),
    /// `between` was requested for ranks living in different buckets
    CrossBucket { left: String, right: String },
    /// `between` was requested for two ranks with the same decimal
    EqualRank(String),
    /// `between` was requested for ranks from differently sized key spaces
    IncompatibleKeySpace { left: String, right: String },
    /// Decimal lies outside the configured `[min, max]` key space
    OutOfRange(String),
    /// Bucket string is not one of `0`, `1`, `2`
    UnknownBucket(String),
    /// Rank string is malformed
    Parse {
        input: String,
        cause: Option<Box<RankError>>,
    },
    /// Number string has no digits
    EmptyInput,
    /// Value does not fit the requested primitive type
    Overflow,
    /// Configuration or alphabet failed validation
    InvalidConfig(String),
}

impl RankError {
    pub(crate) fn parse(input: &str, cause: Option<RankError>) -> Self {
        RankError::Parse {
            input: input.to_string(),
            cause: cause.map(Box::new),
        }
    }

    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        RankError::InvalidConfig(reason.into())
    }
}

impl fmt::Display for RankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankError::InvalidChar(ch) => write!(f, "not a valid char: {ch}"),
            RankError::InvalidDigit(digit) => write!(f, "not a valid digit: {digit}"),
            RankError::IncompatibleSystem { left, right } => write!(
                f,
                "expected numbers of the same numeral system, got base {left} and base {right}"
            ),
            RankError::MultipleRadixPoints(radix) => write!(f, "more than one {radix}"),
            RankError::CrossBucket { left, right } => write!(
                f,
                "between works only within the same bucket: {left} vs {right}"
            ),
            RankError::EqualRank(rank) => {
                write!(f, "cannot rank between items with the same rank: {rank}")
            },
            RankError::IncompatibleKeySpace { left, right } => write!(
                f,
                "between works only within the same key space: {left} vs {right}"
            ),
            RankError::OutOfRange(decimal) => {
                write!(f, "decimal {decimal} is outside the key space")
            },
            RankError::UnknownBucket(bucket) => write!(f, "unknown bucket: {bucket}"),
            RankError::Parse { input, cause } => match cause {
                Some(cause) => write!(f, "invalid rank {input:?}: {cause}"),
                None => write!(f, "invalid rank {input:?}: expected <bucket>|<decimal>"),
            },
            RankError::EmptyInput => write!(f, "invalid input: no digits"),
            RankError::Overflow => write!(f, "value does not fit the target type"),
            RankError::InvalidConfig(reason) => write!(f, "invalid configuration: {reason}"),
        }
    }
}

impl std::error::Error for RankError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RankError::Parse {
                cause: Some(cause), ..
            } => Some(cause.as_ref()),
            _ => None,
        }
    }
}

/// Result type alias for rank operations
pub type RankResult<T> = Result<T, RankError>;
