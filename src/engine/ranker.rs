// ============================================================================
// Ranker
// Entry point binding one rank configuration to rank construction
// ============================================================================

use crate::domain::config::RankConfig;
use crate::domain::rank::Rank;
use crate::domain::Bucket;
use crate::errors::{RankError, RankResult};
use crate::numeric::{FixedDecimal, RANK_SEPARATOR};
use std::sync::Arc;

/// Fixed ranks of one bucket, built once per ranker.
#[derive(Debug, Clone)]
struct Anchors {
    min: Rank,
    max: Rank,
    middle: Rank,
    initial: Rank,
}

impl Anchors {
    fn build(config: &Arc<RankConfig>, bucket: Bucket) -> RankResult<Self> {
        let initial = if bucket == Bucket::Bucket0 {
            config.initial_min()
        } else {
            config.initial_max()
        };

        Ok(Self {
            min: Rank::new(config, bucket, config.min().clone())?,
            max: Rank::new(config, bucket, config.max().clone())?,
            middle: Rank::new(config, bucket, config.middle().clone())?,
            initial: Rank::new(config, bucket, initial.clone())?,
        })
    }
}

/// Creates, parses and formats ranks for a single configuration.
///
/// Every rank produced here shares the ranker's configuration, so ranks from
/// one ranker can be compared and bisected freely.
///
/// # Example
/// ```
/// use lexorank::prelude::*;
///
/// let ranker = RankerBuilder::base36().build()?;
/// let first = ranker.middle();
/// let second = first.gen_next()?;
/// let between = first.between(&second)?;
///
/// assert!(first < &between && between < second);
/// assert_eq!(ranker.parse(between.format())?, between);
/// # Ok::<(), lexorank::RankError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Ranker {
    config: Arc<RankConfig>,
    anchors: [Anchors; Bucket::COUNT],
}

impl Ranker {
    /// # Errors
    /// Returns `InvalidDigit` if an anchor cannot be rendered in the
    /// configured alphabet.
    pub fn new(config: RankConfig) -> RankResult<Self> {
        let config = Arc::new(config);
        let anchors = [
            Anchors::build(&config, Bucket::Bucket0)?,
            Anchors::build(&config, Bucket::Bucket1)?,
            Anchors::build(&config, Bucket::Bucket2)?,
        ];

        tracing::debug!(
            min = %anchors[0].min,
            max = %anchors[0].max,
            middle = %anchors[0].middle,
            "ranker ready"
        );

        Ok(Self { config, anchors })
    }

    pub fn config(&self) -> &Arc<RankConfig> {
        &self.config
    }

    #[inline]
    fn anchors(&self, bucket: Bucket) -> &Anchors {
        &self.anchors[bucket.index()]
    }

    // ========================================================================
    // Anchors
    // ========================================================================

    /// Smallest rank of bucket 0.
    pub fn min(&self) -> &Rank {
        self.min_in(Bucket::Bucket0)
    }

    /// Largest rank of bucket 0.
    pub fn max(&self) -> &Rank {
        self.max_in(Bucket::Bucket0)
    }

    /// Shortest rank between the bounds of bucket 0.
    pub fn middle(&self) -> &Rank {
        self.middle_in(Bucket::Bucket0)
    }

    pub fn min_in(&self, bucket: Bucket) -> &Rank {
        &self.anchors(bucket).min
    }

    pub fn max_in(&self, bucket: Bucket) -> &Rank {
        &self.anchors(bucket).max
    }

    pub fn middle_in(&self, bucket: Bucket) -> &Rank {
        &self.anchors(bucket).middle
    }

    /// Starting rank of a fresh bucket.
    ///
    /// Bucket 0 starts low at the initial minimum; the others start high at
    /// the initial maximum.
    pub fn initial(&self, bucket: Bucket) -> &Rank {
        &self.anchors(bucket).initial
    }

    // ========================================================================
    // Construction and parsing
    // ========================================================================

    /// # Errors
    /// - `IncompatibleSystem` if `decimal` uses another base
    /// - `OutOfRange` if `decimal` lies outside `[min, max]`
    pub fn from_decimal(&self, bucket: Bucket, decimal: FixedDecimal) -> RankResult<Rank> {
        Rank::new(&self.config, bucket, decimal)
    }

    /// Parse a stored key such as `"1|0i0000:"`.
    ///
    /// # Errors
    /// Returns `Parse` for a missing or repeated separator, with the bucket
    /// or decimal error as its cause otherwise. A decimal outside
    /// `[min, max]` is reported with an `OutOfRange` cause.
    pub fn parse(&self, input: &str) -> RankResult<Rank> {
        let (bucket, decimal) = input
            .split_once(RANK_SEPARATOR)
            .ok_or_else(|| RankError::parse(input, None))?;

        if decimal.contains(RANK_SEPARATOR) {
            return Err(RankError::parse(input, None));
        }

        let bucket: Bucket = bucket
            .parse()
            .map_err(|e| RankError::parse(input, Some(e)))?;
        let decimal = FixedDecimal::parse(decimal, self.config.system())
            .map_err(|e| RankError::parse(input, Some(e)))?;

        Rank::new(&self.config, bucket, decimal).map_err(|e| RankError::parse(input, Some(e)))
    }

    /// Render `rank` under this ranker's key width.
    ///
    /// # Errors
    /// - `IncompatibleSystem` if `rank` uses another base
    /// - `OutOfRange` if `rank` does not fit this ranker's key space
    /// - `InvalidDigit` if a digit cannot be rendered
    pub fn format(&self, rank: &Rank) -> RankResult<String> {
        if Arc::ptr_eq(rank.config(), &self.config) {
            return Ok(rank.format().to_string());
        }
        Ok(Rank::new(&self.config, rank.bucket(), rank.decimal().clone())?.format().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::RankOptions;
    use crate::numeric::NumeralSystem10;

    fn ranker() -> Ranker {
        Ranker::new(RankConfig::from_options(&RankOptions::default()).unwrap()).unwrap()
    }

    #[test]
    fn test_anchors() {
        let ranker = ranker();
        assert_eq!(ranker.min().format(), "0|000000:");
        assert_eq!(ranker.max().format(), "0|zzzzzz:");
        assert_eq!(ranker.middle().format(), "0|hzzzzz:");
        assert_eq!(ranker.max_in(Bucket::Bucket2).format(), "2|zzzzzz:");
        assert_eq!(ranker.min_in(Bucket::Bucket1).format(), "1|000000:");
        assert_eq!(ranker.middle_in(Bucket::Bucket1).format(), "1|hzzzzz:");
    }

    #[test]
    fn test_initial_per_bucket() {
        let ranker = ranker();
        assert_eq!(ranker.initial(Bucket::Bucket0).format(), "0|100000:");
        assert_eq!(ranker.initial(Bucket::Bucket1).format(), "1|y00000:");
        assert_eq!(ranker.initial(Bucket::Bucket2).format(), "2|y00000:");
    }

    #[test]
    fn test_parse_round_trip() {
        let ranker = ranker();
        for key in ["0|000000:", "1|0i0000:", "2|zzzzzz:", "0|10004s:", "0|hzzzzz:i"] {
            let rank = ranker.parse(key).unwrap();
            assert_eq!(rank.format(), key);
            assert_eq!(ranker.format(&rank).unwrap(), key);
        }
    }

    #[test]
    fn test_parse_accepts_unpadded_keys() {
        let ranker = ranker();
        assert_eq!(ranker.parse("1|i").unwrap().format(), "1|00000i:");
    }

    #[test]
    fn test_parse_errors() {
        let ranker = ranker();

        assert_eq!(
            ranker.parse("000000:"),
            Err(RankError::Parse {
                input: "000000:".to_string(),
                cause: None,
            })
        );
        assert_eq!(
            ranker.parse("0|00|00:"),
            Err(RankError::Parse {
                input: "0|00|00:".to_string(),
                cause: None,
            })
        );
        assert_eq!(
            ranker.parse("3|000000:"),
            Err(RankError::Parse {
                input: "3|000000:".to_string(),
                cause: Some(Box::new(RankError::UnknownBucket("3".to_string()))),
            })
        );
        assert_eq!(
            ranker.parse("0|00:00:"),
            Err(RankError::Parse {
                input: "0|00:00:".to_string(),
                cause: Some(Box::new(RankError::MultipleRadixPoints(':'))),
            })
        );
        assert_eq!(
            ranker.parse("0|00!00:"),
            Err(RankError::Parse {
                input: "0|00!00:".to_string(),
                cause: Some(Box::new(RankError::InvalidChar('!'))),
            })
        );
        assert!(ranker.parse("0|").is_err());
    }

    #[test]
    fn test_parse_rejects_keys_outside_key_space() {
        let ranker = ranker();

        assert_eq!(
            ranker.parse("0|-5:"),
            Err(RankError::Parse {
                input: "0|-5:".to_string(),
                cause: Some(Box::new(RankError::OutOfRange("-5".to_string()))),
            })
        );
        assert_eq!(
            ranker.parse("0|1000000:"),
            Err(RankError::Parse {
                input: "0|1000000:".to_string(),
                cause: Some(Box::new(RankError::OutOfRange("1000000".to_string()))),
            })
        );
        assert_eq!(
            ranker.parse("0|zzzzzz:i"),
            Err(RankError::Parse {
                input: "0|zzzzzz:i".to_string(),
                cause: Some(Box::new(RankError::OutOfRange("zzzzzz:i".to_string()))),
            })
        );

        // Both bounds are valid keys
        assert!(ranker.parse("0|000000:").unwrap().is_min());
        assert!(ranker.parse("0|zzzzzz:").unwrap().is_max());
    }

    #[test]
    fn test_from_decimal() {
        let ranker = ranker();
        let decimal = FixedDecimal::parse("abc", ranker.config().system()).unwrap();
        assert_eq!(
            ranker.from_decimal(Bucket::Bucket1, decimal).unwrap().format(),
            "1|000abc:"
        );

        let system: crate::interfaces::SystemRef = Arc::new(NumeralSystem10);
        let foreign = FixedDecimal::parse("5", &system).unwrap();
        assert!(matches!(
            ranker.from_decimal(Bucket::Bucket0, foreign),
            Err(RankError::IncompatibleSystem { .. })
        ));

        let negative = FixedDecimal::parse("-1", ranker.config().system()).unwrap();
        assert_eq!(
            ranker.from_decimal(Bucket::Bucket0, negative),
            Err(RankError::OutOfRange("-1".to_string()))
        );
    }

    #[test]
    fn test_format_rewidths_foreign_rank() {
        let narrow = ranker();
        let wide = Ranker::new(
            RankConfig::from_options(&RankOptions::default().with_max_order(8)).unwrap(),
        )
        .unwrap();

        let rank = narrow.parse("0|0000ab:").unwrap();
        assert_eq!(wide.format(&rank).unwrap(), "0|000000ab:");

        let too_wide = wide.parse("0|10000000:").unwrap();
        assert!(matches!(narrow.format(&too_wide), Err(RankError::OutOfRange(_))));
    }
}
