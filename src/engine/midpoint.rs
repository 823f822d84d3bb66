// ============================================================================
// Midpoint Search
// Shortest decimal strictly between two bounds
// ============================================================================

use crate::errors::{RankError, RankResult};
use crate::numeric::FixedDecimal;
use std::cmp::Ordering;

/// Find the shortest decimal strictly between `o_left` and `o_right`.
///
/// Works on progressively coarser scales:
///
/// 1. Align the operands to the smaller scale unless that collapses the gap.
/// 2. Drop one fractional digit at a time (left rounded up, right rounded
///    down) until the bounds meet or cross.
/// 3. Halve the surviving interval.
/// 4. Fall back to the exact midpoint of the original bounds if the result
///    escaped them.
/// 5. Trim trailing digits while the value stays strictly inside.
///
/// Ordering of the operands is the caller's concern; equal bounds yield the
/// bound itself.
///
/// # Errors
/// Returns `IncompatibleSystem` if the operands have different bases.
pub fn between(o_left: &FixedDecimal, o_right: &FixedDecimal) -> RankResult<FixedDecimal> {
    let (lb, rb) = (o_left.system().base(), o_right.system().base());
    if lb != rb {
        return Err(RankError::IncompatibleSystem {
            left: lb,
            right: rb,
        });
    }

    let mut left = o_left.clone();
    let mut right = o_right.clone();

    if o_left.scale() < o_right.scale() {
        let n_right = o_right.set_scale(o_left.scale(), false)?;
        if o_left.compare(&n_right)?.is_ge() {
            tracing::trace!(left = %o_left, right = %o_right, "truncated right bound collapses gap");
            return mid(o_left, o_right);
        }
        right = n_right;
    }

    if o_left.scale() > right.scale() {
        let n_left = o_left.set_scale(right.scale(), true)?;
        if n_left.compare(&right)?.is_ge() {
            tracing::trace!(left = %o_left, right = %o_right, "rounded left bound collapses gap");
            return mid(o_left, o_right);
        }
        left = n_left;
    }

    let mut scale = left.scale();
    while scale > 0 {
        let n_scale = scale - 1;
        let n_left = left.set_scale(n_scale, true)?;
        let n_right = right.set_scale(n_scale, false)?;

        match n_left.compare(&n_right)? {
            Ordering::Equal => return check_mid(o_left, o_right, n_left),
            Ordering::Greater => break,
            Ordering::Less => {},
        }

        scale = n_scale;
        left = n_left;
        right = n_right;
    }

    let mut result = check_mid(o_left, o_right, mid(&left, &right)?)?;

    let mut m_scale = result.scale();
    while m_scale > 0 {
        let n_scale = m_scale - 1;
        let trimmed = result.set_scale(n_scale, false)?;
        if o_left.compare(&trimmed)?.is_ge() || trimmed.compare(o_right)?.is_ge() {
            break;
        }
        result = trimmed;
        m_scale = n_scale;
    }

    Ok(result)
}

/// Keep `candidate` if it lies strictly inside the bounds, else bisect them.
fn check_mid(
    lbound: &FixedDecimal,
    rbound: &FixedDecimal,
    candidate: FixedDecimal,
) -> RankResult<FixedDecimal> {
    if lbound.compare(&candidate)?.is_ge() || candidate.compare(rbound)?.is_ge() {
        tracing::trace!(%candidate, left = %lbound, right = %rbound, "midpoint escaped bounds");
        return mid(lbound, rbound);
    }
    Ok(candidate)
}

/// `(left + right) / 2`, rounded to the wider operand scale when that still
/// falls inside.
fn mid(left: &FixedDecimal, right: &FixedDecimal) -> RankResult<FixedDecimal> {
    let sum = left.add(right)?;
    let mid = sum.multiply(&FixedDecimal::half(left.system()))?;
    let scale = left.scale().max(right.scale());

    if mid.scale() > scale {
        let round_down = mid.set_scale(scale, false)?;
        if round_down.compare(left)?.is_gt() {
            return Ok(round_down);
        }
        let round_up = mid.set_scale(scale, true)?;
        if round_up.compare(right)?.is_lt() {
            return Ok(round_up);
        }
    }
    Ok(mid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::SystemRef;
    use crate::numeric::{BigInteger, NumeralSystem10, NumeralSystem36, NumeralSystem64};
    use proptest::prelude::*;
    use std::sync::Arc;

    fn b36(s: &str) -> FixedDecimal {
        let system: SystemRef = Arc::new(NumeralSystem36);
        FixedDecimal::parse(s, &system).unwrap()
    }

    fn b10(s: &str) -> FixedDecimal {
        let system: SystemRef = Arc::new(NumeralSystem10);
        FixedDecimal::parse(s, &system).unwrap()
    }

    #[test]
    fn test_between_min_and_max() {
        assert_eq!(between(&b36("0"), &b36("zzzzzz")).unwrap(), b36("hzzzzz"));
    }

    #[test]
    fn test_between_prefers_short_results() {
        assert_eq!(between(&b10("1"), &b10("2")).unwrap(), b10("1.5"));
        assert_eq!(between(&b10("1"), &b10("9")).unwrap(), b10("5"));
        assert_eq!(between(&b10("0.1"), &b10("0.3")).unwrap(), b10("0.2"));
        assert_eq!(between(&b10("1.23"), &b10("1.3")).unwrap(), b10("1.26"));
    }

    #[test]
    fn test_between_adjacent_units() {
        // Operands one unit apart at the finest scale need one more digit
        let (l, r) = (b10("0.0041"), b10("0.0042"));
        let m = between(&l, &r).unwrap();
        assert_eq!(m, b10("0.00415"));

        let (l, r) = (b36("100008"), b36("100009"));
        let m = between(&l, &r).unwrap();
        assert_eq!(m, b36("100008:i"));
    }

    #[test]
    fn test_between_mixed_scales() {
        assert_eq!(between(&b10("1"), &b10("1.0001")).unwrap(), b10("1.00005"));
        assert_eq!(between(&b10("0.9999"), &b10("1")).unwrap(), b10("0.99995"));
        assert_eq!(between(&b10("0.5"), &b10("3.75")).unwrap(), b10("2"));
    }

    #[test]
    fn test_between_equal_bounds() {
        assert_eq!(between(&b36("5"), &b36("5")).unwrap(), b36("5"));
    }

    #[test]
    fn test_between_incompatible() {
        assert_eq!(
            between(&b10("1"), &b36("2")),
            Err(RankError::IncompatibleSystem { left: 10, right: 36 })
        );
    }

    proptest! {
        #[test]
        fn between_is_strictly_inside(
            a in 0i64..1_000_000_000,
            b in 0i64..1_000_000_000,
            a_scale in 0usize..6,
            b_scale in 0usize..6,
        ) {
            let systems: [SystemRef; 3] = [
                Arc::new(NumeralSystem10),
                Arc::new(NumeralSystem36),
                Arc::new(NumeralSystem64),
            ];
            for system in systems {
                let x = FixedDecimal::make(BigInteger::from_i128(a.into(), &system), a_scale);
                let y = FixedDecimal::make(BigInteger::from_i128(b.into(), &system), b_scale);
                let (lo, hi) = match x.compare(&y).unwrap() {
                    Ordering::Less => (x, y),
                    Ordering::Greater => (y, x),
                    Ordering::Equal => continue,
                };

                let m = between(&lo, &hi).unwrap();
                prop_assert!(lo < m, "{} !< {}", lo, m);
                prop_assert!(m < hi, "{} !< {}", m, hi);

                // At most one digit finer than the finest bound
                prop_assert!(m.scale() <= lo.scale().max(hi.scale()) + 1);
            }
        }
    }
}
