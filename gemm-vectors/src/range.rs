use std::fmt;
use std::str::FromStr;

use crate::error::{GenError, Result};

/// Inclusive value range for a random operand matrix.
///
/// Ends are held as i32 so that out-of-band input (e.g. `-200:5` from the
/// command line) survives parsing and is rejected by [`ValueRange::check_i8`]
/// instead of failing as a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueRange {
    pub lo: i32,
    pub hi: i32,
}

impl ValueRange {
    pub const FULL_I8: ValueRange = ValueRange { lo: i8::MIN as i32, hi: i8::MAX as i32 };

    pub const fn new(lo: i32, hi: i32) -> Self {
        Self { lo, hi }
    }

    /// Validate that both ends fit in int8 and that lo <= hi.
    /// Returns the range narrowed to i8.
    pub fn check_i8(&self, name: &'static str) -> Result<(i8, i8)> {
        let (lo, hi) = match (i8::try_from(self.lo), i8::try_from(self.hi)) {
            (Ok(lo), Ok(hi)) => (lo, hi),
            _ => {
                return Err(GenError::RangeOutOfBounds { name, lo: self.lo, hi: self.hi });
            }
        };
        if lo > hi {
            return Err(GenError::InvertedRange { name, lo: self.lo, hi: self.hi });
        }
        Ok((lo, hi))
    }

    /// Largest magnitude any value in the range can take.
    pub fn max_abs(&self) -> i64 {
        (self.lo as i64).abs().max((self.hi as i64).abs())
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::FULL_I8
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.lo, self.hi)
    }
}

impl FromStr for ValueRange {
    type Err = String;

    /// Parses `LO:HI` or `LO,HI`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (lo, hi) = s
            .split_once(':')
            .or_else(|| s.split_once(','))
            .ok_or_else(|| format!("expected LO:HI, got {s:?}"))?;
        let lo = lo.trim().parse::<i32>().map_err(|e| format!("bad range start {lo:?}: {e}"))?;
        let hi = hi.trim().parse::<i32>().map_err(|e| format!("bad range end {hi:?}: {e}"))?;
        Ok(Self { lo, hi })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!("-2:2".parse::<ValueRange>().unwrap(), ValueRange::new(-2, 2));
        assert_eq!("-128, 127".parse::<ValueRange>().unwrap(), ValueRange::FULL_I8);
        assert!("5".parse::<ValueRange>().is_err());
        assert!("a:b".parse::<ValueRange>().is_err());
    }

    #[test]
    fn test_check_bounds() {
        assert_eq!(ValueRange::FULL_I8.check_i8("a_range").unwrap(), (-128, 127));
        assert!(matches!(
            ValueRange::new(-129, 0).check_i8("a_range"),
            Err(GenError::RangeOutOfBounds { name: "a_range", .. })
        ));
        assert!(matches!(
            ValueRange::new(0, 128).check_i8("b_range"),
            Err(GenError::RangeOutOfBounds { name: "b_range", .. })
        ));
        assert!(matches!(
            ValueRange::new(3, -3).check_i8("a_range"),
            Err(GenError::InvertedRange { .. })
        ));
        // Single-value range is fine
        assert_eq!(ValueRange::new(7, 7).check_i8("a_range").unwrap(), (7, 7));
    }

    #[test]
    fn test_max_abs() {
        assert_eq!(ValueRange::FULL_I8.max_abs(), 128);
        assert_eq!(ValueRange::new(-2, 5).max_abs(), 5);
        assert_eq!(ValueRange::new(0, 0).max_abs(), 0);
    }
}
