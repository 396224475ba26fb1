//! Divergence classification.
//!
//! Maps the ahead/behind counts of a comparison onto the bucket the fork is
//! recorded under. Pure and total over all inputs.

use std::fmt;

/// Where a fork lands after comparing its head against upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Has commits upstream lacks, and is missing none of upstream's.
    AheadOnly,
    /// Has commits upstream lacks, and is missing some of upstream's.
    AheadAndBehind,
    /// Has nothing upstream lacks.
    IdenticalOrBehind,
    /// Counts were missing or inconsistent.
    Unknown,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AheadOnly => write!(f, "ahead"),
            Self::AheadAndBehind => write!(f, "ahead and behind"),
            Self::IdenticalOrBehind => write!(f, "identical or behind"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Classify a fork from its ahead/behind commit counts.
///
/// First match wins:
///
/// | ahead | behind | bucket |
/// |-------|--------|--------|
/// | > 0   | == 0   | [`Bucket::AheadOnly`] |
/// | > 0   | > 0    | [`Bucket::AheadAndBehind`] |
/// | == 0  | >= 0   | [`Bucket::IdenticalOrBehind`] |
/// | otherwise |    | [`Bucket::Unknown`] |
pub fn classify(ahead_by: i64, behind_by: i64) -> Bucket {
    match (ahead_by, behind_by) {
        (a, 0) if a > 0 => Bucket::AheadOnly,
        (a, b) if a > 0 && b > 0 => Bucket::AheadAndBehind,
        (0, b) if b >= 0 => Bucket::IdenticalOrBehind,
        _ => Bucket::Unknown,
    }
}

/// Classify counts that may be absent from the API response.
pub fn classify_counts(ahead_by: Option<i64>, behind_by: Option<i64>) -> Bucket {
    match (ahead_by, behind_by) {
        (Some(ahead), Some(behind)) => classify(ahead, behind),
        _ => Bucket::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_table() {
        assert_eq!(classify(5, 0), Bucket::AheadOnly);
        assert_eq!(classify(3, 2), Bucket::AheadAndBehind);
        assert_eq!(classify(0, 0), Bucket::IdenticalOrBehind);
        assert_eq!(classify(0, 7), Bucket::IdenticalOrBehind);
        assert_eq!(classify(-1, 0), Bucket::Unknown);
    }

    #[test]
    fn test_negative_behind() {
        assert_eq!(classify(4, -1), Bucket::Unknown);
        assert_eq!(classify(0, -3), Bucket::Unknown);
    }

    #[test]
    fn test_totality_over_small_grid() {
        for ahead in -3..=3 {
            for behind in -3..=3 {
                let expected = if ahead > 0 && behind == 0 {
                    Bucket::AheadOnly
                } else if ahead > 0 && behind > 0 {
                    Bucket::AheadAndBehind
                } else if ahead == 0 && behind >= 0 {
                    Bucket::IdenticalOrBehind
                } else {
                    Bucket::Unknown
                };
                assert_eq!(classify(ahead, behind), expected, "({ahead}, {behind})");
            }
        }
    }

    #[test]
    fn test_extremes() {
        assert_eq!(classify(i64::MAX, 0), Bucket::AheadOnly);
        assert_eq!(classify(i64::MAX, i64::MAX), Bucket::AheadAndBehind);
        assert_eq!(classify(i64::MIN, i64::MIN), Bucket::Unknown);
    }

    #[test]
    fn test_missing_counts() {
        assert_eq!(classify_counts(Some(2), Some(0)), Bucket::AheadOnly);
        assert_eq!(classify_counts(None, Some(0)), Bucket::Unknown);
        assert_eq!(classify_counts(Some(2), None), Bucket::Unknown);
        assert_eq!(classify_counts(None, None), Bucket::Unknown);
    }
}
