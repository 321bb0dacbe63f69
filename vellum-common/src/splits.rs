//! Royalty split validation
//!
//! Pure arithmetic over contributor percentage allocations. A split set is
//! valid when every value lies in [0, 100] and the values sum to exactly
//! 100. No rounding is imposed on floating-point inputs; callers that need
//! tolerance must round before validating.

use serde::Serialize;

/// Required total for a complete split allocation
pub const REQUIRED_TOTAL: f64 = 100.0;

/// Category of split violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitViolation {
    /// At least one split is below 0
    NegativeValue,
    /// At least one split exceeds 100
    ValueOverMaximum,
    /// Values are individually in range but do not sum to 100
    TotalNotHundred,
}

/// Validation verdict for a set of splits
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitVerdict {
    pub valid: bool,
    /// True sum of the inputs, reported even when invalid
    pub total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation: Option<SplitViolation>,
}

impl SplitVerdict {
    /// Absolute distance from the required total
    pub fn remainder(&self) -> f64 {
        (REQUIRED_TOTAL - self.total).abs()
    }

    /// Human-readable description of the violation, None when valid
    pub fn message(&self) -> Option<String> {
        match self.violation? {
            SplitViolation::NegativeValue => Some("Splits cannot be negative".to_string()),
            SplitViolation::ValueOverMaximum => {
                Some("Individual splits cannot exceed 100%".to_string())
            }
            SplitViolation::TotalNotHundred => Some(if self.total < REQUIRED_TOTAL {
                format!("{}% remaining", REQUIRED_TOTAL - self.total)
            } else {
                format!("{}% over allocation", self.total - REQUIRED_TOTAL)
            }),
        }
    }
}

/// Validate a set of contributor split percentages
///
/// Checks run in order: negative values, values over 100, then the total.
/// An empty set is invalid with total 0.
pub fn validate_splits(splits: &[f64]) -> SplitVerdict {
    let total: f64 = splits.iter().sum();

    if splits.iter().any(|&s| s < 0.0) {
        return SplitVerdict {
            valid: false,
            total,
            violation: Some(SplitViolation::NegativeValue),
        };
    }

    if splits.iter().any(|&s| s > REQUIRED_TOTAL) {
        return SplitVerdict {
            valid: false,
            total,
            violation: Some(SplitViolation::ValueOverMaximum),
        };
    }

    if total != REQUIRED_TOTAL {
        return SplitVerdict {
            valid: false,
            total,
            violation: Some(SplitViolation::TotalNotHundred),
        };
    }

    SplitVerdict {
        valid: true,
        total,
        violation: None,
    }
}

/// Compute an even distribution over `count` contributors
///
/// Each contributor receives `floor(100 / count)`; the integer remainder
/// goes entirely to the first contributor in list order, so the result
/// always sums to exactly 100. The remainder-to-first policy matches the
/// existing product behavior (see DESIGN.md).
pub fn distribute_evenly(count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }

    let even = (100 / count) as f64;
    let remainder = 100.0 - even * count as f64;

    (0..count)
        .map(|i| if i == 0 { even + remainder } else { even })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_when_total_is_exactly_100() {
        for splits in [
            vec![100.0],
            vec![50.0, 50.0],
            vec![33.0, 33.0, 34.0],
            vec![25.5, 74.5],
            vec![0.0, 100.0],
        ] {
            let verdict = validate_splits(&splits);
            assert!(verdict.valid, "expected valid for {:?}", splits);
            assert_eq!(verdict.total, 100.0);
            assert_eq!(verdict.violation, None);
            assert_eq!(verdict.message(), None);
        }
    }

    #[test]
    fn invalid_when_total_under_100() {
        let verdict = validate_splits(&[40.0, 35.0]);
        assert!(!verdict.valid);
        assert_eq!(verdict.total, 75.0);
        assert_eq!(verdict.violation, Some(SplitViolation::TotalNotHundred));
        assert_eq!(verdict.remainder(), 25.0);
        assert_eq!(verdict.message().as_deref(), Some("25% remaining"));
    }

    #[test]
    fn invalid_when_total_over_100() {
        let verdict = validate_splits(&[60.0, 55.0]);
        assert!(!verdict.valid);
        assert_eq!(verdict.total, 115.0);
        assert_eq!(verdict.violation, Some(SplitViolation::TotalNotHundred));
        assert_eq!(verdict.remainder(), 15.0);
        assert_eq!(verdict.message().as_deref(), Some("15% over allocation"));
    }

    #[test]
    fn negative_value_reported_before_total() {
        // Sums to 100, but a negative entry is still a violation
        let verdict = validate_splits(&[-10.0, 110.0]);
        assert!(!verdict.valid);
        assert_eq!(verdict.total, 100.0);
        assert_eq!(verdict.violation, Some(SplitViolation::NegativeValue));
    }

    #[test]
    fn value_over_maximum_reported() {
        let verdict = validate_splits(&[101.0]);
        assert!(!verdict.valid);
        assert_eq!(verdict.violation, Some(SplitViolation::ValueOverMaximum));
    }

    #[test]
    fn empty_input_is_invalid_with_total_zero() {
        let verdict = validate_splits(&[]);
        assert!(!verdict.valid);
        assert_eq!(verdict.total, 0.0);
        assert_eq!(verdict.violation, Some(SplitViolation::TotalNotHundred));
        assert_eq!(verdict.message().as_deref(), Some("100% remaining"));
    }

    #[test]
    fn distribute_evenly_sums_to_100_with_remainder_first() {
        for n in 1..=12 {
            let splits = distribute_evenly(n);
            assert_eq!(splits.len(), n);

            let floor = (100 / n) as f64;
            assert_eq!(splits[0], floor + (100.0 - floor * n as f64));
            for &s in &splits[1..] {
                assert_eq!(s, floor);
            }
            assert_eq!(splits.iter().sum::<f64>(), 100.0);
            assert!(validate_splits(&splits).valid);
        }
    }

    #[test]
    fn distribute_evenly_three_way() {
        // floor(100/3) = 33, remainder 1 goes to the first contributor
        assert_eq!(distribute_evenly(3), vec![34.0, 33.0, 33.0]);
    }

    #[test]
    fn distribute_evenly_zero_contributors() {
        assert!(distribute_evenly(0).is_empty());
    }
}
