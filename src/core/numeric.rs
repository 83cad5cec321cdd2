use serde::{Deserialize, Serialize};

use crate::core::sanitize::SignPolicy;

/// Largest magnitude accepted before a value counts as out of range.
pub const MAX_ABS_MAGNITUDE: f64 = 1.0e300;

/// Non-fatal data-quality conditions surfaced to the host.
///
/// At most one warning is raised per conversion, picked by the fixed
/// precedence NaN > Infinity > OutOfRange > AllNegative > Negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataWarning {
    NaNNotSupported,
    InfinityValuesNotSupported,
    ValuesOutOfRange,
    AllNegativeValuesNotSupported,
    NegativeValuesNotSupported,
}

impl DataWarning {
    /// String identifier pushed through the host's `set_warnings`.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            DataWarning::NaNNotSupported => "NaNNotSupported",
            DataWarning::InfinityValuesNotSupported => "InfinityValuesNotSupported",
            DataWarning::ValuesOutOfRange => "ValuesOutOfRange",
            DataWarning::AllNegativeValuesNotSupported => "AllNegativeValuesNotSupported",
            DataWarning::NegativeValuesNotSupported => "NegativeValuesNotSupported",
        }
    }

    fn precedence(self) -> u8 {
        match self {
            DataWarning::NaNNotSupported => 0,
            DataWarning::InfinityValuesNotSupported => 1,
            DataWarning::ValuesOutOfRange => 2,
            DataWarning::AllNegativeValuesNotSupported => 3,
            DataWarning::NegativeValuesNotSupported => 4,
        }
    }

    /// Keeps the higher-precedence warning of the two.
    #[must_use]
    pub fn merge(lhs: Option<DataWarning>, rhs: Option<DataWarning>) -> Option<DataWarning> {
        match (lhs, rhs) {
            (Some(a), Some(b)) => Some(if a.precedence() <= b.precedence() { a } else { b }),
            (Some(a), None) => Some(a),
            (None, b) => b,
        }
    }
}

/// Scans raw values for numeric contamination ahead of sanitization.
///
/// Detection is report-only: values pass through unchanged and the caller
/// decides whether to render anyway. Nulls are skipped.
#[must_use]
pub fn scan_for_contamination<'a, I>(values: I) -> Option<DataWarning>
where
    I: IntoIterator<Item = &'a Option<f64>>,
{
    let mut worst: Option<DataWarning> = None;
    for value in values.into_iter().flatten() {
        let found = if value.is_nan() {
            Some(DataWarning::NaNNotSupported)
        } else if value.is_infinite() {
            Some(DataWarning::InfinityValuesNotSupported)
        } else if value.abs() > MAX_ABS_MAGNITUDE {
            Some(DataWarning::ValuesOutOfRange)
        } else {
            None
        };
        worst = DataWarning::merge(worst, found);
        if worst == Some(DataWarning::NaNNotSupported) {
            break;
        }
    }
    worst
}

/// Maps the selected sign policy to its informational warning.
#[must_use]
pub fn sign_policy_warning(policy: SignPolicy) -> Option<DataWarning> {
    match policy {
        SignPolicy::Identity => None,
        SignPolicy::Clamp => Some(DataWarning::NegativeValuesNotSupported),
        SignPolicy::Absolute => Some(DataWarning::AllNegativeValuesNotSupported),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_takes_precedence_over_infinity() {
        let values = vec![Some(f64::INFINITY), Some(f64::NAN), Some(1.0)];
        assert_eq!(
            scan_for_contamination(&values),
            Some(DataWarning::NaNNotSupported)
        );
    }

    #[test]
    fn out_of_range_detected_past_bound() {
        let values = vec![Some(1.0), Some(5.0e300)];
        assert_eq!(
            scan_for_contamination(&values),
            Some(DataWarning::ValuesOutOfRange)
        );
    }

    #[test]
    fn clean_values_produce_no_warning() {
        let values = vec![Some(1.0), None, Some(-2.0)];
        assert_eq!(scan_for_contamination(&values), None);
    }
}
