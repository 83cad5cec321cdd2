use serde::{Deserialize, Serialize};

/// Policy turning raw values into renderable non-negative magnitudes.
///
/// Selected once per dataset from a single scan:
/// - every non-null value <= 0 with at least one < 0 selects `Absolute`
/// - otherwise any value < 0 selects `Clamp`
/// - otherwise `Identity`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SignPolicy {
    #[default]
    Identity,
    /// Negative values render as 0, others unchanged.
    Clamp,
    /// All values render as their absolute value.
    Absolute,
}

impl SignPolicy {
    /// Scans the full set once and picks the policy. Nulls are ignored.
    #[must_use]
    pub fn select<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a Option<f64>>,
    {
        let mut any_negative = false;
        let mut any_positive = false;
        for value in values.into_iter().flatten() {
            if *value < 0.0 {
                any_negative = true;
            } else if *value > 0.0 {
                any_positive = true;
            }
        }

        if any_negative && !any_positive {
            SignPolicy::Absolute
        } else if any_negative {
            SignPolicy::Clamp
        } else {
            SignPolicy::Identity
        }
    }

    /// Applies the policy to one raw value.
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            SignPolicy::Identity => value,
            SignPolicy::Clamp => value.max(0.0),
            SignPolicy::Absolute => value.abs(),
        }
    }
}

/// Render-ready magnitude paired with the unsanitized source value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SanitizedPair {
    pub value: f64,
    pub original_value: f64,
}

/// One value column sanitized under a shared policy, with dataset flags.
///
/// The two flags mirror the selected policy and are mutually exclusive
/// whenever the set holds a non-zero value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SanitizedSeries {
    pub values: Vec<Option<SanitizedPair>>,
    pub highlights: Vec<Option<SanitizedPair>>,
    pub policy: SignPolicy,
    pub has_negative_values: bool,
    pub all_values_are_negative: bool,
}

impl SanitizedSeries {
    /// Sanitizes base values and their highlight overlay under one policy.
    ///
    /// Policy selection spans the union of both sets so base bars and their
    /// highlight overlays stay on the same sign convention. `highlights` may
    /// be empty when the dataset has no highlight column.
    #[must_use]
    pub fn from_values(values: &[Option<f64>], highlights: &[Option<f64>]) -> Self {
        let policy = SignPolicy::select(values.iter().chain(highlights.iter()));
        let apply = |raw: &Option<f64>| {
            raw.map(|original_value| SanitizedPair {
                value: policy.apply(original_value),
                original_value,
            })
        };

        Self {
            values: values.iter().map(apply).collect(),
            highlights: highlights.iter().map(apply).collect(),
            policy,
            has_negative_values: policy == SignPolicy::Clamp,
            all_values_are_negative: policy == SignPolicy::Absolute,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_signs_select_clamp() {
        let values = vec![Some(300.0), Some(-200.0)];
        let series = SanitizedSeries::from_values(&values, &[]);
        assert_eq!(series.policy, SignPolicy::Clamp);
        assert!(series.has_negative_values);
        assert!(!series.all_values_are_negative);
        assert_eq!(
            series.values[1],
            Some(SanitizedPair {
                value: 0.0,
                original_value: -200.0
            })
        );
    }

    #[test]
    fn all_negative_selects_absolute() {
        let values = vec![Some(-100.0), Some(-200.0)];
        let highlights = vec![Some(-5.0), Some(-150.0)];
        let series = SanitizedSeries::from_values(&values, &highlights);
        assert_eq!(series.policy, SignPolicy::Absolute);
        assert!(series.all_values_are_negative);
        assert!(!series.has_negative_values);
        assert_eq!(series.values[0].expect("pair").value, 100.0);
        assert_eq!(series.highlights[1].expect("pair").value, 150.0);
    }

    #[test]
    fn zeros_only_select_identity() {
        let values = vec![Some(0.0), None, Some(0.0)];
        let series = SanitizedSeries::from_values(&values, &[]);
        assert_eq!(series.policy, SignPolicy::Identity);
        assert!(!series.has_negative_values);
        assert!(!series.all_values_are_negative);
    }
}
