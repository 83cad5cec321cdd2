use serde::{Deserialize, Serialize};

/// Funnel percent ratios for one data point.
///
/// `of_first` divides by the first point's sanitized value, `of_previous` by
/// the immediately preceding point's. Either is absent when its denominator
/// is 0; `of_previous` is additionally absent for the first point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PercentMetrics {
    pub of_first: Option<f64>,
    pub of_previous: Option<f64>,
}

/// Computes the percent pair for `values[index]` against the series.
#[must_use]
pub fn percent_metrics(values: &[f64], index: usize) -> PercentMetrics {
    let Some(&value) = values.get(index) else {
        return PercentMetrics::default();
    };

    let of_first = match values.first() {
        Some(&first) if first != 0.0 => Some(value / first),
        _ => None,
    };
    let of_previous = if index == 0 {
        None
    } else {
        match values.get(index - 1) {
            Some(&previous) if previous != 0.0 => Some(value / previous),
            _ => None,
        }
    };

    PercentMetrics {
        of_first,
        of_previous,
    }
}
