use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Quartile triple computed by the linear-interpolation quantile method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuartileSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

impl QuartileSummary {
    #[must_use]
    pub fn iqr(self) -> f64 {
        self.q3 - self.q1
    }
}

/// Per-category box-and-whisker statistics.
///
/// Whisker bounds span the non-outlier values only; `outliers` holds the
/// values outside the 1.5-IQR fences in ascending order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub quartiles: QuartileSummary,
    pub lower_fence: f64,
    pub upper_fence: f64,
    pub whisker_min: f64,
    pub whisker_max: f64,
    pub outliers: Vec<f64>,
    pub sample_count: usize,
}

/// Linear-interpolation quantile over an ascending-sorted slice.
///
/// The caller guarantees `sorted` is non-empty and sorted; `p` is clamped to
/// `[0, 1]`.
#[must_use]
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let p = p.clamp(0.0, 1.0);
    let position = p * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Computes box-and-whisker statistics for one category's values.
///
/// Returns `None` for an empty set (empty box; the caller must not divide by
/// an empty range). A single value degenerates to a zero-height box with
/// whiskers collapsed onto it.
#[must_use]
pub fn category_stats(values: &[f64]) -> Option<CategoryStats> {
    if values.is_empty() {
        return None;
    }

    let mut sorted: Vec<f64> = values.to_vec();
    sorted.sort_by_key(|value| OrderedFloat(*value));

    let quartiles = QuartileSummary {
        q1: quantile_sorted(&sorted, 0.25),
        median: quantile_sorted(&sorted, 0.50),
        q3: quantile_sorted(&sorted, 0.75),
    };
    let iqr = quartiles.iqr();
    let lower_fence = quartiles.q1 - 1.5 * iqr;
    let upper_fence = quartiles.q3 + 1.5 * iqr;

    let mut outliers = Vec::new();
    let mut whisker_min = f64::INFINITY;
    let mut whisker_max = f64::NEG_INFINITY;
    for &value in &sorted {
        if value < lower_fence || value > upper_fence {
            outliers.push(value);
        } else {
            whisker_min = whisker_min.min(value);
            whisker_max = whisker_max.max(value);
        }
    }

    // The fences always contain the quartiles, so at least one value is a
    // non-outlier and the whisker bounds are finite.
    Some(CategoryStats {
        quartiles,
        lower_fence,
        upper_fence,
        whisker_min,
        whisker_max,
        outliers,
        sample_count: sorted.len(),
    })
}
