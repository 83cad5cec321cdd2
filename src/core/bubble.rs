use serde::{Deserialize, Serialize};

use crate::core::types::Viewport;
use crate::error::{VisualError, VisualResult};

/// Pixel-area range constants, calibrated for a 300x300 reference chart.
///
/// These are configuration, not contract: the bubble-size feel is tuned by
/// scaling the min/max area targets with the squared shorter viewport side
/// against the reference chart area.
pub const AREA_OF_300_BY_300_CHART: f64 = 90_000.0;
pub const MIN_SIZE_RANGE: f64 = 100.0;
pub const MAX_SIZE_RANGE: f64 = 200.0;

/// Inclusive numeric range of the size measure across the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataRange {
    pub min: f64,
    pub max: f64,
    pub delta: f64,
}

impl DataRange {
    pub fn new(min: f64, max: f64) -> VisualResult<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(VisualError::InvalidData(
                "data range must be finite with min <= max".to_owned(),
            ));
        }
        Ok(Self {
            min,
            max,
            delta: max - min,
        })
    }

    /// Range over the non-null values of a size column, when any exist.
    #[must_use]
    pub fn from_values(values: &[Option<f64>]) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values.iter().flatten().filter(|value| value.is_finite()) {
            min = min.min(*value);
            max = max.max(*value);
        }
        if min > max {
            return None;
        }
        DataRange::new(min, max).ok()
    }
}

/// Target bubble pixel-area range for a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelSizeRange {
    pub min_range: f64,
    pub max_range: f64,
    pub delta: f64,
}

/// Derives the bubble pixel-area range from the viewport.
///
/// The reference targets scale with `min(width, height)^2` against the
/// 300x300 reference chart area and round to whole pixels.
pub fn bubble_pixel_area_size_range(
    viewport: Viewport,
    min_size_range: f64,
    max_size_range: f64,
) -> VisualResult<PixelSizeRange> {
    if !viewport.is_valid() {
        return Err(VisualError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    if !min_size_range.is_finite()
        || !max_size_range.is_finite()
        || min_size_range <= 0.0
        || max_size_range < min_size_range
    {
        return Err(VisualError::InvalidData(
            "size range constants must be finite with 0 < min <= max".to_owned(),
        ));
    }

    let min_side = viewport.min_side();
    let ratio = (min_side * min_side) / AREA_OF_300_BY_300_CHART;
    let min_range = (min_size_range * ratio).round();
    let max_range = (max_size_range * ratio).round();
    Ok(PixelSizeRange {
        min_range,
        max_range,
        delta: max_range - min_range,
    })
}

/// Projects a size value through the area range into a marker pixel size.
///
/// The value maps linearly into the pixel-area range (clamped to the data
/// range first), then converts area to diameter and rounds to whole pixels.
/// A degenerate data range pins every in-range value to the minimum area.
#[must_use]
pub fn project_size_to_pixels(
    value: f64,
    data_range: DataRange,
    pixel_range: PixelSizeRange,
) -> f64 {
    let area = if data_range.delta == 0.0 || pixel_range.delta == 0.0 {
        pixel_range.min_range
    } else {
        let clamped = value.clamp(data_range.min, data_range.max);
        let relative = (clamped - data_range.min) / data_range.delta;
        pixel_range.min_range + relative * pixel_range.delta
    };

    (2.0 * (area / std::f64::consts::PI).sqrt()).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_viewport_produces_calibrated_range() {
        let range =
            bubble_pixel_area_size_range(Viewport::new(500, 500), MIN_SIZE_RANGE, MAX_SIZE_RANGE)
                .expect("range");
        assert_eq!(range.min_range, 278.0);
        assert_eq!(range.max_range, 556.0);
        assert_eq!(range.delta, 278.0);
    }

    #[test]
    fn minimum_value_projects_to_minimum_area_diameter() {
        let data_range = DataRange::new(310.0, 350.0).expect("data range");
        let pixel_range = PixelSizeRange {
            min_range: 278.0,
            max_range: 556.0,
            delta: 278.0,
        };
        assert_eq!(project_size_to_pixels(310.0, data_range, pixel_range), 19.0);
    }

    #[test]
    fn out_of_range_values_clamp_to_bounds() {
        let data_range = DataRange::new(0.0, 100.0).expect("data range");
        let pixel_range = PixelSizeRange {
            min_range: 100.0,
            max_range: 400.0,
            delta: 300.0,
        };
        let below = project_size_to_pixels(-50.0, data_range, pixel_range);
        let at_min = project_size_to_pixels(0.0, data_range, pixel_range);
        let above = project_size_to_pixels(500.0, data_range, pixel_range);
        let at_max = project_size_to_pixels(100.0, data_range, pixel_range);
        assert_eq!(below, at_min);
        assert_eq!(above, at_max);
    }
}
