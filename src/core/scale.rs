use serde::{Deserialize, Serialize};

use crate::core::types::Viewport;
use crate::error::{VisualError, VisualResult};

/// Plot orientation for axis-position mapping.
///
/// Vertical plots map values along the viewport height, horizontal plots
/// along the width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    /// Pixel extent of the value axis for this orientation.
    pub fn plot_extent(self, viewport: Viewport) -> VisualResult<f64> {
        if !viewport.is_valid() {
            return Err(VisualError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Ok(match self {
            Orientation::Vertical => f64::from(viewport.height),
            Orientation::Horizontal => f64::from(viewport.width),
        })
    }
}

/// Linear mapping from a value domain onto an explicit pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> VisualResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(VisualError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(VisualError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    /// Builds a scale over `[domain_min, domain_max]` mapped onto the plot
    /// extent of `orientation`. Vertical plots invert the pixel direction so
    /// larger values land closer to the top edge.
    pub fn for_orientation(
        domain_start: f64,
        domain_end: f64,
        viewport: Viewport,
        orientation: Orientation,
    ) -> VisualResult<Self> {
        let extent = orientation.plot_extent(viewport)?;
        match orientation {
            Orientation::Vertical => Self::new(domain_start, domain_end, extent, 0.0),
            Orientation::Horizontal => Self::new(domain_start, domain_end, 0.0, extent),
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Maps a domain value to its pixel position.
    pub fn scale(self, value: f64) -> VisualResult<f64> {
        if !value.is_finite() {
            return Err(VisualError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    /// Maps a pixel position back to its domain value.
    pub fn invert(self, pixel: f64) -> VisualResult<f64> {
        if !pixel.is_finite() {
            return Err(VisualError::InvalidData("pixel must be finite".to_owned()));
        }
        let range_span = self.range_end - self.range_start;
        if range_span == 0.0 {
            return Err(VisualError::InvalidData(
                "scale range must be non-zero to invert".to_owned(),
            ));
        }

        let normalized = (pixel - self.range_start) / range_span;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}
