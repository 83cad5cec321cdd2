use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dataview::SelectionKey;
use crate::error::{VisualError, VisualResult};
use crate::host::ColorPalette;

/// Fallback when neither palette nor caller default can supply a color.
pub const FALLBACK_COLOR: &str = "#333333";

/// Default 3-stop gradient ramp, low to high.
pub const DEFAULT_GRADIENT_STOPS: [&str; 3] = ["#DEEBF7", "#9ECAE1", "#3182BD"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Rgb {
    r: u8,
    g: u8,
    b: u8,
}

fn parse_hex(color: &str) -> VisualResult<Rgb> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() != 6 {
        return Err(VisualError::InvalidData(format!(
            "expected #RRGGBB color, got `{color}`"
        )));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| {
            VisualError::InvalidData(format!("expected #RRGGBB color, got `{color}`"))
        })
    };
    Ok(Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

fn to_hex(rgb: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb.r, rgb.g, rgb.b)
}

fn lerp_channel(start: u8, end: u8, t: f64) -> u8 {
    let mixed = f64::from(start) + (f64::from(end) - f64::from(start)) * t;
    mixed.round().clamp(0.0, 255.0) as u8
}

fn lerp(start: Rgb, end: Rgb, t: f64) -> Rgb {
    Rgb {
        r: lerp_channel(start.r, end.r, t),
        g: lerp_channel(start.g, end.g, t),
        b: lerp_channel(start.b, end.b, t),
    }
}

/// Three-stop color ramp keyed by a gradient column's value range.
///
/// Values at or below the domain minimum take the low stop, values at or
/// above the maximum take the high stop, the midpoint takes the mid stop;
/// everything between interpolates linearly in RGB.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientScale {
    min: f64,
    max: f64,
    low: Rgb,
    mid: Rgb,
    high: Rgb,
}

impl GradientScale {
    pub fn new(min: f64, max: f64, stops: [&str; 3]) -> VisualResult<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(VisualError::InvalidData(
                "gradient domain must be finite with min <= max".to_owned(),
            ));
        }
        Ok(Self {
            min,
            max,
            low: parse_hex(stops[0])?,
            mid: parse_hex(stops[1])?,
            high: parse_hex(stops[2])?,
        })
    }

    /// Builds the default ramp over the non-null values of a gradient column.
    ///
    /// Returns `None` when the column holds no values to key the range on.
    pub fn from_column_values(values: &[Option<f64>]) -> VisualResult<Option<Self>> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values.iter().flatten().filter(|value| value.is_finite()) {
            min = min.min(*value);
            max = max.max(*value);
        }
        if min > max {
            return Ok(None);
        }
        Self::new(min, max, DEFAULT_GRADIENT_STOPS).map(Some)
    }

    /// Interpolated color for `value`, clamped to the domain.
    #[must_use]
    pub fn color_at(&self, value: f64) -> String {
        if self.min == self.max {
            return to_hex(self.mid);
        }
        let clamped = value.clamp(self.min, self.max);
        let normalized = (clamped - self.min) / (self.max - self.min);
        let rgb = if normalized <= 0.5 {
            lerp(self.low, self.mid, normalized * 2.0)
        } else {
            lerp(self.mid, self.high, (normalized - 0.5) * 2.0)
        };
        to_hex(rgb)
    }
}

/// Assigns display colors to data points within one conversion pass.
///
/// Priority per identity: explicit object fill, then palette by positional
/// index, then the caller default. Assignment is memoized by identity, so
/// the palette index advances once per distinct category/series and
/// highlight twins inherit their base point's color. Gradient-driven
/// recoloring composes downstream, where per-point values key a
/// [`GradientScale`].
#[derive(Debug)]
pub struct ColorResolver<'a> {
    palette: &'a ColorPalette,
    default_color: Option<&'a str>,
    memo: IndexMap<SelectionKey, String>,
    next_index: usize,
}

impl<'a> ColorResolver<'a> {
    #[must_use]
    pub fn new(palette: &'a ColorPalette, default_color: Option<&'a str>) -> Self {
        Self {
            palette,
            default_color,
            memo: IndexMap::new(),
            next_index: 0,
        }
    }

    /// Resolves the color for `identity`, memoizing the result.
    pub fn resolve(&mut self, identity: &SelectionKey, explicit: Option<&str>) -> String {
        if let Some(color) = self.memo.get(identity) {
            return color.clone();
        }

        let color = if let Some(explicit) = explicit {
            explicit.to_owned()
        } else if let Some(color) = self.palette.color_by_index(self.next_index) {
            self.next_index += 1;
            color.to_owned()
        } else if let Some(default_color) = self.default_color {
            default_color.to_owned()
        } else {
            FALLBACK_COLOR.to_owned()
        };

        self.memo.insert(identity.clone(), color.clone());
        color
    }
}
