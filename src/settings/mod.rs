//! Typed visual settings decoded once per conversion from the DataView's
//! object/property bags. Unknown objects and malformed values fall back to
//! defaults; decoding never errors.

use serde::{Deserialize, Serialize};

use crate::dataview::objects::{
    self, DataViewObjects, BOX_ORIENTATION, BOX_SHOW_OUTLIERS, BOX_SORT_ORDER, LABELS_COLOR,
    LABELS_DISPLAY_UNITS, LABELS_POSITION, LABELS_PRECISION, LABELS_SHOW, PERCENT_BAR_COLOR,
    PERCENT_BAR_SHOW,
};
use crate::host::format::DisplayUnits;

/// Placement of data labels relative to their mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelPosition {
    #[default]
    InsideCenter,
    InsideEnd,
    OutsideEnd,
}

impl LabelPosition {
    fn from_property(value: &str) -> Self {
        match value {
            "insideEnd" => LabelPosition::InsideEnd,
            "outsideEnd" => LabelPosition::OutsideEnd,
            _ => LabelPosition::InsideCenter,
        }
    }
}

/// Data-label configuration shared by the visuals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataLabelSettings {
    pub show: bool,
    pub color: Option<String>,
    pub display_units: DisplayUnits,
    pub precision: Option<u8>,
    pub position: LabelPosition,
}

impl Default for DataLabelSettings {
    fn default() -> Self {
        Self {
            show: true,
            color: None,
            display_units: DisplayUnits::Auto,
            precision: None,
            position: LabelPosition::default(),
        }
    }
}

impl DataLabelSettings {
    #[must_use]
    pub fn from_objects(bag: Option<&DataViewObjects>) -> Self {
        let defaults = Self::default();
        let Some(bag) = bag else {
            return defaults;
        };
        Self {
            show: bag.get_bool(LABELS_SHOW).unwrap_or(defaults.show),
            color: bag.get_fill_color(LABELS_COLOR).map(str::to_owned),
            display_units: bag
                .get_number(LABELS_DISPLAY_UNITS)
                .map(DisplayUnits::from_property)
                .unwrap_or(defaults.display_units),
            precision: bag
                .get_number(LABELS_PRECISION)
                .filter(|value| value.is_finite() && *value >= 0.0)
                .map(|value| value.min(17.0) as u8),
            position: bag
                .get_text(LABELS_POSITION)
                .map(LabelPosition::from_property)
                .unwrap_or(defaults.position),
        }
    }
}

/// Funnel percent-bar label configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentBarLabelSettings {
    pub show: bool,
    pub color: String,
}

impl Default for PercentBarLabelSettings {
    fn default() -> Self {
        Self {
            show: true,
            color: "#777777".to_owned(),
        }
    }
}

impl PercentBarLabelSettings {
    #[must_use]
    pub fn from_objects(bag: Option<&DataViewObjects>) -> Self {
        let defaults = Self::default();
        let Some(bag) = bag else {
            return defaults;
        };
        Self {
            show: bag.get_bool(PERCENT_BAR_SHOW).unwrap_or(defaults.show),
            color: bag
                .get_fill_color(PERCENT_BAR_COLOR)
                .map(str::to_owned)
                .unwrap_or(defaults.color),
        }
    }
}

/// Category ordering applied before box statistics are positioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategorySortOrder {
    /// Keep the host's category order.
    #[default]
    Natural,
    Ascending,
    Descending,
}

impl CategorySortOrder {
    fn from_property(value: &str) -> Self {
        match value {
            "ascending" => CategorySortOrder::Ascending,
            "descending" => CategorySortOrder::Descending,
            _ => CategorySortOrder::Natural,
        }
    }
}

pub use crate::core::scale::Orientation;

/// Box-and-whisker chart options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotSettings {
    pub orientation: Orientation,
    pub sort_order: CategorySortOrder,
    pub show_outliers: bool,
}

impl Default for BoxPlotSettings {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            sort_order: CategorySortOrder::default(),
            show_outliers: true,
        }
    }
}

impl BoxPlotSettings {
    #[must_use]
    pub fn from_objects(bag: Option<&DataViewObjects>) -> Self {
        let defaults = Self::default();
        let Some(bag) = bag else {
            return defaults;
        };
        Self {
            orientation: match bag.get_text(BOX_ORIENTATION) {
                Some("horizontal") => Orientation::Horizontal,
                Some(_) | None => defaults.orientation,
            },
            sort_order: bag
                .get_text(BOX_SORT_ORDER)
                .map(CategorySortOrder::from_property)
                .unwrap_or(defaults.sort_order),
            show_outliers: bag
                .get_bool(BOX_SHOW_OUTLIERS)
                .unwrap_or(defaults.show_outliers),
        }
    }
}

/// Per-point fill override read from a category entry's object bag.
#[must_use]
pub fn point_fill_override(bag: Option<&DataViewObjects>) -> Option<String> {
    bag.and_then(|bag| bag.get_fill_color(objects::DATA_POINT_FILL))
        .map(str::to_owned)
}

/// Visual-level default data-point color, when the user configured one.
#[must_use]
pub fn default_color_override(bag: Option<&DataViewObjects>) -> Option<String> {
    bag.and_then(|bag| bag.get_fill_color(objects::DATA_POINT_DEFAULT_COLOR))
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataview::objects::ObjectValue;

    #[test]
    fn missing_bag_yields_defaults() {
        let settings = DataLabelSettings::from_objects(None);
        assert_eq!(settings, DataLabelSettings::default());
    }

    #[test]
    fn malformed_values_fall_back() {
        let bag = DataViewObjects::new()
            .with(LABELS_SHOW, ObjectValue::Text("yes".to_owned()))
            .with(LABELS_PRECISION, ObjectValue::Number(-3.0));
        let settings = DataLabelSettings::from_objects(Some(&bag));
        assert!(settings.show);
        assert_eq!(settings.precision, None);
    }

    #[test]
    fn box_options_decode() {
        let bag = DataViewObjects::new()
            .with(BOX_ORIENTATION, ObjectValue::Text("horizontal".to_owned()))
            .with(BOX_SORT_ORDER, ObjectValue::Text("descending".to_owned()));
        let settings = BoxPlotSettings::from_objects(Some(&bag));
        assert_eq!(settings.orientation, Orientation::Horizontal);
        assert_eq!(settings.sort_order, CategorySortOrder::Descending);
        assert!(settings.show_outliers);
    }
}
