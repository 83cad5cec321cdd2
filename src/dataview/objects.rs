use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A solid-color fill carried in an object bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    pub solid_color: String,
}

/// One user-configured property value inside an object bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Fill(Fill),
}

/// Identifies one property inside one object, by fixed constants.
///
/// Lookups always go through these identifiers; no call site assembles
/// object/property names ad hoc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyId {
    pub object_name: &'static str,
    pub property_name: &'static str,
}

pub const DATA_POINT_FILL: PropertyId = PropertyId {
    object_name: "dataPoint",
    property_name: "fill",
};
pub const DATA_POINT_DEFAULT_COLOR: PropertyId = PropertyId {
    object_name: "dataPoint",
    property_name: "defaultColor",
};
pub const LABELS_SHOW: PropertyId = PropertyId {
    object_name: "labels",
    property_name: "show",
};
pub const LABELS_COLOR: PropertyId = PropertyId {
    object_name: "labels",
    property_name: "color",
};
pub const LABELS_DISPLAY_UNITS: PropertyId = PropertyId {
    object_name: "labels",
    property_name: "labelDisplayUnits",
};
pub const LABELS_PRECISION: PropertyId = PropertyId {
    object_name: "labels",
    property_name: "labelPrecision",
};
pub const LABELS_POSITION: PropertyId = PropertyId {
    object_name: "labels",
    property_name: "labelPosition",
};
pub const PERCENT_BAR_SHOW: PropertyId = PropertyId {
    object_name: "percentBarLabel",
    property_name: "show",
};
pub const PERCENT_BAR_COLOR: PropertyId = PropertyId {
    object_name: "percentBarLabel",
    property_name: "color",
};
pub const BOX_ORIENTATION: PropertyId = PropertyId {
    object_name: "chartOptions",
    property_name: "orientation",
};
pub const BOX_SORT_ORDER: PropertyId = PropertyId {
    object_name: "chartOptions",
    property_name: "sortOrder",
};
pub const BOX_SHOW_OUTLIERS: PropertyId = PropertyId {
    object_name: "chartOptions",
    property_name: "showOutliers",
};

/// User-configured visual settings, keyed by object then property name.
///
/// Read-only input to conversion; unknown names and malformed values fall
/// back to defaults at the decoding layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataViewObjects(IndexMap<String, IndexMap<String, ObjectValue>>);

impl DataViewObjects {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, id: PropertyId, value: ObjectValue) -> Self {
        self.0
            .entry(id.object_name.to_owned())
            .or_default()
            .insert(id.property_name.to_owned(), value);
        self
    }

    #[must_use]
    pub fn with_fill(self, id: PropertyId, color: impl Into<String>) -> Self {
        self.with(
            id,
            ObjectValue::Fill(Fill {
                solid_color: color.into(),
            }),
        )
    }

    #[must_use]
    pub fn get(&self, id: PropertyId) -> Option<&ObjectValue> {
        self.0.get(id.object_name)?.get(id.property_name)
    }

    #[must_use]
    pub fn get_bool(&self, id: PropertyId) -> Option<bool> {
        match self.get(id)? {
            ObjectValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_number(&self, id: PropertyId) -> Option<f64> {
        match self.get(id)? {
            ObjectValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_text(&self, id: PropertyId) -> Option<&str> {
        match self.get(id)? {
            ObjectValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the solid fill color for `id`, if one is configured.
    #[must_use]
    pub fn get_fill_color(&self, id: PropertyId) -> Option<&str> {
        match self.get(id)? {
            ObjectValue::Fill(fill) => Some(&fill.solid_color),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_lookup_ignores_mismatched_value_kinds() {
        let objects = DataViewObjects::new()
            .with(LABELS_SHOW, ObjectValue::Bool(true))
            .with_fill(DATA_POINT_FILL, "#FF0000");

        assert_eq!(objects.get_fill_color(DATA_POINT_FILL), Some("#FF0000"));
        assert_eq!(objects.get_fill_color(LABELS_SHOW), None);
        assert_eq!(objects.get_bool(LABELS_SHOW), Some(true));
        assert_eq!(objects.get_number(LABELS_PRECISION), None);
    }
}
