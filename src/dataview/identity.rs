use serde::{Deserialize, Serialize};

/// Opaque, stable identity of one data point or series instance.
///
/// Keys compare and hash but carry no host meaning; the rendering layer uses
/// them to diff frames for selection/animation continuity, the conversion
/// layer uses them to memoize color assignment within a pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionKey(String);

impl SelectionKey {
    /// Identity of a category instance within a category column.
    #[must_use]
    pub fn for_category(column_key: &str, label: &str) -> Self {
        Self(format!("category|{column_key}|{label}"))
    }

    /// Identity of a measure-derived pseudo-category.
    #[must_use]
    pub fn for_measure(measure_key: &str) -> Self {
        Self(format!("measure|{measure_key}"))
    }

    /// Identity of a series instance when values are pivoted by a series field.
    #[must_use]
    pub fn for_series(series_key: &str, group_name: &str) -> Self {
        Self(format!("series|{series_key}|{group_name}"))
    }

    /// Identity scoped to a single row of a series (scatter points).
    #[must_use]
    pub fn for_row(parent: &SelectionKey, row: usize) -> Self {
        Self(format!("{}|row:{row}", parent.0))
    }

    /// Raw key supplied by the host's identity arrays, passed through opaque.
    #[must_use]
    pub fn from_host(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}
