use serde::{Deserialize, Serialize};

use crate::dataview::SelectionKey;

/// One legend entry; color always matches the series' data points because
/// both come from the same memoized resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendItem {
    pub label: String,
    pub color: String,
    pub identity: SelectionKey,
    pub selected: bool,
}

/// Legend block emitted by series-aware conversions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendData {
    pub title: Option<String>,
    pub items: Vec<LegendItem>,
}

impl LegendData {
    #[must_use]
    pub fn new(title: Option<String>) -> Self {
        Self {
            title,
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
