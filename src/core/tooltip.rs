use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One tooltip row: display name and formatted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipItem {
    pub display_name: String,
    pub value: String,
}

impl TooltipItem {
    #[must_use]
    pub fn new(display_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            value: value.into(),
        }
    }
}

/// Collects tooltip rows in display order.
///
/// When tooltips are disabled for the conversion call, `finish` returns
/// `None` for every point; an enabled-but-empty tooltip returns an empty
/// list, so "disabled" and "nothing to show" stay distinguishable.
#[derive(Debug)]
pub struct TooltipBuilder {
    enabled: bool,
    items: SmallVec<[TooltipItem; 8]>,
}

impl TooltipBuilder {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            items: SmallVec::new(),
        }
    }

    pub fn push(&mut self, display_name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        if self.enabled {
            self.items.push(TooltipItem::new(display_name, value));
        }
        self
    }

    /// Pushes a row only when `value` is present.
    pub fn push_opt(&mut self, display_name: &str, value: Option<String>) -> &mut Self {
        if let Some(value) = value {
            self.push(display_name, value);
        }
        self
    }

    #[must_use]
    pub fn finish(self) -> Option<Vec<TooltipItem>> {
        self.enabled.then(|| self.items.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_builder_returns_none() {
        let mut builder = TooltipBuilder::new(false);
        builder.push("a", "1");
        assert_eq!(builder.finish(), None);
    }

    #[test]
    fn enabled_empty_builder_returns_empty_list() {
        let builder = TooltipBuilder::new(true);
        assert_eq!(builder.finish(), Some(Vec::new()));
    }

    #[test]
    fn rows_preserve_push_order() {
        let mut builder = TooltipBuilder::new(true);
        builder.push("category", "West");
        builder.push_opt("Highlighted", Some("0".to_owned()));
        builder.push_opt("Percent of first", None);
        let items = builder.finish().expect("enabled");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].display_name, "category");
        assert_eq!(items[1].display_name, "Highlighted");
    }
}
