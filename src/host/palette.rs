use std::cell::RefCell;

use indexmap::IndexMap;

/// Default ordered palette cycled for categorical coloring.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#01B8AA", "#374649", "#FD625E", "#F2C80F", "#5F6B6D", "#8AD4EB", "#FE9666", "#A66999",
];

/// Host color palette: ordered colors by positional index plus stable
/// per-measure-key assignment.
///
/// Measure-key colors are handed out in allocation order and remembered for
/// the palette's lifetime, so repeated conversions against the same palette
/// keep measures on stable colors.
#[derive(Debug)]
pub struct ColorPalette {
    colors: Vec<String>,
    measure_memo: RefCell<IndexMap<String, usize>>,
}

impl ColorPalette {
    #[must_use]
    pub fn new(colors: Vec<String>) -> Self {
        Self {
            colors,
            measure_memo: RefCell::new(IndexMap::new()),
        }
    }

    /// Color at `index`, cycling past the end. `None` for an empty palette.
    #[must_use]
    pub fn color_by_index(&self, index: usize) -> Option<&str> {
        if self.colors.is_empty() {
            return None;
        }
        Some(&self.colors[index % self.colors.len()])
    }

    /// Stable color for a measure key, allocated on first sight.
    #[must_use]
    pub fn color_for_measure(&self, key: &str) -> Option<String> {
        if self.colors.is_empty() {
            return None;
        }
        let mut memo = self.measure_memo.borrow_mut();
        let next = memo.len();
        let index = *memo.entry(key.to_owned()).or_insert(next);
        Some(self.colors[index % self.colors.len()].clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE.iter().map(|&color| color.to_owned()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_lookup_cycles() {
        let palette = ColorPalette::new(vec!["#111111".to_owned(), "#222222".to_owned()]);
        assert_eq!(palette.color_by_index(0), Some("#111111"));
        assert_eq!(palette.color_by_index(3), Some("#222222"));
    }

    #[test]
    fn measure_colors_are_stable_across_lookups() {
        let palette = ColorPalette::default();
        let first = palette.color_for_measure("sales").expect("color");
        let second = palette.color_for_measure("profit").expect("color");
        assert_ne!(first, second);
        assert_eq!(palette.color_for_measure("sales").expect("color"), first);
    }
}
