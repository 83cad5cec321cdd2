use serde::{Deserialize, Serialize};

use crate::dataview::column::ColumnMetadata;
use crate::dataview::identity::SelectionKey;
use crate::dataview::objects::DataViewObjects;
use crate::error::{VisualError, VisualResult};

/// Optional single category column of a categorical DataView.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryColumn {
    pub source: ColumnMetadata,
    /// Raw category labels; `None` and empty strings are blank categories.
    pub values: Vec<Option<String>>,
    /// Host-supplied identities, parallel to `values` when present.
    pub identity: Option<Vec<SelectionKey>>,
    /// Per-category style overrides, parallel to `values` when present.
    pub objects: Option<Vec<Option<DataViewObjects>>>,
}

impl CategoryColumn {
    #[must_use]
    pub fn new(source: ColumnMetadata, values: Vec<Option<String>>) -> Self {
        Self {
            source,
            values,
            identity: None,
            objects: None,
        }
    }

    #[must_use]
    pub fn with_identity(mut self, identity: Vec<SelectionKey>) -> Self {
        self.identity = Some(identity);
        self
    }

    #[must_use]
    pub fn with_objects(mut self, objects: Vec<Option<DataViewObjects>>) -> Self {
        self.objects = Some(objects);
        self
    }
}

/// One measure column of the DataView value group.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueColumn {
    pub source: ColumnMetadata,
    pub values: Vec<Option<f64>>,
    /// Optional highlight overlay, parallel to `values`; `None` entries mean
    /// "no highlight" for that row.
    pub highlights: Option<Vec<Option<f64>>>,
    pub subtotal: Option<f64>,
    /// Series-instance identity when pivoted by a series field.
    pub identity: Option<SelectionKey>,
    /// Series group value when pivoted by a series field.
    pub group_name: Option<String>,
    /// Per-series style overrides.
    pub objects: Option<DataViewObjects>,
}

impl ValueColumn {
    #[must_use]
    pub fn new(source: ColumnMetadata, values: Vec<Option<f64>>) -> Self {
        Self {
            source,
            values,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_highlights(mut self, highlights: Vec<Option<f64>>) -> Self {
        self.highlights = Some(highlights);
        self
    }

    #[must_use]
    pub fn with_subtotal(mut self, subtotal: f64) -> Self {
        self.subtotal = Some(subtotal);
        self
    }

    #[must_use]
    pub fn with_group(mut self, group_name: impl Into<String>, identity: SelectionKey) -> Self {
        self.group_name = Some(group_name.into());
        self.identity = Some(identity);
        self
    }

    #[must_use]
    pub fn with_objects(mut self, objects: DataViewObjects) -> Self {
        self.objects = Some(objects);
        self
    }

    #[must_use]
    pub fn has_highlights(&self) -> bool {
        self.highlights
            .as_ref()
            .is_some_and(|highlights| highlights.iter().any(Option::is_some))
    }
}

/// Per-series slice of the value group, produced by [`DataView::grouped`].
#[derive(Debug)]
pub struct ValueGroup<'a> {
    pub name: Option<&'a str>,
    pub identity: Option<&'a SelectionKey>,
    pub objects: Option<&'a DataViewObjects>,
    pub columns: Vec<&'a ValueColumn>,
}

/// Shape discriminant of the value group, resolved once per conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueLayout {
    Empty,
    SingleMeasure,
    MultiMeasure { measures: usize },
    PivotedBySeries { series: usize },
}

/// Categorical data description handed in by the host on every data change.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataView {
    pub categories: Option<CategoryColumn>,
    pub values: Vec<ValueColumn>,
    /// Metadata of the series field when values are pivoted by series.
    pub series_source: Option<ColumnMetadata>,
    /// Visual-level settings bag.
    pub objects: Option<DataViewObjects>,
}

impl DataView {
    #[must_use]
    pub fn new(categories: Option<CategoryColumn>, values: Vec<ValueColumn>) -> Self {
        Self {
            categories,
            values,
            series_source: None,
            objects: None,
        }
    }

    #[must_use]
    pub fn with_series_source(mut self, series_source: ColumnMetadata) -> Self {
        self.series_source = Some(series_source);
        self
    }

    #[must_use]
    pub fn with_objects(mut self, objects: DataViewObjects) -> Self {
        self.objects = Some(objects);
        self
    }

    /// Checks the host length contract: every value/highlight/identity array
    /// must be parallel to the category array (when categories are present)
    /// or mutually equal in length (when they are not).
    ///
    /// A violation here is the one condition with no documented recovery.
    pub fn validate(&self) -> VisualResult<()> {
        let expected = match &self.categories {
            Some(categories) => {
                if let Some(identity) = &categories.identity {
                    if identity.len() != categories.values.len() {
                        return Err(VisualError::MalformedDataView {
                            column: format!("{} (identity)", categories.source.display_name),
                            expected: categories.values.len(),
                            actual: identity.len(),
                        });
                    }
                }
                if let Some(objects) = &categories.objects {
                    if objects.len() != categories.values.len() {
                        return Err(VisualError::MalformedDataView {
                            column: format!("{} (objects)", categories.source.display_name),
                            expected: categories.values.len(),
                            actual: objects.len(),
                        });
                    }
                }
                Some(categories.values.len())
            }
            None => self.values.first().map(|column| column.values.len()),
        };

        let Some(expected) = expected else {
            return Ok(());
        };

        for column in &self.values {
            if column.values.len() != expected {
                return Err(VisualError::MalformedDataView {
                    column: column.source.display_name.clone(),
                    expected,
                    actual: column.values.len(),
                });
            }
            if let Some(highlights) = &column.highlights {
                if highlights.len() != expected {
                    return Err(VisualError::MalformedDataView {
                        column: format!("{} (highlights)", column.source.display_name),
                        expected,
                        actual: highlights.len(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Resolves the value-group shape discriminant.
    #[must_use]
    pub fn layout(&self) -> ValueLayout {
        if self.values.is_empty() {
            return ValueLayout::Empty;
        }
        let series = self
            .values
            .iter()
            .filter(|column| column.group_name.is_some())
            .count();
        if series > 0 {
            let groups = self.grouped().len();
            return ValueLayout::PivotedBySeries { series: groups };
        }
        if self.values.len() == 1 {
            ValueLayout::SingleMeasure
        } else {
            ValueLayout::MultiMeasure {
                measures: self.values.len(),
            }
        }
    }

    /// Groups value columns by series instance, preserving encounter order.
    ///
    /// Columns without a group name form a single unnamed group; this matches
    /// the host's `.grouped()` accessor for non-pivoted data.
    #[must_use]
    pub fn grouped(&self) -> Vec<ValueGroup<'_>> {
        let mut groups: Vec<ValueGroup<'_>> = Vec::new();
        for column in &self.values {
            let name = column.group_name.as_deref();
            match groups.iter_mut().find(|group| group.name == name) {
                Some(group) => group.columns.push(column),
                None => groups.push(ValueGroup {
                    name,
                    identity: column.identity.as_ref(),
                    objects: column.objects.as_ref(),
                    columns: vec![column],
                }),
            }
        }
        groups
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_none() && self.values.is_empty()
    }
}
