use tracing::debug;

use crate::dataview::{
    ColumnMetadata, DataView, DataViewObjects, Role, SelectionKey, ValueColumn, ValueLayout,
};
use crate::error::VisualResult;

/// Label substituted for null/empty category entries.
pub const BLANK_CATEGORY_LABEL: &str = "(Blank)";

/// One resolved category: display label, stable identity, optional per-entry
/// style overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlot {
    pub label: String,
    pub identity: SelectionKey,
    pub objects: Option<DataViewObjects>,
}

/// One (category, measure) tuple produced by extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureRow {
    pub category_index: usize,
    /// Index into the originating `DataView::values`.
    pub column_index: usize,
    pub value: Option<f64>,
    pub highlight: Option<f64>,
}

/// Normalized category/value structure shared by the converters.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub slots: Vec<CategorySlot>,
    pub rows: Vec<MeasureRow>,
    pub layout: ValueLayout,
    pub category_source: Option<ColumnMetadata>,
    /// Indices of columns that participate in the value pipeline
    /// (gradient-only columns are excluded).
    pub value_columns: Vec<usize>,
    /// First column carrying the Gradient role, used for color only.
    pub gradient_column: Option<usize>,
    pub has_highlights: bool,
}

impl Extraction {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Resolves a category label, substituting the blank label for null/empty.
#[must_use]
pub fn category_label(raw: Option<&str>) -> String {
    match raw {
        Some(label) if !label.is_empty() => label.to_owned(),
        _ => BLANK_CATEGORY_LABEL.to_owned(),
    }
}

/// Normalizes the DataView into parallel category slots and measure rows.
///
/// With a category column present, each category entry becomes one slot and
/// every included measure contributes one row per entry. Without a category
/// role, each included value column becomes one pseudo-category labeled by
/// its group name (when pivoted) or display name, carrying the column's
/// subtotal when the host supplies one and its first value otherwise.
pub fn extract(view: &DataView) -> VisualResult<Extraction> {
    view.validate()?;

    let layout = view.layout();
    let value_columns: Vec<usize> = view
        .values
        .iter()
        .enumerate()
        .filter(|(_, column)| !column.source.roles.is_gradient_only())
        .map(|(index, _)| index)
        .collect();
    let gradient_column = view
        .values
        .iter()
        .position(|column| column.source.roles.contains(Role::Gradient));
    let has_highlights = view
        .values
        .iter()
        .enumerate()
        .filter(|(index, _)| value_columns.contains(index))
        .any(|(_, column)| column.has_highlights());

    let mut slots = Vec::new();
    let mut rows = Vec::new();

    match &view.categories {
        Some(categories) => {
            let column_key = categories.source.measure_key().to_owned();
            for (entry, raw) in categories.values.iter().enumerate() {
                let label = category_label(raw.as_deref());
                let identity = categories
                    .identity
                    .as_ref()
                    .and_then(|keys| keys.get(entry).cloned())
                    .unwrap_or_else(|| SelectionKey::for_category(&column_key, &label));
                let objects = categories
                    .objects
                    .as_ref()
                    .and_then(|objects| objects.get(entry).cloned())
                    .flatten();
                slots.push(CategorySlot {
                    label,
                    identity,
                    objects,
                });

                for &column_index in &value_columns {
                    let column = &view.values[column_index];
                    rows.push(MeasureRow {
                        category_index: entry,
                        column_index,
                        value: column.values.get(entry).copied().flatten(),
                        highlight: highlight_at(column, entry),
                    });
                }
            }
        }
        None => {
            for &column_index in &value_columns {
                let column = &view.values[column_index];
                let slot_index = slots.len();
                slots.push(pseudo_category(column));
                rows.push(MeasureRow {
                    category_index: slot_index,
                    column_index,
                    value: column
                        .subtotal
                        .or_else(|| column.values.first().copied().flatten()),
                    highlight: highlight_at(column, 0),
                });
            }
        }
    }

    debug!(
        slots = slots.len(),
        rows = rows.len(),
        gradient_only = value_columns.len() < view.values.len(),
        has_highlights,
        "extracted category/value rows"
    );

    Ok(Extraction {
        slots,
        rows,
        layout,
        category_source: view.categories.as_ref().map(|c| c.source.clone()),
        value_columns,
        gradient_column,
        has_highlights,
    })
}

fn highlight_at(column: &ValueColumn, entry: usize) -> Option<f64> {
    column
        .highlights
        .as_ref()
        .and_then(|highlights| highlights.get(entry).copied())
        .flatten()
}

/// Builds the pseudo-category for one value column: group name when pivoted
/// by series, display name otherwise.
fn pseudo_category(column: &ValueColumn) -> CategorySlot {
    match (&column.group_name, &column.identity) {
        (Some(group), Some(identity)) => CategorySlot {
            label: group.clone(),
            identity: identity.clone(),
            objects: column.objects.clone(),
        },
        (Some(group), None) => CategorySlot {
            label: group.clone(),
            identity: SelectionKey::for_series(column.source.measure_key(), group),
            objects: column.objects.clone(),
        },
        _ => CategorySlot {
            label: column.source.display_name.clone(),
            identity: SelectionKey::for_measure(column.source.measure_key()),
            objects: column.objects.clone(),
        },
    }
}

/// First column per axis role, in declaration order.
///
/// Resolution runs per series group for pivoted data and over the whole
/// value set otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct AxisColumns<'a> {
    pub x: Option<&'a ValueColumn>,
    pub y: Option<&'a ValueColumn>,
    pub size: Option<&'a ValueColumn>,
    pub gradient: Option<&'a ValueColumn>,
}

/// Resolves which value columns drive each scatter axis.
#[must_use]
pub fn resolve_axis_columns<'a>(columns: &[&'a ValueColumn]) -> AxisColumns<'a> {
    let first_with = |role: Role| {
        columns
            .iter()
            .copied()
            .find(|column| column.source.roles.contains(role))
    };
    AxisColumns {
        x: first_with(Role::X),
        y: first_with(Role::Y),
        size: first_with(Role::Size),
        gradient: first_with(Role::Gradient),
    }
}

/// One scatter row after axis-role resolution and null handling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterRow {
    pub row_index: usize,
    pub x: f64,
    pub y: f64,
    pub size: Option<f64>,
    pub highlight: Option<f64>,
}

/// Applies the scatter row rules:
/// - X and Y both present with no Size: a null on either axis drops the row
/// - an absent axis role substitutes 0 without dropping
/// - a null Size stays null (rendered as a hollow marker downstream)
#[must_use]
pub fn scatter_rows(axes: &AxisColumns<'_>, row_count: usize) -> Vec<ScatterRow> {
    let value_at = |column: Option<&ValueColumn>, row: usize| -> Option<f64> {
        column
            .and_then(|column| column.values.get(row).copied())
            .flatten()
    };
    let drop_on_null_axis = axes.x.is_some() && axes.y.is_some() && axes.size.is_none();

    let mut rows = Vec::with_capacity(row_count);
    let mut dropped = 0_usize;
    for row_index in 0..row_count {
        let x = value_at(axes.x, row_index);
        let y = value_at(axes.y, row_index);
        if drop_on_null_axis && (x.is_none() || y.is_none()) {
            dropped += 1;
            continue;
        }

        rows.push(ScatterRow {
            row_index,
            x: x.unwrap_or(0.0),
            y: y.unwrap_or(0.0),
            size: value_at(axes.size, row_index),
            highlight: axes
                .y
                .and_then(|column| highlight_at(column, row_index)),
        });
    }

    if dropped > 0 {
        debug!(dropped, kept = rows.len(), "dropped rows with null axis values");
    }
    rows
}
