use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::color::ColorResolver;
use crate::core::extract::{self, Extraction};
use crate::core::numeric::{self, DataWarning};
use crate::core::percent::{PercentMetrics, percent_metrics};
use crate::core::sanitize::SanitizedSeries;
use crate::core::tooltip::{TooltipBuilder, TooltipItem};
use crate::dataview::{ColumnMetadata, DataView, SelectionKey};
use crate::error::{VisualError, VisualResult};
use crate::host::format::{DisplayUnits, ValueFormatter};
use crate::host::{ColorPalette, HostCapabilities};
use crate::settings::{self, DataLabelSettings, PercentBarLabelSettings};

const HIGHLIGHTED: &str = "Highlighted";
const PERCENT_OF_FIRST: &str = "Percent of first";
const PERCENT_OF_PREVIOUS: &str = "Percent of previous";
const PERCENT_OF_FIRST_HIGHLIGHTED: &str = "Percent of first (highlighted)";
const PERCENT_OF_PREVIOUS_HIGHLIGHTED: &str = "Percent of previous (highlighted)";

/// One funnel bar, or the highlight twin rendered over it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelDataPoint {
    pub value: f64,
    pub original_value: f64,
    pub highlight_value: Option<f64>,
    pub original_highlight_value: Option<f64>,
    pub category: String,
    pub identity: SelectionKey,
    pub color: String,
    /// Index of the category entry, or of the measure column when measures
    /// form pseudo-categories.
    pub category_or_measure_index: usize,
    /// True for the highlight twin overlaid on its base bar.
    pub highlight: bool,
    pub selected: bool,
    pub tooltip_info: Option<Vec<TooltipItem>>,
}

/// Funnel conversion output consumed by rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelData {
    pub data_points: Vec<FunnelDataPoint>,
    pub category_labels: Vec<String>,
    pub values_metadata: Vec<ColumnMetadata>,
    pub has_highlights: bool,
    /// True when some highlight exceeds its base value; rendering switches
    /// to the overflow bar treatment.
    pub highlights_overflow: bool,
    pub can_show_data_labels: bool,
    pub data_labels_settings: DataLabelSettings,
    pub percent_bar_label_settings: PercentBarLabelSettings,
    pub has_negative_values: bool,
    pub all_values_are_negative: bool,
    pub warning: Option<DataWarning>,
}

impl FunnelData {
    /// Serializes the converted model to pretty JSON for snapshot diffing.
    pub fn to_json_pretty(&self) -> VisualResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| VisualError::InvalidData(format!("failed to serialize funnel data: {e}")))
    }

    /// Deserializes a converted model from JSON.
    pub fn from_json_str(input: &str) -> VisualResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| VisualError::InvalidData(format!("failed to parse funnel data: {e}")))
    }

    fn empty(view: &DataView) -> Self {
        Self {
            data_points: Vec::new(),
            category_labels: Vec::new(),
            values_metadata: Vec::new(),
            has_highlights: false,
            highlights_overflow: false,
            can_show_data_labels: false,
            data_labels_settings: DataLabelSettings::from_objects(view.objects.as_ref()),
            percent_bar_label_settings: PercentBarLabelSettings::from_objects(
                view.objects.as_ref(),
            ),
            has_negative_values: false,
            all_values_are_negative: false,
            warning: None,
        }
    }
}

/// Converts a categorical DataView into funnel data.
///
/// With a category column, each category entry becomes one bar fed by the
/// first value column; without one, each value column becomes its own
/// pseudo-category bar. Highlighted datasets interleave a highlight twin
/// after each base bar.
pub fn convert(
    view: &DataView,
    palette: &ColorPalette,
    capabilities: &HostCapabilities,
    default_color: Option<&str>,
    tooltips_enabled: bool,
) -> VisualResult<FunnelData> {
    let extraction = extract::extract(view)?;
    if extraction.is_empty() {
        debug!("empty funnel data view");
        return Ok(FunnelData::empty(view));
    }

    let rows = funnel_rows(&extraction, view);
    let raw_values: Vec<Option<f64>> = rows.iter().map(|row| row.value).collect();
    let raw_highlights: Vec<Option<f64>> = rows.iter().map(|row| row.highlight).collect();
    let has_highlights = raw_highlights.iter().any(Option::is_some);

    let contamination =
        numeric::scan_for_contamination(raw_values.iter().chain(raw_highlights.iter()));
    let series = SanitizedSeries::from_values(&raw_values, &raw_highlights);
    let warning = DataWarning::merge(contamination, numeric::sign_policy_warning(series.policy));

    let base_values: Vec<f64> = series
        .values
        .iter()
        .map(|pair| pair.map_or(0.0, |pair| pair.value))
        .collect();
    let highlight_values: Vec<Option<f64>> = series
        .highlights
        .iter()
        .map(|pair| pair.map(|pair| pair.value))
        .collect();
    let highlights_overflow = has_highlights
        && highlight_values
            .iter()
            .zip(&base_values)
            .any(|(highlight, base)| highlight.is_some_and(|highlight| highlight > *base));

    let default_override = settings::default_color_override(view.objects.as_ref());
    let default_color = default_override.as_deref().or(default_color);
    let mut resolver = ColorResolver::new(palette, default_color);
    let formatter = ValueFormatter::new(DisplayUnits::None, None, capabilities.locale);

    let mut data_points = Vec::with_capacity(rows.len() * if has_highlights { 2 } else { 1 });
    for (index, row) in rows.iter().enumerate() {
        let slot = &extraction.slots[row.slot_index];
        let explicit = settings::point_fill_override(slot.objects.as_ref());
        let color = resolver.resolve(&slot.identity, explicit.as_deref());

        let base_pair = series.values[index];
        let highlight_pair = series.highlights[index];
        let plain = percent_metrics(&base_values, index);

        let mut tooltip = TooltipBuilder::new(tooltips_enabled);
        push_common_rows(
            &mut tooltip,
            &extraction,
            &slot.label,
            row.measure,
            base_pair.map(|pair| pair.original_value),
            highlight_pair.map(|pair| pair.original_value),
            &formatter,
        );
        push_percent_rows(&mut tooltip, plain, &formatter, false);

        data_points.push(FunnelDataPoint {
            value: base_pair.map_or(0.0, |pair| pair.value),
            original_value: base_pair.map_or(0.0, |pair| pair.original_value),
            highlight_value: highlight_pair.map(|pair| pair.value),
            original_highlight_value: highlight_pair.map(|pair| pair.original_value),
            category: slot.label.clone(),
            identity: slot.identity.clone(),
            color,
            category_or_measure_index: row.slot_index,
            highlight: false,
            selected: false,
            tooltip_info: tooltip.finish(),
        });

        if has_highlights {
            let highlighted = highlighted_percent(&highlight_values, index);
            let mut tooltip = TooltipBuilder::new(tooltips_enabled);
            push_common_rows(
                &mut tooltip,
                &extraction,
                &slot.label,
                row.measure,
                base_pair.map(|pair| pair.original_value),
                highlight_pair.map(|pair| pair.original_value),
                &formatter,
            );
            push_percent_rows(&mut tooltip, plain, &formatter, false);
            push_percent_rows(&mut tooltip, highlighted, &formatter, true);

            data_points.push(FunnelDataPoint {
                value: highlight_pair.map_or(0.0, |pair| pair.value),
                original_value: highlight_pair.map_or(0.0, |pair| pair.original_value),
                highlight_value: highlight_pair.map(|pair| pair.value),
                original_highlight_value: highlight_pair.map(|pair| pair.original_value),
                category: slot.label.clone(),
                identity: slot.identity.clone(),
                // The twin inherits its base bar's color via the memo.
                color: resolver.resolve(&slot.identity, None),
                category_or_measure_index: row.slot_index,
                highlight: true,
                selected: false,
                tooltip_info: tooltip.finish(),
            });
        }
    }

    let data_labels_settings = DataLabelSettings::from_objects(view.objects.as_ref());
    let can_show_data_labels = data_labels_settings.show && !data_points.is_empty();
    debug!(
        points = data_points.len(),
        has_highlights,
        highlights_overflow,
        policy = ?series.policy,
        "converted funnel data"
    );

    let mut values_metadata: Vec<ColumnMetadata> = Vec::new();
    for row in &rows {
        if !values_metadata.contains(row.measure) {
            values_metadata.push(row.measure.clone());
        }
    }

    Ok(FunnelData {
        category_labels: rows
            .iter()
            .map(|row| extraction.slots[row.slot_index].label.clone())
            .collect(),
        values_metadata,
        data_points,
        has_highlights,
        highlights_overflow,
        can_show_data_labels,
        data_labels_settings,
        percent_bar_label_settings: PercentBarLabelSettings::from_objects(view.objects.as_ref()),
        has_negative_values: series.has_negative_values,
        all_values_are_negative: series.all_values_are_negative,
        warning,
    })
}

struct FunnelRow<'a> {
    slot_index: usize,
    measure: &'a ColumnMetadata,
    value: Option<f64>,
    highlight: Option<f64>,
}

/// Funnel uses one measure per bar: with a category column the first included
/// value column feeds every bar; without one, each column is its own bar.
fn funnel_rows<'a>(extraction: &Extraction, view: &'a DataView) -> Vec<FunnelRow<'a>> {
    let first_column = extraction.value_columns.first().copied();
    let with_category = extraction.category_source.is_some();
    if with_category && extraction.value_columns.len() > 1 {
        debug!(
            ignored = extraction.value_columns.len() - 1,
            "funnel with category uses the first value column only"
        );
    }

    extraction
        .rows
        .iter()
        .filter(|row| !with_category || Some(row.column_index) == first_column)
        .map(|row| FunnelRow {
            slot_index: row.category_index,
            measure: &view.values[row.column_index].source,
            value: row.value,
            highlight: row.highlight,
        })
        .collect()
}

fn push_common_rows(
    tooltip: &mut TooltipBuilder,
    extraction: &Extraction,
    category_label: &str,
    measure: &ColumnMetadata,
    original_value: Option<f64>,
    original_highlight: Option<f64>,
    formatter: &ValueFormatter,
) {
    if let Some(category_source) = &extraction.category_source {
        tooltip.push(category_source.display_name.clone(), category_label);
    }
    tooltip.push_opt(
        &measure.display_name,
        original_value.map(|value| formatter.format(value)),
    );
    tooltip.push_opt(
        HIGHLIGHTED,
        original_highlight.map(|value| formatter.format(value)),
    );
}

fn push_percent_rows(
    tooltip: &mut TooltipBuilder,
    metrics: PercentMetrics,
    formatter: &ValueFormatter,
    highlighted: bool,
) {
    let (first_label, previous_label) = if highlighted {
        (PERCENT_OF_FIRST_HIGHLIGHTED, PERCENT_OF_PREVIOUS_HIGHLIGHTED)
    } else {
        (PERCENT_OF_FIRST, PERCENT_OF_PREVIOUS)
    };
    tooltip.push_opt(
        first_label,
        metrics
            .of_first
            .map(|ratio| formatter.format_percent(ratio)),
    );
    tooltip.push_opt(
        previous_label,
        metrics
            .of_previous
            .map(|ratio| formatter.format_percent(ratio)),
    );
}

/// Percent pair over the highlight overlay; a null value or null/zero
/// denominator suppresses the corresponding ratio.
fn highlighted_percent(highlights: &[Option<f64>], index: usize) -> PercentMetrics {
    let Some(Some(value)) = highlights.get(index).copied() else {
        return PercentMetrics::default();
    };

    let of_first = match highlights.first() {
        Some(Some(first)) if *first != 0.0 => Some(value / first),
        _ => None,
    };
    let of_previous = if index == 0 {
        None
    } else {
        match highlights.get(index - 1) {
            Some(Some(previous)) if *previous != 0.0 => Some(value / previous),
            _ => None,
        }
    };

    PercentMetrics {
        of_first,
        of_previous,
    }
}
