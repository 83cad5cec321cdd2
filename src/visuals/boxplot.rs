use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::bubble::DataRange;
use crate::core::color::ColorResolver;
use crate::core::extract::{self, Extraction};
use crate::core::numeric::{self, DataWarning};
use crate::core::scale::LinearScale;
use crate::core::stats::{self, CategoryStats};
use crate::core::tooltip::{TooltipBuilder, TooltipItem};
use crate::core::types::Viewport;
use crate::dataview::{ColumnMetadata, DataView, SelectionKey};
use crate::error::{VisualError, VisualResult};
use crate::host::format::{DisplayUnits, ValueFormatter};
use crate::host::{ColorPalette, HostCapabilities};
use crate::settings::{self, BoxPlotSettings, CategorySortOrder, DataLabelSettings};

const MEDIAN: &str = "Median";
const FIRST_QUARTILE: &str = "Q1";
const THIRD_QUARTILE: &str = "Q3";
const WHISKER_LOW: &str = "Whisker low";
const WHISKER_HIGH: &str = "Whisker high";
const OUTLIER_COUNT: &str = "Outliers";

/// One box with whiskers and outliers for a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxWhiskerDataPoint {
    pub category: String,
    pub identity: SelectionKey,
    pub color: String,
    pub stats: CategoryStats,
    pub tooltip_info: Option<Vec<TooltipItem>>,
}

/// Box-and-whisker conversion output consumed by rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxWhiskerData {
    pub data_points: Vec<BoxWhiskerDataPoint>,
    pub category_labels: Vec<String>,
    pub values_metadata: Vec<ColumnMetadata>,
    pub settings: BoxPlotSettings,
    pub data_labels_settings: DataLabelSettings,
    /// Global value range across all finite values, outliers included; the
    /// pixel scale for the active orientation is built over it.
    pub domain: Option<DataRange>,
    pub warning: Option<DataWarning>,
}

impl BoxWhiskerData {
    /// Serializes the converted model to pretty JSON for snapshot diffing.
    pub fn to_json_pretty(&self) -> VisualResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            VisualError::InvalidData(format!("failed to serialize box-and-whisker data: {e}"))
        })
    }

    /// Deserializes a converted model from JSON.
    pub fn from_json_str(input: &str) -> VisualResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            VisualError::InvalidData(format!("failed to parse box-and-whisker data: {e}"))
        })
    }

    /// Linear scale mapping values onto the plot extent for the configured
    /// orientation. `None` when the data holds no boxes or the domain is
    /// degenerate.
    pub fn value_scale(&self, viewport: Viewport) -> VisualResult<Option<LinearScale>> {
        let Some(domain) = self.domain else {
            return Ok(None);
        };
        if domain.delta == 0.0 {
            return Ok(None);
        }
        LinearScale::for_orientation(domain.min, domain.max, viewport, self.settings.orientation)
            .map(Some)
    }
}

/// Box geometry in pixel coordinates along the value axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxGeometry {
    pub q1_px: f64,
    pub median_px: f64,
    pub q3_px: f64,
    pub whisker_low_px: f64,
    pub whisker_high_px: f64,
    pub outliers_px: Vec<f64>,
}

/// Projects one box's statistics through the value scale.
pub fn project_box(point: &BoxWhiskerDataPoint, scale: LinearScale) -> VisualResult<BoxGeometry> {
    let stats = &point.stats;
    Ok(BoxGeometry {
        q1_px: scale.scale(stats.quartiles.q1)?,
        median_px: scale.scale(stats.quartiles.median)?,
        q3_px: scale.scale(stats.quartiles.q3)?,
        whisker_low_px: scale.scale(stats.whisker_min)?,
        whisker_high_px: scale.scale(stats.whisker_max)?,
        outliers_px: stats
            .outliers
            .iter()
            .map(|value| scale.scale(*value))
            .collect::<VisualResult<Vec<f64>>>()?,
    })
}

/// Converts a categorical DataView into box-and-whisker data.
///
/// Values group by category label in encounter order; every included value
/// column contributes samples, so repeated category entries and multiple
/// sample columns both widen a category's sample set.
pub fn convert(
    view: &DataView,
    palette: &ColorPalette,
    capabilities: &HostCapabilities,
    default_color: Option<&str>,
    tooltips_enabled: bool,
) -> VisualResult<BoxWhiskerData> {
    let chart_settings = BoxPlotSettings::from_objects(view.objects.as_ref());
    let data_labels_settings = DataLabelSettings::from_objects(view.objects.as_ref());
    let extraction = extract::extract(view)?;
    if extraction.is_empty() {
        debug!("empty box-and-whisker data view");
        return Ok(BoxWhiskerData {
            data_points: Vec::new(),
            category_labels: Vec::new(),
            values_metadata: Vec::new(),
            settings: chart_settings,
            data_labels_settings,
            domain: None,
            warning: None,
        });
    }

    let contamination = numeric::scan_for_contamination(
        view.values.iter().flat_map(|column| column.values.iter()),
    );

    let groups = group_samples(&extraction);
    let mut ordered: Vec<(String, (SelectionKey, Option<usize>, Vec<f64>))> =
        groups.into_iter().collect();
    match chart_settings.sort_order {
        CategorySortOrder::Natural => {}
        CategorySortOrder::Ascending => ordered.sort_by(|a, b| a.0.cmp(&b.0)),
        CategorySortOrder::Descending => ordered.sort_by(|a, b| b.0.cmp(&a.0)),
    }

    let default_override = settings::default_color_override(view.objects.as_ref());
    let default_color = default_override.as_deref().or(default_color);
    let mut resolver = ColorResolver::new(palette, default_color);
    let formatter = ValueFormatter::new(DisplayUnits::None, None, capabilities.locale);

    let mut domain_min = f64::INFINITY;
    let mut domain_max = f64::NEG_INFINITY;
    let mut data_points = Vec::with_capacity(ordered.len());
    let mut skipped = 0_usize;

    for (label, (identity, slot_index, values)) in ordered {
        let Some(category_stats) = stats::category_stats(&values) else {
            skipped += 1;
            continue;
        };
        for &value in &values {
            // Contaminated samples pass through to the statistics untouched
            // but must not poison the pixel domain.
            if value.is_finite() {
                domain_min = domain_min.min(value);
                domain_max = domain_max.max(value);
            }
        }

        let explicit = slot_index
            .and_then(|index| extraction.slots.get(index))
            .and_then(|slot| settings::point_fill_override(slot.objects.as_ref()));
        let color = resolver.resolve(&identity, explicit.as_deref());

        let mut tooltip = TooltipBuilder::new(tooltips_enabled);
        if let Some(category_source) = &extraction.category_source {
            tooltip.push(category_source.display_name.clone(), label.clone());
        }
        tooltip.push(FIRST_QUARTILE, formatter.format(category_stats.quartiles.q1));
        tooltip.push(MEDIAN, formatter.format(category_stats.quartiles.median));
        tooltip.push(THIRD_QUARTILE, formatter.format(category_stats.quartiles.q3));
        tooltip.push(WHISKER_LOW, formatter.format(category_stats.whisker_min));
        tooltip.push(WHISKER_HIGH, formatter.format(category_stats.whisker_max));
        if chart_settings.show_outliers && !category_stats.outliers.is_empty() {
            tooltip.push(OUTLIER_COUNT, category_stats.outliers.len().to_string());
        }

        data_points.push(BoxWhiskerDataPoint {
            category: label,
            identity,
            color,
            stats: category_stats,
            tooltip_info: tooltip.finish(),
        });
    }

    if skipped > 0 {
        debug!(skipped, "skipped categories without samples");
    }
    debug!(
        boxes = data_points.len(),
        orientation = ?chart_settings.orientation,
        "converted box-and-whisker data"
    );

    let domain = (domain_min <= domain_max)
        .then(|| DataRange::new(domain_min, domain_max))
        .transpose()?;

    Ok(BoxWhiskerData {
        category_labels: data_points
            .iter()
            .map(|point| point.category.clone())
            .collect(),
        data_points,
        values_metadata: extraction
            .value_columns
            .iter()
            .map(|&index| view.values[index].source.clone())
            .collect(),
        settings: chart_settings,
        data_labels_settings,
        domain,
        warning: contamination,
    })
}

/// Collects per-category sample sets in category encounter order.
///
/// The key is the category label; repeated entries and multiple sample
/// columns merge into one sample set per label. Null samples are dropped.
fn group_samples(
    extraction: &Extraction,
) -> IndexMap<String, (SelectionKey, Option<usize>, Vec<f64>)> {
    let mut groups: IndexMap<String, (SelectionKey, Option<usize>, Vec<f64>)> = IndexMap::new();
    for row in &extraction.rows {
        let slot = &extraction.slots[row.category_index];
        let entry = groups.entry(slot.label.clone()).or_insert_with(|| {
            (slot.identity.clone(), Some(row.category_index), Vec::new())
        });
        if let Some(value) = row.value {
            entry.2.push(value);
        }
    }
    groups
}
