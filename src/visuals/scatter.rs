use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::bubble::{
    self, DataRange, MAX_SIZE_RANGE, MIN_SIZE_RANGE, PixelSizeRange,
};
use crate::core::color::{ColorResolver, GradientScale};
use crate::core::extract::{self, category_label};
use crate::core::numeric::{self, DataWarning};
use crate::core::tooltip::{TooltipBuilder, TooltipItem};
use crate::core::types::Viewport;
use crate::dataview::{ColumnMetadata, DataView, Role, SelectionKey, ValueColumn};
use crate::error::{VisualError, VisualResult};
use crate::host::format::{DisplayUnits, ValueFormatter};
use crate::host::{ColorPalette, HostCapabilities};
use crate::settings::{self, DataLabelSettings};
use crate::visuals::legend::{LegendData, LegendItem};

const HIGHLIGHTED: &str = "Highlighted";

/// Marker radius used when no size measure drives the projection.
pub const DEFAULT_MARKER_RADIUS_PX: f64 = 4.0;

/// One scatter marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterDataPoint {
    pub x: f64,
    pub y: f64,
    /// Raw size measure value; `None` renders as a hollow marker.
    pub size: Option<f64>,
    pub radius_px: f64,
    /// False when the size role is bound but this row's size is null
    /// (marker renders with zero fill opacity).
    pub fill: bool,
    pub category: String,
    pub series: Option<String>,
    pub identity: SelectionKey,
    pub color: String,
    pub highlight_value: Option<f64>,
    pub original_highlight_value: Option<f64>,
    pub tooltip_info: Option<Vec<TooltipItem>>,
}

/// Scatter conversion output consumed by rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterData {
    pub data_points: Vec<ScatterDataPoint>,
    pub category_labels: Vec<String>,
    pub x_column: Option<ColumnMetadata>,
    pub y_column: Option<ColumnMetadata>,
    pub size_column: Option<ColumnMetadata>,
    /// Value range of the size measure across the dataset.
    pub size_range: Option<DataRange>,
    pub has_highlights: bool,
    pub data_labels_settings: DataLabelSettings,
    pub legend: Option<LegendData>,
    pub warning: Option<DataWarning>,
}

impl ScatterData {
    /// Serializes the converted model to pretty JSON for snapshot diffing.
    pub fn to_json_pretty(&self) -> VisualResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| VisualError::InvalidData(format!("failed to serialize scatter data: {e}")))
    }

    /// Deserializes a converted model from JSON.
    pub fn from_json_str(input: &str) -> VisualResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| VisualError::InvalidData(format!("failed to parse scatter data: {e}")))
    }
}

/// Intermediate per-point state handed to the pure projection step.
struct PointSeed {
    x: f64,
    y: f64,
    size: Option<f64>,
    highlight: Option<f64>,
    category: String,
    series: Option<String>,
    identity: SelectionKey,
    color: String,
    has_size_role: bool,
    /// (display name, value) per in-scope measure at this row, in column
    /// declaration order.
    measure_rows: Vec<(String, f64)>,
    category_row: Option<(String, String)>,
}

/// Converts a categorical DataView into scatter data.
///
/// Series-pivoted values produce one point run per group, colored per
/// series; a gradient-role column recolors individual points when no
/// explicit series fill overrides it.
pub fn convert(
    view: &DataView,
    palette: &ColorPalette,
    capabilities: &HostCapabilities,
    viewport: Viewport,
    default_color: Option<&str>,
    tooltips_enabled: bool,
) -> VisualResult<ScatterData> {
    view.validate()?;

    let data_labels_settings = DataLabelSettings::from_objects(view.objects.as_ref());
    let row_count = view
        .categories
        .as_ref()
        .map(|categories| categories.values.len())
        .or_else(|| view.values.first().map(|column| column.values.len()))
        .unwrap_or(0);

    let all_columns: Vec<&ValueColumn> = view.values.iter().collect();
    let view_axes = extract::resolve_axis_columns(&all_columns);
    let x_column = view_axes.x.map(|column| column.source.clone());
    let y_column = view_axes.y.map(|column| column.source.clone());
    let size_column = view_axes.size.map(|column| column.source.clone());

    let size_range = dataset_size_range(view);
    let pixel_range = size_range
        .map(|_| bubble::bubble_pixel_area_size_range(viewport, MIN_SIZE_RANGE, MAX_SIZE_RANGE))
        .transpose()?;

    let contamination = numeric::scan_for_contamination(
        view.values
            .iter()
            .flat_map(|column| column.values.iter())
            .chain(
                view.values
                    .iter()
                    .filter_map(|column| column.highlights.as_ref())
                    .flatten(),
            ),
    );

    let gradient_scale = match view_axes.gradient {
        Some(column) => GradientScale::from_column_values(&column.values)?,
        None => None,
    };

    let has_highlights = view.values.iter().any(ValueColumn::has_highlights);
    let default_override = settings::default_color_override(view.objects.as_ref());
    let default_color = default_override.as_deref().or(default_color);
    let mut resolver = ColorResolver::new(palette, default_color);
    let formatter = ValueFormatter::new(DisplayUnits::None, None, capabilities.locale);

    let mut legend = LegendData::new(
        view.series_source
            .as_ref()
            .map(|source| source.display_name.clone()),
    );
    let mut seeds: Vec<PointSeed> = Vec::new();

    for group in view.grouped() {
        let axes = extract::resolve_axis_columns(&group.columns);
        let series_identity = match (group.identity, group.name) {
            (Some(identity), _) => identity.clone(),
            (None, Some(name)) => SelectionKey::for_series(
                view.series_source
                    .as_ref()
                    .map_or("series", |source| source.measure_key()),
                name,
            ),
            (None, None) => SelectionKey::for_measure(
                axes.y
                    .map_or("values", |column| column.source.measure_key()),
            ),
        };
        let explicit = group
            .objects
            .and_then(|bag| bag.get_fill_color(crate::dataview::objects::DATA_POINT_FILL))
            .map(str::to_owned);
        let series_color = resolver.resolve(&series_identity, explicit.as_deref());

        if let Some(name) = group.name {
            legend.items.push(LegendItem {
                label: name.to_owned(),
                color: series_color.clone(),
                identity: series_identity.clone(),
                selected: false,
            });
        }

        let gradient_values = axes.gradient.map(|column| &column.values);
        for row in extract::scatter_rows(&axes, row_count) {
            let point_color = match (&gradient_scale, explicit.is_none()) {
                (Some(scale), true) => gradient_values
                    .and_then(|values| values.get(row.row_index).copied().flatten())
                    .map_or_else(|| series_color.clone(), |value| scale.color_at(value)),
                _ => series_color.clone(),
            };

            let category = view.categories.as_ref().map_or_else(
                || row.row_index.to_string(),
                |categories| {
                    category_label(
                        categories
                            .values
                            .get(row.row_index)
                            .and_then(|value| value.as_deref()),
                    )
                },
            );
            let identity = match (&view.categories, group.name) {
                (Some(categories), None) => categories
                    .identity
                    .as_ref()
                    .and_then(|keys| keys.get(row.row_index).cloned())
                    .unwrap_or_else(|| SelectionKey::for_row(&series_identity, row.row_index)),
                _ => SelectionKey::for_row(&series_identity, row.row_index),
            };

            let measure_rows = group
                .columns
                .iter()
                .filter_map(|column| {
                    column
                        .values
                        .get(row.row_index)
                        .copied()
                        .flatten()
                        .map(|value| (column.source.display_name.clone(), value))
                })
                .collect();
            let category_row = view
                .categories
                .as_ref()
                .map(|categories| (categories.source.display_name.clone(), category.clone()));

            seeds.push(PointSeed {
                x: row.x,
                y: row.y,
                size: row.size,
                highlight: row.highlight,
                category,
                series: group.name.map(str::to_owned),
                identity,
                color: point_color,
                has_size_role: axes.size.is_some(),
                measure_rows,
                category_row,
            });
        }
    }

    let build = |seed: &PointSeed| build_point(seed, size_range, pixel_range, &formatter, tooltips_enabled);

    #[cfg(feature = "parallel-projection")]
    let data_points: Vec<ScatterDataPoint> = seeds.par_iter().map(build).collect();

    #[cfg(not(feature = "parallel-projection"))]
    let data_points: Vec<ScatterDataPoint> = seeds.iter().map(build).collect();

    debug!(
        points = data_points.len(),
        has_highlights,
        sized = size_range.is_some(),
        "converted scatter data"
    );

    Ok(ScatterData {
        category_labels: data_points
            .iter()
            .map(|point| point.category.clone())
            .collect(),
        data_points,
        x_column,
        y_column,
        size_column,
        size_range,
        has_highlights,
        data_labels_settings,
        legend: (!legend.is_empty()).then_some(legend),
        warning: contamination,
    })
}

/// Size-measure range across every Size-role column, so pivoted series all
/// project against one shared domain.
///
/// Host-supplied bounds win over the computed value range per end, with the
/// local pair as the fallback; hosts use them to keep bubble sizes stable
/// across data frames.
fn dataset_size_range(view: &DataView) -> Option<DataRange> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for column in view
        .values
        .iter()
        .filter(|column| column.source.roles.contains(Role::Size))
    {
        let computed = DataRange::from_values(&column.values);
        let bounds = column.source.bounds;
        let low = bounds
            .min
            .or(bounds.min_local)
            .or(computed.map(|range| range.min));
        let high = bounds
            .max
            .or(bounds.max_local)
            .or(computed.map(|range| range.max));
        if let (Some(low), Some(high)) = (low, high) {
            if low.is_finite() && high.is_finite() && low <= high {
                min = min.min(low);
                max = max.max(high);
            }
        }
    }
    if min > max {
        return None;
    }
    DataRange::new(min, max).ok()
}

/// Projects one seed into its final data point. Pure; safe to run in
/// parallel for large datasets.
fn build_point(
    seed: &PointSeed,
    size_range: Option<DataRange>,
    pixel_range: Option<PixelSizeRange>,
    formatter: &ValueFormatter,
    tooltips_enabled: bool,
) -> ScatterDataPoint {
    let radius_px = match (seed.size, size_range, pixel_range) {
        (Some(value), Some(data_range), Some(pixel_range)) => {
            bubble::project_size_to_pixels(value, data_range, pixel_range)
        }
        _ => DEFAULT_MARKER_RADIUS_PX,
    };

    let mut tooltip = TooltipBuilder::new(tooltips_enabled);
    if let Some((display_name, value)) = &seed.category_row {
        tooltip.push(display_name.clone(), value.clone());
    }
    for (display_name, value) in &seed.measure_rows {
        tooltip.push(display_name.clone(), formatter.format(*value));
    }
    tooltip.push_opt(
        HIGHLIGHTED,
        seed.highlight.map(|value| formatter.format(value)),
    );

    ScatterDataPoint {
        x: seed.x,
        y: seed.y,
        size: seed.size,
        radius_px,
        fill: !(seed.has_size_role && seed.size.is_none()),
        category: seed.category.clone(),
        series: seed.series.clone(),
        identity: seed.identity.clone(),
        color: seed.color.clone(),
        highlight_value: seed.highlight,
        original_highlight_value: seed.highlight,
        tooltip_info: tooltip.finish(),
    }
}
