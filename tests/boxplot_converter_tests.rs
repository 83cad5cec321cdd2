use visuals_rs::core::numeric::DataWarning;
use visuals_rs::core::scale::Orientation;
use visuals_rs::core::types::Viewport;
use visuals_rs::dataview::objects::{
    BOX_ORIENTATION, BOX_SORT_ORDER, DataViewObjects, ObjectValue,
};
use visuals_rs::dataview::{
    CategoryColumn, ColumnMetadata, DataView, Role, RoleSet, ValueColumn,
};
use visuals_rs::host::{ColorPalette, HostCapabilities};
use visuals_rs::visuals::boxplot;

fn sampled_view(labels: &[&str], values: &[Option<f64>]) -> DataView {
    let categories = CategoryColumn::new(
        ColumnMetadata::new("group", RoleSet::of(Role::Category)),
        labels.iter().map(|label| Some((*label).to_owned())).collect(),
    );
    DataView::new(
        Some(categories),
        vec![ValueColumn::new(
            ColumnMetadata::new("sample", RoleSet::of(Role::Y)),
            values.to_vec(),
        )],
    )
}

fn convert(view: &DataView) -> boxplot::BoxWhiskerData {
    boxplot::convert(
        view,
        &ColorPalette::default(),
        &HostCapabilities::default(),
        None,
        true,
    )
    .expect("conversion")
}

#[test]
fn outliers_are_fenced_and_excluded_from_whiskers() {
    let view = sampled_view(
        &["a", "a", "a", "a", "a"],
        &[Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(100.0)],
    );

    let data = convert(&view);
    assert_eq!(data.data_points.len(), 1);
    let stats = &data.data_points[0].stats;
    assert_eq!(stats.quartiles.q1, 2.0);
    assert_eq!(stats.quartiles.median, 3.0);
    assert_eq!(stats.quartiles.q3, 4.0);
    assert_eq!(stats.outliers, vec![100.0]);
    assert_eq!(stats.whisker_min, 1.0);
    assert_eq!(stats.whisker_max, 4.0);

    let domain = data.domain.expect("domain");
    assert_eq!(domain.min, 1.0);
    assert_eq!(domain.max, 100.0);
}

#[test]
fn repeated_categories_merge_their_samples() {
    let view = sampled_view(
        &["a", "b", "a", "b"],
        &[Some(1.0), Some(10.0), Some(3.0), Some(30.0)],
    );

    let data = convert(&view);
    assert_eq!(data.category_labels, vec!["a", "b"]);
    assert_eq!(data.data_points[0].stats.sample_count, 2);
    assert_eq!(data.data_points[0].stats.quartiles.median, 2.0);
    assert_eq!(data.data_points[1].stats.quartiles.median, 20.0);
}

#[test]
fn multiple_sample_columns_widen_each_category() {
    let categories = CategoryColumn::new(
        ColumnMetadata::new("group", RoleSet::of(Role::Category)),
        vec![Some("a".to_owned())],
    );
    let view = DataView::new(
        Some(categories),
        vec![
            ValueColumn::new(
                ColumnMetadata::new("s1", RoleSet::of(Role::Y)),
                vec![Some(1.0)],
            ),
            ValueColumn::new(
                ColumnMetadata::new("s2", RoleSet::of(Role::Y)),
                vec![Some(3.0)],
            ),
        ],
    );

    let data = convert(&view);
    assert_eq!(data.data_points.len(), 1);
    assert_eq!(data.data_points[0].stats.sample_count, 2);
    assert_eq!(data.data_points[0].stats.quartiles.median, 2.0);
}

#[test]
fn sort_order_reorders_categories_by_label() {
    let view = sampled_view(&["b", "a"], &[Some(1.0), Some(2.0)]).with_objects(
        DataViewObjects::new().with(BOX_SORT_ORDER, ObjectValue::Text("ascending".to_owned())),
    );
    let data = convert(&view);
    assert_eq!(data.category_labels, vec!["a", "b"]);

    let view = sampled_view(&["a", "b"], &[Some(1.0), Some(2.0)]).with_objects(
        DataViewObjects::new().with(BOX_SORT_ORDER, ObjectValue::Text("descending".to_owned())),
    );
    let data = convert(&view);
    assert_eq!(data.category_labels, vec!["b", "a"]);
}

#[test]
fn orientation_swaps_the_pixel_extent() {
    let vertical = convert(&sampled_view(&["a", "a"], &[Some(0.0), Some(10.0)]));
    let viewport = Viewport::new(400, 600);
    let scale = vertical
        .value_scale(viewport)
        .expect("scale result")
        .expect("scale");
    assert_eq!(scale.scale(0.0).expect("bottom"), 600.0);
    assert_eq!(scale.scale(10.0).expect("top"), 0.0);

    let horizontal_view = sampled_view(&["a", "a"], &[Some(0.0), Some(10.0)]).with_objects(
        DataViewObjects::new().with(BOX_ORIENTATION, ObjectValue::Text("horizontal".to_owned())),
    );
    let horizontal = convert(&horizontal_view);
    assert_eq!(horizontal.settings.orientation, Orientation::Horizontal);
    let scale = horizontal
        .value_scale(viewport)
        .expect("scale result")
        .expect("scale");
    assert_eq!(scale.scale(10.0).expect("right"), 400.0);
}

#[test]
fn box_geometry_projects_through_the_scale() {
    let data = convert(&sampled_view(
        &["a"; 5],
        &[Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(100.0)],
    ));
    let scale = data
        .value_scale(Viewport::new(400, 600))
        .expect("scale result")
        .expect("scale");

    let geometry = boxplot::project_box(&data.data_points[0], scale).expect("geometry");
    // Vertical orientation: larger values sit closer to the top edge.
    assert!(geometry.q3_px < geometry.median_px);
    assert!(geometry.median_px < geometry.q1_px);
    assert!(geometry.whisker_high_px < geometry.whisker_low_px);
    assert_eq!(geometry.outliers_px.len(), 1);
    assert_eq!(geometry.outliers_px[0], 0.0);
}

#[test]
fn all_null_category_is_skipped() {
    let view = sampled_view(&["a", "b"], &[None, Some(5.0)]);
    let data = convert(&view);
    assert_eq!(data.data_points.len(), 1);
    assert_eq!(data.data_points[0].category, "b");
}

#[test]
fn empty_data_view_converts_to_empty_data() {
    let data = convert(&DataView::new(None, Vec::new()));
    assert!(data.data_points.is_empty());
    assert_eq!(data.domain, None);
}

#[test]
fn infinite_samples_warn_without_failing_the_conversion() {
    let view = sampled_view(
        &["a", "a", "a"],
        &[Some(1.0), Some(f64::INFINITY), Some(3.0)],
    );

    let data = convert(&view);
    assert_eq!(data.warning, Some(DataWarning::InfinityValuesNotSupported));
    assert_eq!(data.data_points.len(), 1);

    // The contaminated sample never widens the pixel domain.
    let domain = data.domain.expect("domain");
    assert_eq!(domain.min, 1.0);
    assert_eq!(domain.max, 3.0);
}

#[test]
fn nan_only_samples_warn_and_leave_no_domain() {
    let view = sampled_view(&["a"], &[Some(f64::NAN)]);

    let data = convert(&view);
    assert_eq!(data.warning, Some(DataWarning::NaNNotSupported));
    assert_eq!(data.domain, None);
    assert_eq!(
        data.value_scale(Viewport::new(400, 600)).expect("no scale"),
        None
    );
}

#[test]
fn tooltip_lists_category_then_statistics() {
    let data = convert(&sampled_view(
        &["a", "a", "a"],
        &[Some(1.0), Some(2.0), Some(3.0)],
    ));
    let tooltip = data.data_points[0].tooltip_info.as_ref().expect("tooltip");
    assert_eq!(tooltip[0].display_name, "group");
    assert_eq!(tooltip[0].value, "a");
    assert_eq!(tooltip[1].display_name, "Q1");
    assert_eq!(tooltip[2].display_name, "Median");
    assert_eq!(tooltip[2].value, "2");
    assert_eq!(tooltip[3].display_name, "Q3");
}

#[test]
fn conversion_is_idempotent() {
    let view = sampled_view(
        &["a", "b", "a"],
        &[Some(1.0), Some(2.0), Some(3.0)],
    );
    let palette = ColorPalette::default();
    let capabilities = HostCapabilities::default();

    let first = boxplot::convert(&view, &palette, &capabilities, None, true).expect("first");
    let second = boxplot::convert(&view, &palette, &capabilities, None, true).expect("second");
    assert_eq!(first, second);
}
