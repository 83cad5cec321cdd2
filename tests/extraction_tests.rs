use visuals_rs::core::extract::{self, BLANK_CATEGORY_LABEL};
use visuals_rs::dataview::{
    CategoryColumn, ColumnMetadata, DataView, Role, RoleSet, SelectionKey, ValueColumn,
    ValueLayout,
};
use visuals_rs::error::VisualError;

fn measure(name: &str, roles: RoleSet, values: Vec<Option<f64>>) -> ValueColumn {
    ValueColumn::new(ColumnMetadata::new(name, roles), values)
}

#[test]
fn no_category_yields_pseudo_categories_per_column() {
    let view = DataView::new(
        None,
        vec![
            measure("West", RoleSet::of(Role::Y), vec![Some(1.0)]),
            measure("East", RoleSet::of(Role::Y), vec![Some(2.0)]),
        ],
    );

    let extraction = extract::extract(&view).expect("extract");
    assert_eq!(extraction.slots.len(), 2);
    assert_eq!(extraction.slots[0].label, "West");
    assert_eq!(extraction.slots[1].label, "East");
    assert_eq!(extraction.rows.len(), 2);
    assert_eq!(extraction.rows[0].value, Some(1.0));
    assert_eq!(extraction.layout, ValueLayout::MultiMeasure { measures: 2 });
}

#[test]
fn pivoted_columns_use_group_names_as_pseudo_categories() {
    let view = DataView::new(
        None,
        vec![
            measure("sales", RoleSet::of(Role::Y), vec![Some(1.0)])
                .with_group("east", SelectionKey::for_series("region", "east")),
            measure("sales", RoleSet::of(Role::Y), vec![Some(2.0)])
                .with_group("west", SelectionKey::for_series("region", "west")),
        ],
    );

    let extraction = extract::extract(&view).expect("extract");
    assert_eq!(extraction.slots[0].label, "east");
    assert_eq!(extraction.slots[1].label, "west");
    assert_eq!(extraction.layout, ValueLayout::PivotedBySeries { series: 2 });
}

#[test]
fn null_and_empty_categories_get_the_blank_label() {
    let categories = CategoryColumn::new(
        ColumnMetadata::new("cat", RoleSet::of(Role::Category)),
        vec![None, Some(String::new())],
    );
    let view = DataView::new(
        Some(categories),
        vec![measure("m", RoleSet::of(Role::Y), vec![Some(1.0), Some(2.0)])],
    );

    let extraction = extract::extract(&view).expect("extract");
    assert!(extraction
        .slots
        .iter()
        .all(|slot| slot.label == BLANK_CATEGORY_LABEL));
}

#[test]
fn gradient_only_columns_are_excluded_from_the_value_pipeline() {
    let view = DataView::new(
        None,
        vec![
            measure("m", RoleSet::of(Role::Y), vec![Some(1.0)]),
            measure("heat", RoleSet::of(Role::Gradient), vec![Some(9.0)]),
        ],
    );

    let extraction = extract::extract(&view).expect("extract");
    assert_eq!(extraction.value_columns, vec![0]);
    assert_eq!(extraction.gradient_column, Some(1));
    assert_eq!(extraction.rows.len(), 1);
}

#[test]
fn gradient_plus_y_columns_stay_in_the_value_pipeline() {
    let view = DataView::new(
        None,
        vec![measure(
            "m",
            RoleSet::of(Role::Y).with(Role::Gradient),
            vec![Some(1.0)],
        )],
    );

    let extraction = extract::extract(&view).expect("extract");
    assert_eq!(extraction.value_columns, vec![0]);
    assert_eq!(extraction.gradient_column, Some(0));
}

#[test]
fn pseudo_categories_prefer_the_host_subtotal() {
    let view = DataView::new(
        None,
        vec![
            measure("m", RoleSet::of(Role::Y), vec![Some(1.0), Some(2.0)]).with_subtotal(42.0),
        ],
    );

    let extraction = extract::extract(&view).expect("extract");
    assert_eq!(extraction.rows.len(), 1);
    assert_eq!(extraction.rows[0].value, Some(42.0));
}

#[test]
fn empty_view_extracts_to_empty_collection() {
    let extraction = extract::extract(&DataView::new(None, Vec::new())).expect("extract");
    assert!(extraction.is_empty());
    assert_eq!(extraction.layout, ValueLayout::Empty);
}

#[test]
fn host_identities_pass_through_opaque() {
    let categories = CategoryColumn::new(
        ColumnMetadata::new("cat", RoleSet::of(Role::Category)),
        vec![Some("a".to_owned())],
    )
    .with_identity(vec![SelectionKey::from_host("host-key-1")]);
    let view = DataView::new(
        Some(categories),
        vec![measure("m", RoleSet::of(Role::Y), vec![Some(1.0)])],
    );

    let extraction = extract::extract(&view).expect("extract");
    assert_eq!(
        extraction.slots[0].identity,
        SelectionKey::from_host("host-key-1")
    );
}

#[test]
fn mismatched_column_lengths_are_a_contract_violation() {
    let categories = CategoryColumn::new(
        ColumnMetadata::new("cat", RoleSet::of(Role::Category)),
        vec![Some("a".to_owned()), Some("b".to_owned())],
    );
    let view = DataView::new(
        Some(categories),
        vec![measure("m", RoleSet::of(Role::Y), vec![Some(1.0)])],
    );

    assert!(matches!(
        extract::extract(&view),
        Err(VisualError::MalformedDataView { .. })
    ));
}

#[test]
fn scatter_rows_follow_the_axis_null_rules() {
    let x = measure("x", RoleSet::of(Role::X), vec![Some(1.0), None, Some(3.0)]);
    let y = measure("y", RoleSet::of(Role::Y), vec![Some(4.0), Some(5.0), None]);
    let columns = vec![&x, &y];
    let axes = extract::resolve_axis_columns(&columns);

    let rows = extract::scatter_rows(&axes, 3);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].row_index, 0);

    let size = measure("s", RoleSet::of(Role::Size), vec![Some(1.0), None, Some(2.0)]);
    let columns = vec![&x, &y, &size];
    let axes = extract::resolve_axis_columns(&columns);
    let rows = extract::scatter_rows(&axes, 3);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].x, 0.0);
    assert_eq!(rows[1].size, None);
    assert_eq!(rows[2].y, 0.0);
}
