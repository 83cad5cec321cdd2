use proptest::prelude::*;
use visuals_rs::dataview::{CategoryColumn, ColumnMetadata, DataView, Role, RoleSet, ValueColumn};
use visuals_rs::core::extract;

fn axis_values(len: usize) -> impl Strategy<Value = Vec<Option<f64>>> {
    proptest::collection::vec(
        proptest::option::weighted(0.7, -1_000.0f64..1_000.0),
        len..=len,
    )
}

fn labeled_view(x: Vec<Option<f64>>, y: Vec<Option<f64>>, size: Option<Vec<Option<f64>>>) -> DataView {
    let len = x.len();
    let mut columns = vec![
        ValueColumn::new(ColumnMetadata::new("x", RoleSet::of(Role::X)), x),
        ValueColumn::new(ColumnMetadata::new("y", RoleSet::of(Role::Y)), y),
    ];
    if let Some(size) = size {
        columns.push(ValueColumn::new(
            ColumnMetadata::new("size", RoleSet::of(Role::Size)),
            size,
        ));
    }
    DataView::new(
        Some(CategoryColumn::new(
            ColumnMetadata::new("category", RoleSet::of(Role::Category)),
            (0..len).map(|i| Some(format!("c{i}"))).collect(),
        )),
        columns,
    )
}

proptest! {
    #[test]
    fn null_axis_rows_drop_exactly_when_no_size_is_bound(
        (x, y) in (1usize..48).prop_flat_map(|len| (axis_values(len), axis_values(len)))
    ) {
        let complete = x
            .iter()
            .zip(&y)
            .filter(|(x, y)| x.is_some() && y.is_some())
            .count();

        let view = labeled_view(x, y, None);
        let columns: Vec<_> = view.values.iter().collect();
        let axes = extract::resolve_axis_columns(&columns);
        let rows = extract::scatter_rows(&axes, view.categories.as_ref().unwrap().values.len());

        prop_assert_eq!(rows.len(), complete);
        for row in &rows {
            prop_assert!(row.x.is_finite());
            prop_assert!(row.y.is_finite());
        }
    }

    #[test]
    fn size_bound_views_keep_every_row(
        (x, y, size) in (1usize..48)
            .prop_flat_map(|len| (axis_values(len), axis_values(len), axis_values(len)))
    ) {
        let len = x.len();
        let nulls_x: Vec<bool> = x.iter().map(Option::is_none).collect();
        let nulls_y: Vec<bool> = y.iter().map(Option::is_none).collect();

        let view = labeled_view(x, y, Some(size));
        let columns: Vec<_> = view.values.iter().collect();
        let axes = extract::resolve_axis_columns(&columns);
        let rows = extract::scatter_rows(&axes, len);

        prop_assert_eq!(rows.len(), len);
        for (row, (null_x, null_y)) in rows.iter().zip(nulls_x.iter().zip(&nulls_y)) {
            if *null_x {
                prop_assert_eq!(row.x, 0.0);
            }
            if *null_y {
                prop_assert_eq!(row.y, 0.0);
            }
        }
    }

    #[test]
    fn extraction_emits_one_row_per_category_per_included_column(
        len in 1usize..32,
        columns in 1usize..4,
        gradient_only in proptest::bool::ANY
    ) {
        let category = CategoryColumn::new(
            ColumnMetadata::new("category", RoleSet::of(Role::Category)),
            (0..len).map(|i| Some(format!("c{i}"))).collect(),
        );
        let mut values: Vec<ValueColumn> = (0..columns)
            .map(|c| {
                ValueColumn::new(
                    ColumnMetadata::new(format!("m{c}"), RoleSet::of(Role::Y)),
                    (0..len).map(|i| Some((i * c) as f64)).collect(),
                )
            })
            .collect();
        if gradient_only {
            values.push(ValueColumn::new(
                ColumnMetadata::new("heat", RoleSet::of(Role::Gradient)),
                (0..len).map(|i| Some(i as f64)).collect(),
            ));
        }

        let view = DataView::new(Some(category), values);
        let extraction = extract::extract(&view).expect("extract");

        // Gradient-only columns never contribute measure rows.
        prop_assert_eq!(extraction.value_columns.len(), columns);
        prop_assert_eq!(extraction.rows.len(), len * columns);
        prop_assert_eq!(extraction.slots.len(), len);
        prop_assert_eq!(extraction.gradient_column.is_some(), gradient_only);
    }
}
