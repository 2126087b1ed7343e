use crosstab_frame::{Frame, Index, Label};
use crosstab_transforms::{
    add_percentages, add_subtotals, add_totals, as_percentages, drop_totals, Axis, Defaults,
    LevelSelector, PercentageOptions, SubtotalsOptions, TotalsOptions,
};

fn monthly_counts() -> Frame {
    Frame::from_values(
        Index::from_labels(["jan", "feb", "mar"]).unwrap(),
        Index::from_labels(["A", "B"]).unwrap(),
        vec![vec![10.0, 15.0], vec![20.0, 25.0], vec![30.0, 20.0]],
    )
    .unwrap()
}

fn regional_counts() -> Frame {
    Frame::from_values(
        Index::from_tuples(
            vec![Some("region".to_string()), Some("city".to_string())],
            vec![
                vec!["North", "Amsterdam"],
                vec!["North", "Groningen"],
                vec!["South", "Eindhoven"],
                vec!["South", "Maastricht"],
            ],
        )
        .unwrap(),
        Index::from_labels(["A", "B"]).unwrap(),
        vec![
            vec![10.0, 5.0],
            vec![20.0, 15.0],
            vec![30.0, 25.0],
            vec![40.0, 35.0],
        ],
    )
    .unwrap()
}

#[test]
fn test_totals_on_both_axes() {
    let out = add_totals(&monthly_counts(), Axis::Both, &TotalsOptions::default()).unwrap();

    assert_eq!(out.shape(), (4, 3));
    assert_eq!(
        out.column_values(2),
        vec![Some(25.0), Some(45.0), Some(50.0), Some(120.0)]
    );
    assert_eq!(out.row_values(3), vec![Some(60.0), Some(60.0), Some(120.0)]);
}

#[test]
fn test_percentages_of_grand_total_sum_to_base() {
    let with_totals =
        add_totals(&monthly_counts(), Axis::Both, &TotalsOptions::default()).unwrap();
    let options = PercentageOptions {
        ndigits: 0,
        base: 100.0,
        label_totals: Some("Totals".into()),
        ..PercentageOptions::default()
    };
    let pcts = as_percentages(&with_totals, Axis::Both, &options).unwrap();

    let block_sum: f64 = (0..3)
        .flat_map(|row| (0..2).map(move |col| (row, col)))
        .filter_map(|(row, col)| pcts.value(row, col))
        .sum();
    assert!((block_sum - 100.0).abs() < 1e-12);
    assert_eq!(pcts.value(3, 2), Some(100.0));
}

#[test]
fn test_drop_totals_restores_the_original() {
    let original = monthly_counts();
    let with_totals = add_totals(&original, Axis::Both, &TotalsOptions::default()).unwrap();
    let dropped = drop_totals(&with_totals, Axis::Both, &[]);

    assert_eq!(dropped.rows(), original.rows());
    assert_eq!(dropped.columns(), original.columns());
    for row in 0..original.nrows() {
        assert_eq!(dropped.row_values(row), original.row_values(row));
    }
}

#[test]
fn test_subtotals_totals_and_percentages_chain() {
    let chained = add_subtotals(
        &regional_counts(),
        Axis::Rows,
        &[LevelSelector::Name("region".to_string())],
        &SubtotalsOptions::default(),
    )
    .unwrap();
    let chained = add_totals(&chained, Axis::Rows, &TotalsOptions::default()).unwrap();

    // Subtotal rows sit after their groups, the grand total at the end,
    // and neither inflates the other.
    assert_eq!(chained.nrows(), 7);
    assert_eq!(chained.row_values(2), vec![Some(30.0), Some(20.0)]);
    assert_eq!(chained.row_values(5), vec![Some(70.0), Some(60.0)]);
    assert_eq!(chained.row_values(6), vec![Some(100.0), Some(80.0)]);

    let options = PercentageOptions {
        ndigits: 1,
        base: 100.0,
        label_totals: Some("Totals".into()),
        ..PercentageOptions::default()
    };
    let pcts = as_percentages(&chained, Axis::Rows, &options).unwrap();
    // Column totals divide to the base, subtotals to their share of it.
    assert_eq!(pcts.value(6, 0), Some(100.0));
    assert_eq!(pcts.value(2, 0), Some(30.0));
}

#[test]
fn test_subtotal_label_prefix_guards_chained_sums() {
    let options = SubtotalsOptions {
        include_level_name: true,
        ..SubtotalsOptions::default()
    };
    let with_sub = add_subtotals(
        &regional_counts(),
        Axis::Rows,
        &[LevelSelector::Pos(0)],
        &options,
    )
    .unwrap();
    assert_eq!(
        with_sub.rows().key(2),
        &vec![Label::from("North"), Label::from("Subtotals North")]
    );

    // "Subtotals North" is excluded by the tracked "Subtotals" prefix.
    let with_totals = add_totals(&with_sub, Axis::Rows, &TotalsOptions::default()).unwrap();
    assert_eq!(
        with_totals.row_values(6),
        vec![Some(100.0), Some(80.0)]
    );
}

#[test]
fn test_counts_and_percentages_side_by_side() {
    let with_totals =
        add_totals(&monthly_counts(), Axis::Rows, &TotalsOptions::default()).unwrap();
    let options = PercentageOptions {
        ndigits: 1,
        base: 100.0,
        label_totals: Some("Totals".into()),
        ..PercentageOptions::default()
    };
    let out = add_percentages(&with_totals, Axis::Rows, &options).unwrap();

    assert_eq!(out.shape(), (4, 4));
    assert_eq!(
        out.columns().key(0),
        &vec![Label::from("n"), Label::from("A")]
    );
    assert_eq!(
        out.columns().key(2),
        &vec![Label::from("pct"), Label::from("A")]
    );
    // Counts untouched, percentages of the column totals next to them.
    assert_eq!(out.value(0, 0), Some(10.0));
    assert_eq!(out.value(3, 2), Some(100.0));

    let column_sum: f64 = (0..3).filter_map(|row| out.value(row, 2)).sum();
    assert!((column_sum - 100.0).abs() < 1e-9);
}

#[test]
fn test_configured_labels_flow_through_the_chain() {
    let defaults = Defaults::from_json_str(
        r#"{
            "totals": {"label": "Totaal"},
            "percentages": {"label_pct": "percentage", "ndigits": 0, "base": 100}
        }"#,
    )
    .unwrap();

    let with_totals = add_totals(
        &monthly_counts(),
        Axis::Rows,
        &TotalsOptions::from_defaults(&defaults),
    )
    .unwrap();
    assert_eq!(with_totals.rows().key(3), &vec![Label::from("Totaal")]);

    let options = PercentageOptions {
        label_totals: Some("Totaal".into()),
        ..PercentageOptions::from_defaults(&defaults)
    };
    let out = add_percentages(&with_totals, Axis::Rows, &options).unwrap();
    assert_eq!(
        out.columns().key(2),
        &vec![Label::from("percentage"), Label::from("A")]
    );
    let tracked: Vec<&String> = out.attrs().tracked("percentages").collect();
    assert_eq!(tracked, ["percentage"]);
}
