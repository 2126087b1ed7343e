use crate::aggregation::{
    add_agg, add_subagg, margin_key, AggFunc, AggOptions, LevelSelector, SubaggOptions,
};
use crate::axis::Axis;
use crate::config::Defaults;
use crate::error::{Result, TransformError};
use crate::labels::{resolve_ignored, tag, Category};
use crate::mask::{data_mask, kept_positions};
use crosstab_frame::{Data, Frame, Label, Series};

/// Settings for totals margins.
#[derive(Debug, Clone)]
pub struct TotalsOptions {
    pub label: String,
    pub fill: String,
    /// Extra index entries left out of the sums, on top of the tracked ones.
    pub ignore_keys: Vec<Label>,
}

impl Default for TotalsOptions {
    fn default() -> Self {
        Self::from_defaults(&Defaults::default())
    }
}

impl TotalsOptions {
    #[must_use]
    pub fn from_defaults(defaults: &Defaults) -> Self {
        TotalsOptions {
            label: defaults.totals.label.clone(),
            fill: defaults.totals.fill.clone(),
            ignore_keys: Vec::new(),
        }
    }
}

/// Settings for subtotals within the groups of a hierarchical level.
#[derive(Debug, Clone)]
pub struct SubtotalsOptions {
    pub label: String,
    pub fill: String,
    pub ignore_keys: Vec<Label>,
    pub skip_single_rows: bool,
    pub include_level_name: bool,
}

impl Default for SubtotalsOptions {
    fn default() -> Self {
        Self::from_defaults(&Defaults::default())
    }
}

impl SubtotalsOptions {
    #[must_use]
    pub fn from_defaults(defaults: &Defaults) -> Self {
        SubtotalsOptions {
            label: defaults.subtotals.label.clone(),
            fill: defaults.subtotals.fill.clone(),
            ignore_keys: Vec::new(),
            skip_single_rows: defaults.subtotals.skip_single_rows,
            include_level_name: defaults.subtotals.include_level_name,
        }
    }
}

/// Add a totals row, column or both to a table.
///
/// Sums cover only real data entries: tracked margin labels and the explicit
/// ignore keys are excluded, so repeated or chained calls never double-count.
/// Axis 2 is a row pass followed by a column pass; the bottom-right cell then
/// holds the grand total because the column pass sums the totals row too.
pub fn add_totals(data: &Frame, axis: Axis, options: &TotalsOptions) -> Result<Frame> {
    tracing::debug!(?axis, label = %options.label, "adding totals");
    match axis {
        Axis::Both => {
            let rows_done = add_totals_one(data, Axis::Rows, options)?;
            add_totals_one(&rows_done, Axis::Columns, options)
        }
        axis => add_totals_one(data, axis, options),
    }
}

fn add_totals_one(data: &Frame, axis: Axis, options: &TotalsOptions) -> Result<Frame> {
    let ignore_keys = resolve_ignored(data.attrs(), Category::Totals, axis, &options.ignore_keys);
    let mut out = add_agg(
        data,
        axis,
        AggFunc::Sum,
        &AggOptions {
            label: Some(options.label.clone()),
            fill: options.fill.clone(),
            ignore_keys,
        },
    )?;
    tag(out.attrs_mut(), Category::Totals, [options.label.as_str()]);
    Ok(out)
}

/// Add subtotals after each group of the given hierarchical levels.
///
/// Levels are processed in the given order; each pass re-resolves its ignore
/// keys so earlier passes' subtotal entries stay out of later sums. Axis 2
/// runs the levels on the rows, then on the columns.
pub fn add_subtotals(
    data: &Frame,
    axis: Axis,
    levels: &[LevelSelector],
    options: &SubtotalsOptions,
) -> Result<Frame> {
    tracing::debug!(?axis, ?levels, label = %options.label, "adding subtotals");
    match axis {
        Axis::Both => {
            let rows_done = add_subtotals_one(data, Axis::Rows, levels, options)?;
            add_subtotals_one(&rows_done, Axis::Columns, levels, options)
        }
        axis => add_subtotals_one(data, axis, levels, options),
    }
}

fn add_subtotals_one(
    data: &Frame,
    axis: Axis,
    levels: &[LevelSelector],
    options: &SubtotalsOptions,
) -> Result<Frame> {
    let mut out = data.clone();
    for level in levels {
        let ignore_keys =
            resolve_ignored(out.attrs(), Category::Totals, axis, &options.ignore_keys);
        out = add_subagg(
            &out,
            axis,
            level,
            AggFunc::Sum,
            &SubaggOptions {
                label: Some(options.label.clone()),
                fill: options.fill.clone(),
                ignore_keys,
                skip_single_rows: options.skip_single_rows,
                include_level_name: options.include_level_name,
            },
        )?;
        tag(out.attrs_mut(), Category::Totals, [options.label.as_str()]);
    }
    Ok(out)
}

/// Remove totals and subtotals entries from a table.
///
/// With no explicit keys the tracked totals labels are used, so this undoes
/// whatever [`add_totals`] and [`add_subtotals`] added. Unknown keys drop
/// nothing.
#[must_use]
pub fn drop_totals(data: &Frame, axis: Axis, ignore_keys: &[Label]) -> Frame {
    let keys: Vec<Label> = if ignore_keys.is_empty() {
        data.attrs()
            .tracked(Category::Totals.as_str())
            .map(Label::from)
            .collect()
    } else {
        ignore_keys.to_vec()
    };

    let mut out = data.clone();
    if matches!(axis, Axis::Rows | Axis::Both) {
        let mask = data_mask(out.rows(), &keys);
        out = out.select_rows(&kept_positions(&mask));
    }
    if matches!(axis, Axis::Columns | Axis::Both) {
        let mask = data_mask(out.columns(), &keys);
        out = out.select_columns(&kept_positions(&mask));
    }
    out
}

/// Append a total to a series.
pub fn add_series_total(data: &Series, options: &TotalsOptions) -> Result<Series> {
    let ignore_keys =
        resolve_ignored(data.attrs(), Category::Totals, Axis::Rows, &options.ignore_keys);
    let mask = data_mask(data.index(), &ignore_keys);
    let total: f64 = kept_positions(&mask)
        .iter()
        .filter_map(|&pos| data.value(pos))
        .sum();

    let key = margin_key(&options.label, &options.fill, data.index().nlevels());

    let mut out = data.clone();
    out.push(key, Some(total))?;
    tag(out.attrs_mut(), Category::Totals, [options.label.as_str()]);
    Ok(out)
}

/// Dispatch [`add_totals`] over the table-or-series wrapper.
pub fn add_totals_data(data: &Data, axis: Axis, options: &TotalsOptions) -> Result<Data> {
    match data {
        Data::Frame(frame) => Ok(Data::Frame(add_totals(frame, axis, options)?)),
        Data::Series(series) => Ok(Data::Series(add_series_total(series, options)?)),
        Data::Scalar(_) => Err(TransformError::UnsupportedShape(data.shape_name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crosstab_frame::Index;

    fn flat() -> Frame {
        Frame::from_values(
            Index::from_labels(["jan", "feb", "mar"]).unwrap(),
            Index::from_labels(["A", "B"]).unwrap(),
            vec![vec![10.0, 15.0], vec![20.0, 25.0], vec![30.0, 20.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_totals_both_axes_with_grand_total() {
        let out = add_totals(&flat(), Axis::Both, &TotalsOptions::default()).unwrap();
        assert_eq!(out.shape(), (4, 3));
        // Totals column per row.
        assert_eq!(out.column_values(2), vec![
            Some(25.0),
            Some(45.0),
            Some(50.0),
            Some(120.0),
        ]);
        // Totals row per column, grand total in the corner.
        assert_eq!(out.row_values(3), vec![Some(60.0), Some(60.0), Some(120.0)]);
    }

    #[test]
    fn test_totals_tracked_for_chaining() {
        let out = add_totals(&flat(), Axis::Rows, &TotalsOptions::default()).unwrap();
        let tracked: Vec<&String> = out.attrs().tracked("totals").collect();
        assert_eq!(tracked, ["Totals"]);
    }

    #[test]
    fn test_repeated_totals_not_double_counted() {
        let once = add_totals(&flat(), Axis::Rows, &TotalsOptions::default()).unwrap();
        let options = TotalsOptions {
            label: "Grand".to_string(),
            ..TotalsOptions::default()
        };
        let twice = add_totals(&once, Axis::Rows, &options).unwrap();
        // The tracked "Totals" row is excluded from the new sum.
        assert_eq!(twice.row_values(4), vec![Some(60.0), Some(60.0)]);
    }

    #[test]
    fn test_drop_totals_round_trip() {
        let original = flat();
        let with_margins = add_totals(&original, Axis::Both, &TotalsOptions::default()).unwrap();
        let dropped = drop_totals(&with_margins, Axis::Both, &[]);
        assert_eq!(dropped.rows(), original.rows());
        assert_eq!(dropped.columns(), original.columns());
        assert_eq!(dropped.row_values(1), original.row_values(1));
    }

    #[test]
    fn test_subtotals_then_totals() {
        let data = Frame::from_values(
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
            Index::from_labels(["A"]).unwrap(),
            vec![vec![10.0], vec![20.0], vec![30.0], vec![40.0]],
        )
        .unwrap();

        let with_sub = add_subtotals(
            &data,
            Axis::Rows,
            &[LevelSelector::Pos(0)],
            &SubtotalsOptions::default(),
        )
        .unwrap();
        assert_eq!(with_sub.nrows(), 6);
        assert_eq!(with_sub.value(2, 0), Some(30.0));
        assert_eq!(with_sub.value(5, 0), Some(70.0));

        // The grand total skips the subtotal rows.
        let with_totals =
            add_totals(&with_sub, Axis::Rows, &TotalsOptions::default()).unwrap();
        assert_eq!(with_totals.value(6, 0), Some(100.0));
    }

    #[test]
    fn test_series_total() {
        let series = Series::from_values(
            Index::from_labels(["a", "b"]).unwrap(),
            vec![30.0, 70.0],
        )
        .unwrap();
        let out = add_series_total(&series, &TotalsOptions::default()).unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out.value(2), Some(100.0));
        assert_eq!(out.index().key(2), &vec![Label::from("Totals")]);
    }

    #[test]
    fn test_series_total_pads_hierarchical_key() {
        let series = Series::from_values(
            Index::from_tuples(
                vec![None, None],
                vec![vec!["North", "Amsterdam"], vec!["South", "Eindhoven"]],
            )
            .unwrap(),
            vec![30.0, 70.0],
        )
        .unwrap();
        let out = add_series_total(&series, &TotalsOptions::default()).unwrap();
        assert_eq!(
            out.index().key(2),
            &vec![Label::from("Totals"), Label::from("")]
        );
        assert_eq!(out.value(2), Some(100.0));
    }

    #[test]
    fn test_scalar_rejected() {
        let result = add_totals_data(&Data::Scalar(1.0), Axis::Rows, &TotalsOptions::default());
        assert!(matches!(result, Err(TransformError::UnsupportedShape(_))));
    }
}
