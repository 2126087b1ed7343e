use crate::axis::Axis;
use crate::config::Defaults;
use crate::error::{Result, TransformError};
use crate::labels::{resolve_own_ignored, tag, Category};
use crate::mask::{data_mask, kept_positions};
use crate::rounding::{round_apportioned, round_half_even};
use crate::split::{SeriesValuesAndTotals, Totals, ValuesAndTotals};
use crosstab_frame::{Data, Frame, Index, Label, Series};

/// Settings for percentage computations.
#[derive(Debug, Clone)]
pub struct PercentageOptions {
    pub label_n: String,
    pub label_pct: String,
    /// Where the totals sit; last position when unset.
    pub label_totals: Option<Label>,
    /// Extra columns left out of the computation, on top of the tracked
    /// percentage labels.
    pub ignore_keys: Vec<Label>,
    /// Decimal places; negative leaves the fractions unrounded.
    pub ndigits: i32,
    /// The whole the fractions are scaled to (1 = proportions, 100 =
    /// percentages).
    pub base: f64,
    /// Force apportioned rounding on or off; unset picks it automatically
    /// when the values sum to their totals.
    pub apportioned_rounding: Option<bool>,
    /// Nest the n/pct pair under each original column instead of side by
    /// side blocks.
    pub interleaf: bool,
}

impl Default for PercentageOptions {
    fn default() -> Self {
        Self::from_defaults(&Defaults::default())
    }
}

impl PercentageOptions {
    #[must_use]
    pub fn from_defaults(defaults: &Defaults) -> Self {
        PercentageOptions {
            label_n: defaults.percentages.label_n.clone(),
            label_pct: defaults.percentages.label_pct.clone(),
            label_totals: None,
            ignore_keys: Vec::new(),
            ndigits: defaults.percentages.ndigits,
            base: defaults.percentages.base,
            apportioned_rounding: None,
            interleaf: false,
        }
    }

    fn column_ignore_keys(&self, data: &Frame) -> Vec<Label> {
        let mut keys =
            resolve_own_ignored(data.attrs(), Category::Percentages, &self.ignore_keys);
        let own = Label::from(self.label_pct.as_str());
        if !keys.contains(&own) {
            keys.push(own);
        }
        keys
    }
}

/// Transform a table with totals into percentages of those totals.
///
/// Columns carrying earlier percentage output are left out; everything else,
/// totals included, is divided by the totals the axis points at, so a totals
/// row becomes a row of the base value. Division by a zero total yields
/// infinity and by a null total yields null.
pub fn as_percentages(data: &Frame, axis: Axis, options: &PercentageOptions) -> Result<Frame> {
    tracing::debug!(?axis, ndigits = options.ndigits, base = options.base, "computing percentages");
    let mask = data_mask(data.columns(), &options.column_ignore_keys(data));
    let block = data.select_columns(&kept_positions(&mask));
    let vt = ValuesAndTotals::from_frame(&block, axis, options.label_totals.as_ref())?;

    let mut pcts = match &vt.totals {
        Totals::PerColumn(totals) => block.div_by_col_vector(totals)?,
        Totals::PerRow(totals) => block.div_by_row_vector(totals)?,
        Totals::Grand(total) => block.div_scalar(*total),
    }
    .mul_scalar(options.base);

    if options.ndigits >= 0 {
        let apportioned = options
            .apportioned_rounding
            .unwrap_or_else(|| vt.should_use_apportioned_rounding());
        pcts = if apportioned {
            round_frame_apportioned(&pcts, axis, options.ndigits, options.label_totals.as_ref())?
        } else {
            pcts.map(|cell| cell.map(|v| round_half_even(v, options.ndigits)))
        };
    }

    tag(
        pcts.attrs_mut(),
        Category::Percentages,
        [options.label_pct.as_str()],
    );
    Ok(pcts)
}

/// Series counterpart of [`as_percentages`]; the output is named after the
/// percentage label.
pub fn as_series_percentages(data: &Series, options: &PercentageOptions) -> Result<Series> {
    let vt = SeriesValuesAndTotals::from_series(data, options.label_totals.as_ref())?;
    let total = vt.total;
    let base = options.base;
    let mut pcts = data.map(|cell| match (cell, total) {
        (Some(value), Some(total)) => Some(value / total * base),
        _ => None,
    });

    if options.ndigits >= 0 {
        let apportioned = options
            .apportioned_rounding
            .unwrap_or_else(|| vt.should_use_apportioned_rounding());
        pcts = if apportioned {
            Series::new(
                pcts.index().clone(),
                round_apportioned(pcts.values(), options.ndigits),
            )?
            .with_attrs(pcts.attrs().clone())
        } else {
            pcts.map(|cell| cell.map(|v| round_half_even(v, options.ndigits)))
        };
    }

    let mut pcts = pcts.with_name(&options.label_pct);
    tag(
        pcts.attrs_mut(),
        Category::Percentages,
        [options.label_pct.as_str()],
    );
    Ok(pcts)
}

/// Add percentages next to the counts instead of replacing them.
///
/// On a plain table the counts go under an `n` level and the percentages
/// under a `pct` level. When a percentage block is already present the new
/// block is computed from the count block alone and appended under its own
/// label; reusing a label that already exists is an error. With `interleaf`
/// the pair is nested under each original column, in the original column
/// order.
pub fn add_percentages(data: &Frame, axis: Axis, options: &PercentageOptions) -> Result<Frame> {
    tracing::debug!(?axis, interleaf = options.interleaf, "adding percentages");
    let mask = data_mask(data.columns(), &options.column_ignore_keys(data));
    let pcts = as_percentages(data, axis, options)?;

    let label_n = Label::from(options.label_n.as_str());
    let label_pct = Label::from(options.label_pct.as_str());

    let output = if mask.iter().all(|&keep| keep) {
        let counts = data.prepend_column_level(&label_n, None);
        let pcts = pcts.prepend_column_level(&label_pct, None);
        counts.concat_columns(&pcts)?
    } else {
        // The count block already sits under its own level; give the new
        // percentages that level's shape under the pct label.
        let pcts = pcts.rename_column_level_value(0, &label_n, &label_pct)?;
        data.concat_columns(&pcts)?
    };

    if options.interleaf {
        return interleave_blocks(&output);
    }
    Ok(output)
}

/// Move the block level innermost and regroup the columns so each original
/// column carries its variants side by side.
fn interleave_blocks(output: &Frame) -> Result<Frame> {
    let nlevels = output.columns().nlevels();
    let mut order: Vec<usize> = (1..nlevels).collect();
    order.push(0);
    let shifted = output.reorder_column_levels(&order)?;

    let groups = shifted
        .columns()
        .group_by_prefix(shifted.columns().nlevels() - 2);
    let positions: Vec<usize> = groups
        .into_iter()
        .flat_map(|(_, positions)| positions)
        .collect();
    Ok(shifted.select_columns(&positions))
}

/// Turn a series into a two-column table of counts and percentages.
pub fn add_series_percentages(data: &Series, options: &PercentageOptions) -> Result<Frame> {
    let pcts = as_series_percentages(data, options)?;
    let columns = Index::from_labels([options.label_n.as_str(), options.label_pct.as_str()])?;
    let cells = data
        .values()
        .iter()
        .zip(pcts.values())
        .map(|(&n, &pct)| vec![n, pct])
        .collect();

    let mut output =
        Frame::new(data.index().clone(), columns, cells)?.with_attrs(data.attrs().clone());
    tag(
        output.attrs_mut(),
        Category::Percentages,
        [options.label_pct.as_str()],
    );
    Ok(output)
}

/// Dispatch [`as_percentages`] over the table-or-series wrapper.
pub fn as_percentages_data(data: &Data, axis: Axis, options: &PercentageOptions) -> Result<Data> {
    match data {
        Data::Frame(frame) => Ok(Data::Frame(as_percentages(frame, axis, options)?)),
        Data::Series(series) => Ok(Data::Series(as_series_percentages(series, options)?)),
        Data::Scalar(_) => Err(TransformError::UnsupportedShape(data.shape_name())),
    }
}

/// Dispatch [`add_percentages`] over the table-or-series wrapper.
pub fn add_percentages_data(data: &Data, axis: Axis, options: &PercentageOptions) -> Result<Data> {
    match data {
        Data::Frame(frame) => Ok(Data::Frame(add_percentages(frame, axis, options)?)),
        Data::Series(series) => Ok(Data::Frame(add_series_percentages(series, options)?)),
        Data::Scalar(_) => Err(TransformError::UnsupportedShape(data.shape_name())),
    }
}

/// Positions holding totals on one index: the labeled entries, or the last
/// one when the totals are positional.
fn margin_positions(index: &Index, label: Option<&Label>) -> Vec<usize> {
    match label {
        Some(label) => index.positions_of_label(label),
        None if index.is_empty() => Vec::new(),
        None => vec![index.len() - 1],
    }
}

/// Apportion-round a percentage table along the axis it was computed on.
///
/// Axis 0 rounds each column as one sequence and axis 1 each row; the
/// trailing total absorbs nothing because its running sum doubles the base
/// exactly. Axis 2 rounds the data block as a single row-major sequence so
/// the block sums to the base, while the margins round half to even on
/// their own.
fn round_frame_apportioned(
    pcts: &Frame,
    axis: Axis,
    ndigits: i32,
    label_totals: Option<&Label>,
) -> Result<Frame> {
    let mut cells: Vec<Vec<Option<f64>>> =
        (0..pcts.nrows()).map(|row| pcts.row_values(row)).collect();

    match axis {
        Axis::Rows => {
            for col in 0..pcts.ncols() {
                let rounded = round_apportioned(&pcts.column_values(col), ndigits);
                for (row, value) in rounded.into_iter().enumerate() {
                    cells[row][col] = value;
                }
            }
        }
        Axis::Columns => {
            for row in &mut cells {
                let rounded = round_apportioned(row, ndigits);
                *row = rounded;
            }
        }
        Axis::Both => {
            let margin_rows = margin_positions(pcts.rows(), label_totals);
            let margin_cols = margin_positions(pcts.columns(), label_totals);

            let mut flat = Vec::new();
            for (r, row) in cells.iter().enumerate() {
                if margin_rows.contains(&r) {
                    continue;
                }
                for (c, &cell) in row.iter().enumerate() {
                    if !margin_cols.contains(&c) {
                        flat.push(cell);
                    }
                }
            }
            let mut rounded = round_apportioned(&flat, ndigits).into_iter();
            for (r, row) in cells.iter_mut().enumerate() {
                let margin_row = margin_rows.contains(&r);
                for (c, cell) in row.iter_mut().enumerate() {
                    if margin_row || margin_cols.contains(&c) {
                        *cell = cell.map(|v| round_half_even(v, ndigits));
                    } else if let Some(value) = rounded.next() {
                        *cell = value;
                    }
                }
            }
        }
    }

    Ok(Frame::new(pcts.rows().clone(), pcts.columns().clone(), cells)?
        .with_attrs(pcts.attrs().clone()))
}
