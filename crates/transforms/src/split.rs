use crate::axis::Axis;
use crate::error::{Result, TransformError};
use crosstab_frame::{Frame, Label, Series};

const TOLERANCE: f64 = 1e-10;

/// Totals isolated from a table: a vector along one axis or a grand-total
/// scalar.
#[derive(Debug, Clone)]
pub enum Totals {
    /// One total per column (taken from a totals row).
    PerColumn(Vec<Option<f64>>),
    /// One total per row (taken from a totals column).
    PerRow(Vec<Option<f64>>),
    /// A single grand total.
    Grand(Option<f64>),
}

/// A table split into its data block and its totals.
///
/// Built fresh for each percentage computation; immutable once constructed.
#[derive(Debug, Clone)]
pub struct ValuesAndTotals {
    pub values: Frame,
    pub totals: Totals,
    pub axis: Axis,
}

impl ValuesAndTotals {
    /// Split `data` into values and totals along `axis`.
    ///
    /// Without `label_totals` the totals are assumed to sit in the last row
    /// (axis 0), last column (axis 1) or bottom-right cell (axis 2). With a
    /// label, every index entry matching it counts as totals wherever it
    /// sits; an absent label is a `LabelNotFound` error.
    pub fn from_frame(data: &Frame, axis: Axis, label_totals: Option<&Label>) -> Result<Self> {
        match label_totals {
            None => Self::split_positional(data, axis),
            Some(label) => Self::split_by_label(data, axis, label),
        }
    }

    fn split_positional(data: &Frame, axis: Axis) -> Result<Self> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err(TransformError::LabelNotFound(
                "totals at last position (table is empty)".to_string(),
            ));
        }
        let all_but_last_row: Vec<usize> = (0..data.nrows() - 1).collect();
        let all_but_last_col: Vec<usize> = (0..data.ncols() - 1).collect();

        let (values, totals) = match axis {
            Axis::Rows => (
                data.select_rows(&all_but_last_row),
                Totals::PerColumn(data.row_values(data.nrows() - 1)),
            ),
            Axis::Columns => (
                data.select_columns(&all_but_last_col),
                Totals::PerRow(data.column_values(data.ncols() - 1)),
            ),
            Axis::Both => (
                data.select_rows(&all_but_last_row)
                    .select_columns(&all_but_last_col),
                Totals::Grand(data.value(data.nrows() - 1, data.ncols() - 1)),
            ),
        };
        Ok(ValuesAndTotals {
            values,
            totals,
            axis,
        })
    }

    fn split_by_label(data: &Frame, axis: Axis, label: &Label) -> Result<Self> {
        let row_hits = data.rows().positions_of_label(label);
        let col_hits = data.columns().positions_of_label(label);

        let missing = || TransformError::LabelNotFound(label.to_string());
        let keep = |hits: &[usize], len: usize| -> Vec<usize> {
            (0..len).filter(|pos| !hits.contains(pos)).collect()
        };

        let (values, totals) = match axis {
            Axis::Rows => {
                let hit = *row_hits.first().ok_or_else(missing)?;
                (
                    data.select_rows(&keep(&row_hits, data.nrows())),
                    Totals::PerColumn(data.row_values(hit)),
                )
            }
            Axis::Columns => {
                let hit = *col_hits.first().ok_or_else(missing)?;
                (
                    data.select_columns(&keep(&col_hits, data.ncols())),
                    Totals::PerRow(data.column_values(hit)),
                )
            }
            Axis::Both => {
                let row_hit = *row_hits.first().ok_or_else(missing)?;
                let col_hit = *col_hits.first().ok_or_else(missing)?;
                (
                    data.select_rows(&keep(&row_hits, data.nrows()))
                        .select_columns(&keep(&col_hits, data.ncols())),
                    Totals::Grand(data.value(row_hit, col_hit)),
                )
            }
        };
        Ok(ValuesAndTotals {
            values,
            totals,
            axis,
        })
    }

    /// Whether the values are complete proportions of the totals.
    ///
    /// Compares the values summed along the complementary axis against the
    /// totals, element-wise within `1e-10`. Only when every comparison holds
    /// is apportioned rounding appropriate: the parts then genuinely make up
    /// the whole. A null total never matches.
    #[must_use]
    pub fn should_use_apportioned_rounding(&self) -> bool {
        let close = |sum: f64, total: Option<f64>| match total {
            Some(total) => (sum - total).abs() < TOLERANCE,
            None => false,
        };
        match &self.totals {
            Totals::PerColumn(totals) => self
                .values
                .sum_down()
                .iter()
                .zip(totals)
                .all(|(&sum, &total)| close(sum, total)),
            Totals::PerRow(totals) => self
                .values
                .sum_across()
                .iter()
                .zip(totals)
                .all(|(&sum, &total)| close(sum, total)),
            Totals::Grand(total) => close(self.values.sum_all(), *total),
        }
    }
}

/// The 1D counterpart: a series split into values and a scalar total.
#[derive(Debug, Clone)]
pub struct SeriesValuesAndTotals {
    pub values: Series,
    pub total: Option<f64>,
}

impl SeriesValuesAndTotals {
    /// Split a series; the total is the last element or the labeled one.
    pub fn from_series(data: &Series, label_totals: Option<&Label>) -> Result<Self> {
        let (total_pos, hits) = match label_totals {
            None => {
                if data.is_empty() {
                    return Err(TransformError::LabelNotFound(
                        "total at last position (series is empty)".to_string(),
                    ));
                }
                (data.len() - 1, vec![data.len() - 1])
            }
            Some(label) => {
                let hits = data.index().positions_of_label(label);
                let first = *hits
                    .first()
                    .ok_or_else(|| TransformError::LabelNotFound(label.to_string()))?;
                (first, hits)
            }
        };
        let keep: Vec<usize> = (0..data.len()).filter(|pos| !hits.contains(pos)).collect();
        Ok(SeriesValuesAndTotals {
            values: data.select(&keep),
            total: data.value(total_pos),
        })
    }

    #[must_use]
    pub fn should_use_apportioned_rounding(&self) -> bool {
        match self.total {
            Some(total) => (self.values.sum() - total).abs() < TOLERANCE,
            None => false,
        }
    }
}
