use crate::attrs::Attrs;
use crate::error::{FrameError, Result};
use crate::index::{Index, Key};
use serde::Serialize;

/// A labeled 2D grid of nullable numeric cells (row-major storage).
///
/// Rows and columns are addressed by an [`Index`] each; all transforms are
/// copy-on-write — they return a fresh frame and carry the margin-label
/// metadata ([`Attrs`]) forward by value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    rows: Index,
    columns: Index,
    data: Vec<Vec<Option<f64>>>,
    attrs: Attrs,
}

fn div_opt(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a / b),
        _ => None,
    }
}

impl Frame {
    /// Create a frame from indexes and cell data, validating shape.
    pub fn new(rows: Index, columns: Index, data: Vec<Vec<Option<f64>>>) -> Result<Self> {
        if data.len() != rows.len() {
            return Err(FrameError::ShapeMismatch {
                index_len: rows.len(),
                data_len: data.len(),
            });
        }
        for row in &data {
            if row.len() != columns.len() {
                return Err(FrameError::LengthMismatch {
                    expected: columns.len(),
                    actual: row.len(),
                });
            }
        }
        Ok(Frame {
            rows,
            columns,
            data,
            attrs: Attrs::new(),
        })
    }

    /// Create a frame from non-null numeric values.
    pub fn from_values(rows: Index, columns: Index, values: Vec<Vec<f64>>) -> Result<Self> {
        let data = values
            .into_iter()
            .map(|row| row.into_iter().map(Some).collect())
            .collect();
        Self::new(rows, columns, data)
    }

    /// Create a frame from `(key, values)` rows sharing a column index.
    pub fn from_rows(
        row_names: Vec<Option<String>>,
        columns: Index,
        rows: Vec<(Key, Vec<Option<f64>>)>,
    ) -> Result<Self> {
        let mut keys = Vec::with_capacity(rows.len());
        let mut data = Vec::with_capacity(rows.len());
        for (key, values) in rows {
            keys.push(key);
            data.push(values);
        }
        let index = Index::from_keys(row_names, keys)?;
        Self::new(index, columns, data)
    }

    #[must_use]
    pub fn with_attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }

    #[must_use]
    pub fn rows(&self) -> &Index {
        &self.rows
    }

    #[must_use]
    pub fn columns(&self) -> &Index {
        &self.columns
    }

    #[must_use]
    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut Attrs {
        &mut self.attrs
    }

    #[must_use]
    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    /// Cell value at a position. Panics when out of bounds; positions come
    /// from the frame's own indexes.
    #[must_use]
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        self.data[row][col]
    }

    #[must_use]
    pub fn row(&self, pos: usize) -> &[Option<f64>] {
        &self.data[pos]
    }

    #[must_use]
    pub fn row_values(&self, pos: usize) -> Vec<Option<f64>> {
        self.data[pos].clone()
    }

    #[must_use]
    pub fn column_values(&self, pos: usize) -> Vec<Option<f64>> {
        self.data.iter().map(|row| row[pos]).collect()
    }

    /// Transposed copy (rows become columns). Attrs carry over unchanged.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let data = (0..self.ncols())
            .map(|col| self.column_values(col))
            .collect();
        Frame {
            rows: self.columns.clone(),
            columns: self.rows.clone(),
            data,
            attrs: self.attrs.clone(),
        }
    }

    /// Copy containing only the given rows, in the given order.
    #[must_use]
    pub fn select_rows(&self, positions: &[usize]) -> Self {
        let data = positions.iter().map(|&p| self.data[p].clone()).collect();
        Frame {
            rows: self.rows.select(positions),
            columns: self.columns.clone(),
            data,
            attrs: self.attrs.clone(),
        }
    }

    /// Copy containing only the given columns, in the given order.
    #[must_use]
    pub fn select_columns(&self, positions: &[usize]) -> Self {
        let data = self
            .data
            .iter()
            .map(|row| positions.iter().map(|&p| row[p]).collect())
            .collect();
        Frame {
            rows: self.rows.clone(),
            columns: self.columns.select(positions),
            data,
            attrs: self.attrs.clone(),
        }
    }

    /// Append a row at the end.
    pub fn append_row(&mut self, key: Key, values: Vec<Option<f64>>) -> Result<()> {
        self.insert_row(self.nrows(), key, values)
    }

    /// Insert a row at a position, shifting later rows down.
    pub fn insert_row(&mut self, pos: usize, key: Key, values: Vec<Option<f64>>) -> Result<()> {
        if values.len() != self.ncols() {
            return Err(FrameError::LengthMismatch {
                expected: self.ncols(),
                actual: values.len(),
            });
        }
        self.rows.insert(pos, key)?;
        self.data.insert(pos, values);
        Ok(())
    }

    /// Stack another frame below this one. Column indexes must match.
    pub fn concat_rows(&self, other: &Frame) -> Result<Self> {
        if other.columns != self.columns {
            return Err(FrameError::RowIndexMismatch);
        }
        let rows = self.rows.concat(&other.rows)?;
        let mut data = self.data.clone();
        data.extend(other.data.iter().cloned());
        let mut attrs = self.attrs.clone();
        attrs.merge(&other.attrs);
        Ok(Frame {
            rows,
            columns: self.columns.clone(),
            data,
            attrs,
        })
    }

    /// Place another frame's columns after this one's. Row indexes must match.
    pub fn concat_columns(&self, other: &Frame) -> Result<Self> {
        if other.rows != self.rows {
            return Err(FrameError::RowIndexMismatch);
        }
        let columns = self.columns.concat(&other.columns)?;
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(left, right)| {
                let mut row = left.clone();
                row.extend(right.iter().copied());
                row
            })
            .collect();
        let mut attrs = self.attrs.clone();
        attrs.merge(&other.attrs);
        Ok(Frame {
            rows: self.rows.clone(),
            columns,
            data,
            attrs,
        })
    }

    /// Copy with an extra outermost column level holding a constant label.
    #[must_use]
    pub fn prepend_column_level(&self, label: &crate::label::Label, name: Option<String>) -> Self {
        Frame {
            rows: self.rows.clone(),
            columns: self.columns.prepend_level(label, name),
            data: self.data.clone(),
            attrs: self.attrs.clone(),
        }
    }

    /// Copy with `from` renamed to `to` at a column level.
    pub fn rename_column_level_value(
        &self,
        level: usize,
        from: &crate::label::Label,
        to: &crate::label::Label,
    ) -> Result<Self> {
        Ok(Frame {
            rows: self.rows.clone(),
            columns: self.columns.rename_level_value(level, from, to)?,
            data: self.data.clone(),
            attrs: self.attrs.clone(),
        })
    }

    /// Copy with column levels rearranged into `order`.
    pub fn reorder_column_levels(&self, order: &[usize]) -> Result<Self> {
        Ok(Frame {
            rows: self.rows.clone(),
            columns: self.columns.reorder_levels(order)?,
            data: self.data.clone(),
            attrs: self.attrs.clone(),
        })
    }

    /// Per-column sums, skipping nulls (an all-null column sums to 0).
    #[must_use]
    pub fn sum_down(&self) -> Vec<f64> {
        (0..self.ncols())
            .map(|col| self.data.iter().filter_map(|row| row[col]).sum())
            .collect()
    }

    /// Per-row sums, skipping nulls.
    #[must_use]
    pub fn sum_across(&self) -> Vec<f64> {
        self.data
            .iter()
            .map(|row| row.iter().flatten().sum())
            .collect()
    }

    /// Grand sum over every cell, skipping nulls.
    #[must_use]
    pub fn sum_all(&self) -> f64 {
        self.data
            .iter()
            .map(|row| row.iter().flatten().sum::<f64>())
            .sum()
    }

    /// Divide each row element-wise by a per-column divisor vector.
    pub fn div_by_col_vector(&self, divisors: &[Option<f64>]) -> Result<Self> {
        if divisors.len() != self.ncols() {
            return Err(FrameError::LengthMismatch {
                expected: self.ncols(),
                actual: divisors.len(),
            });
        }
        let data = self
            .data
            .iter()
            .map(|row| {
                row.iter()
                    .zip(divisors)
                    .map(|(&cell, &div)| div_opt(cell, div))
                    .collect()
            })
            .collect();
        Ok(Frame {
            rows: self.rows.clone(),
            columns: self.columns.clone(),
            data,
            attrs: self.attrs.clone(),
        })
    }

    /// Divide every cell of row `i` by `divisors[i]`.
    pub fn div_by_row_vector(&self, divisors: &[Option<f64>]) -> Result<Self> {
        if divisors.len() != self.nrows() {
            return Err(FrameError::LengthMismatch {
                expected: self.nrows(),
                actual: divisors.len(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(divisors)
            .map(|(row, &div)| row.iter().map(|&cell| div_opt(cell, div)).collect())
            .collect();
        Ok(Frame {
            rows: self.rows.clone(),
            columns: self.columns.clone(),
            data,
            attrs: self.attrs.clone(),
        })
    }

    /// Divide every cell by a scalar.
    #[must_use]
    pub fn div_scalar(&self, divisor: Option<f64>) -> Self {
        self.map(|cell| div_opt(cell, divisor))
    }

    /// Multiply every cell by a scalar, nulls staying null.
    #[must_use]
    pub fn mul_scalar(&self, factor: f64) -> Self {
        self.map(|cell| cell.map(|v| v * factor))
    }

    /// Element-wise map over cells.
    #[must_use]
    pub fn map(&self, f: impl Fn(Option<f64>) -> Option<f64>) -> Self {
        let data = self
            .data
            .iter()
            .map(|row| row.iter().map(|&cell| f(cell)).collect())
            .collect();
        Frame {
            rows: self.rows.clone(),
            columns: self.columns.clone(),
            data,
            attrs: self.attrs.clone(),
        }
    }
}
