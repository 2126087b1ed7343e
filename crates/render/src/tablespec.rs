use crate::error::Result;
use crosstab_frame::{Frame, Index, Label, Series};
use crosstab_transforms::data_mask;
use serde::Serialize;
use std::borrow::Cow;

/// A serializable description of a table for downstream viewers.
///
/// Carries the cell values, both axes' keys and level names, and per-entry
/// margin flags derived from the tracked labels, so a renderer can style
/// totals rows without re-running any computation.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableSpec {
    values: Vec<Vec<Option<f64>>>,
    columns: Vec<SpecKey>,
    index: Vec<SpecKey>,
    column_names: Vec<Option<String>>,
    index_names: Vec<Option<String>>,
    margin_rows: Vec<bool>,
    margin_columns: Vec<bool>,
}

/// A key as a viewer expects it: a bare label for flat indexes, the full
/// tuple for hierarchical ones.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
enum SpecKey {
    Flat(Label),
    Nested(Vec<Label>),
}

fn spec_keys(index: &Index) -> Vec<SpecKey> {
    index
        .keys()
        .iter()
        .map(|key| {
            if index.is_hierarchical() {
                SpecKey::Nested(key.clone())
            } else {
                SpecKey::Flat(key[0].clone())
            }
        })
        .collect()
}

fn margin_flags(index: &Index, tracked: &[Label]) -> Vec<bool> {
    data_mask(index, tracked).iter().map(|&keep| !keep).collect()
}

/// Builds a [`TableSpec`] from a frame or series.
#[derive(Debug)]
pub struct TableSpecBuilder<'a> {
    data: Cow<'a, Frame>,
}

impl<'a> TableSpecBuilder<'a> {
    #[must_use]
    pub fn new(data: &'a Frame) -> Self {
        TableSpecBuilder {
            data: Cow::Borrowed(data),
        }
    }

    /// Treat a series as a one-column table named after the series.
    pub fn from_series(series: &Series) -> crosstab_frame::Result<TableSpecBuilder<'static>> {
        let columns = Index::from_labels([series.name().unwrap_or("0")])?;
        let cells = series.values().iter().map(|&v| vec![v]).collect();
        let frame = Frame::new(series.index().clone(), columns, cells)?
            .with_attrs(series.attrs().clone());
        Ok(TableSpecBuilder {
            data: Cow::Owned(frame),
        })
    }

    #[must_use]
    pub fn build(&self) -> TableSpec {
        let data = self.data.as_ref();
        let tracked: Vec<Label> = data.attrs().all_tracked().map(Label::from).collect();
        TableSpec {
            values: (0..data.nrows()).map(|row| data.row_values(row)).collect(),
            columns: spec_keys(data.columns()),
            index: spec_keys(data.rows()),
            column_names: data.columns().names().to_vec(),
            index_names: data.rows().names().to_vec(),
            margin_rows: margin_flags(data.rows(), &tracked),
            margin_columns: margin_flags(data.columns(), &tracked),
        }
    }

    /// The spec serialized to compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.build())?)
    }
}
