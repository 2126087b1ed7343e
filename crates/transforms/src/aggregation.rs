use crate::axis::Axis;
use crate::error::{Result, TransformError};
use crate::mask::{data_mask, kept_positions};
use crosstab_frame::{Frame, Key, Label};

/// Aggregations that can be added to a table as margin rows or columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggFunc {
    Sum,
    Count,
    Mean,
    Min,
    Max,
}

impl AggFunc {
    /// Label used for the margin when the caller supplies none.
    #[must_use]
    pub fn default_label(self) -> &'static str {
        match self {
            AggFunc::Sum => "sum",
            AggFunc::Count => "count",
            AggFunc::Mean => "mean",
            AggFunc::Min => "min",
            AggFunc::Max => "max",
        }
    }

    /// Aggregate a slice of cells, skipping nulls.
    ///
    /// A sum over no values is zero; count always yields a number; the
    /// others are null when nothing is left to aggregate.
    #[must_use]
    pub fn apply(self, values: &[Option<f64>]) -> Option<f64> {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        match self {
            AggFunc::Sum => Some(present.iter().sum()),
            AggFunc::Count => Some(present.len() as f64),
            AggFunc::Mean => {
                if present.is_empty() {
                    None
                } else {
                    Some(present.iter().sum::<f64>() / present.len() as f64)
                }
            }
            AggFunc::Min => present.iter().copied().reduce(f64::min),
            AggFunc::Max => present.iter().copied().reduce(f64::max),
        }
    }
}

/// A level of a hierarchical index, by position or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelSelector {
    Pos(usize),
    Name(String),
}

impl From<usize> for LevelSelector {
    fn from(pos: usize) -> Self {
        LevelSelector::Pos(pos)
    }
}

impl From<&str> for LevelSelector {
    fn from(name: &str) -> Self {
        LevelSelector::Name(name.to_string())
    }
}

/// Settings for a whole-axis aggregate.
#[derive(Debug, Clone, Default)]
pub struct AggOptions {
    /// Margin label; the aggregation's own name when unset.
    pub label: Option<String>,
    /// Padding for the unused levels of a hierarchical margin key.
    pub fill: String,
    /// Index entries left out of the aggregation.
    pub ignore_keys: Vec<Label>,
}

/// Settings for within-group aggregates on one level.
#[derive(Debug, Clone)]
pub struct SubaggOptions {
    pub label: Option<String>,
    pub fill: String,
    pub ignore_keys: Vec<Label>,
    /// Leave out groups with at most one data row.
    pub skip_single_rows: bool,
    /// Append the group's label to the margin label ("Subtotals North").
    pub include_level_name: bool,
}

impl Default for SubaggOptions {
    fn default() -> Self {
        SubaggOptions {
            label: None,
            fill: String::new(),
            ignore_keys: Vec::new(),
            skip_single_rows: true,
            include_level_name: false,
        }
    }
}

/// The key of a margin entry: the label at the outermost level, the fill
/// value padding the rest.
pub(crate) fn margin_key(label: &str, fill: &str, nlevels: usize) -> Key {
    let mut key = Vec::with_capacity(nlevels);
    key.push(Label::from(label));
    key.extend((1..nlevels).map(|_| Label::from(fill)));
    key
}

/// Append an aggregate of the whole axis as a margin row or column.
///
/// Only the entries the ignore keys keep feed the aggregation, so margins
/// added by earlier transforms are not counted twice. Appending under a key
/// the index already holds is an error.
pub fn add_agg(data: &Frame, axis: Axis, func: AggFunc, options: &AggOptions) -> Result<Frame> {
    tracing::debug!(?axis, ?func, "adding aggregate margin");
    match axis {
        Axis::Rows => add_agg_rows(data, func, options),
        Axis::Columns => Ok(add_agg_rows(&data.transpose(), func, options)?.transpose()),
        Axis::Both => Err(TransformError::InvalidAxis(
            "aggregate margins go on one axis at a time".to_string(),
        )),
    }
}

fn add_agg_rows(data: &Frame, func: AggFunc, options: &AggOptions) -> Result<Frame> {
    let mask = data_mask(data.rows(), &options.ignore_keys);
    let kept = kept_positions(&mask);
    let values: Vec<Option<f64>> = (0..data.ncols())
        .map(|col| {
            let cells: Vec<Option<f64>> = kept.iter().map(|&row| data.value(row, col)).collect();
            func.apply(&cells)
        })
        .collect();

    let label = options.label.as_deref().unwrap_or(func.default_label());
    let key = margin_key(label, &options.fill, data.rows().nlevels());

    let mut out = data.clone();
    out.append_row(key, values)?;
    Ok(out)
}

/// Insert per-group aggregates after each group of a hierarchical level.
///
/// Entries are regrouped by their key prefix through `level` in first-seen
/// order; each group's aggregate follows its members. Flat indexes are
/// rejected, as is the innermost level (there is nothing below it to
/// aggregate).
pub fn add_subagg(
    data: &Frame,
    axis: Axis,
    level: &LevelSelector,
    func: AggFunc,
    options: &SubaggOptions,
) -> Result<Frame> {
    tracing::debug!(?axis, ?level, ?func, "adding per-group aggregates");
    match axis {
        Axis::Rows => add_subagg_rows(data, level, func, options),
        Axis::Columns => {
            Ok(add_subagg_rows(&data.transpose(), level, func, options)?.transpose())
        }
        Axis::Both => Err(TransformError::InvalidAxis(
            "per-group aggregates go on one axis at a time".to_string(),
        )),
    }
}

fn add_subagg_rows(
    data: &Frame,
    level: &LevelSelector,
    func: AggFunc,
    options: &SubaggOptions,
) -> Result<Frame> {
    let index = data.rows();
    if !index.is_hierarchical() {
        return Err(TransformError::NotHierarchical);
    }
    let level = match level {
        LevelSelector::Pos(pos) => *pos,
        LevelSelector::Name(name) => index.level(name)?,
    };
    if level >= index.nlevels() - 1 {
        return Err(TransformError::InvalidLevel {
            level,
            max: index.nlevels() - 2,
        });
    }

    let mask = data_mask(index, &options.ignore_keys);
    let base_label = options.label.as_deref().unwrap_or(func.default_label());
    let threshold = usize::from(options.skip_single_rows);

    let mut rows: Vec<(Key, Vec<Option<f64>>)> = Vec::with_capacity(index.len());
    for (prefix, members) in index.group_by_prefix(level) {
        for &pos in &members {
            rows.push((index.key(pos).clone(), data.row_values(pos)));
        }

        let kept: Vec<usize> = members.iter().copied().filter(|&pos| mask[pos]).collect();
        if kept.len() <= threshold {
            continue;
        }
        let values: Vec<Option<f64>> = (0..data.ncols())
            .map(|col| {
                let cells: Vec<Option<f64>> =
                    kept.iter().map(|&row| data.value(row, col)).collect();
                func.apply(&cells)
            })
            .collect();

        let label = if options.include_level_name {
            match prefix.last() {
                Some(group) => format!("{base_label} {group}"),
                None => base_label.to_string(),
            }
        } else {
            base_label.to_string()
        };
        let mut key = prefix.clone();
        key.push(Label::from(label.as_str()));
        key.extend((key.len()..index.nlevels()).map(|_| Label::from(options.fill.as_str())));
        rows.push((key, values));
    }

    Ok(
        Frame::from_rows(index.names().to_vec(), data.columns().clone(), rows)?
            .with_attrs(data.attrs().clone()),
    )
}
