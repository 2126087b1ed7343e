use crate::error::{Result, TransformError};
use serde::Serialize;
use std::fmt;

/// The axis a transform operates along.
///
/// `Rows` (0) aggregates down the rows, producing per-column totals; `Columns`
/// (1) aggregates across the columns, producing per-row totals; `Both` (2)
/// covers the whole table (grand total).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Axis {
    Rows,
    Columns,
    Both,
}

/// An axis selector as callers write it: a numeric code or a symbolic name.
#[derive(Debug, Clone)]
pub enum AxisSelector {
    Code(i64),
    Name(String),
}

impl From<i64> for AxisSelector {
    fn from(code: i64) -> Self {
        AxisSelector::Code(code)
    }
}

impl From<i32> for AxisSelector {
    fn from(code: i32) -> Self {
        AxisSelector::Code(i64::from(code))
    }
}

impl From<&str> for AxisSelector {
    fn from(name: &str) -> Self {
        AxisSelector::Name(name.to_string())
    }
}

impl From<Axis> for AxisSelector {
    fn from(axis: Axis) -> Self {
        AxisSelector::Code(i64::from(axis.code()))
    }
}

impl Axis {
    /// Normalize a selector to an axis. Accepts `0`/`1`/`2` and the symbolic
    /// names `"index"`, `"columns"`, `"both"` with their short aliases
    /// (`"idx"`, `"rows"`, `"cols"`, `"all"`); anything else is an
    /// `InvalidAxis` error. Case-sensitive, pure, no side effects.
    pub fn resolve(selector: impl Into<AxisSelector>) -> Result<Axis> {
        match selector.into() {
            AxisSelector::Code(0) => Ok(Axis::Rows),
            AxisSelector::Code(1) => Ok(Axis::Columns),
            AxisSelector::Code(2) => Ok(Axis::Both),
            AxisSelector::Code(code) => Err(TransformError::InvalidAxis(code.to_string())),
            AxisSelector::Name(name) => match name.as_str() {
                "idx" | "index" | "rows" => Ok(Axis::Rows),
                "columns" | "cols" => Ok(Axis::Columns),
                "both" | "all" => Ok(Axis::Both),
                _ => Err(TransformError::InvalidAxis(name)),
            },
        }
    }

    /// Numeric code: 0, 1 or 2.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Axis::Rows => 0,
            Axis::Columns => 1,
            Axis::Both => 2,
        }
    }

    /// The other in-plane axis. `Both` has no complement and maps to itself.
    #[must_use]
    pub fn flipped(self) -> Axis {
        match self {
            Axis::Rows => Axis::Columns,
            Axis::Columns => Axis::Rows,
            Axis::Both => Axis::Both,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Rows => write!(f, "index"),
            Axis::Columns => write!(f, "columns"),
            Axis::Both => write!(f, "both"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_codes() {
        assert_eq!(Axis::resolve(0).unwrap(), Axis::Rows);
        assert_eq!(Axis::resolve(1).unwrap(), Axis::Columns);
        assert_eq!(Axis::resolve(2).unwrap(), Axis::Both);
    }

    #[test]
    fn test_resolve_names() {
        assert_eq!(Axis::resolve("index").unwrap(), Axis::Rows);
        assert_eq!(Axis::resolve("idx").unwrap(), Axis::Rows);
        assert_eq!(Axis::resolve("rows").unwrap(), Axis::Rows);
        assert_eq!(Axis::resolve("columns").unwrap(), Axis::Columns);
        assert_eq!(Axis::resolve("cols").unwrap(), Axis::Columns);
        assert_eq!(Axis::resolve("both").unwrap(), Axis::Both);
        assert_eq!(Axis::resolve("all").unwrap(), Axis::Both);
    }

    #[test]
    fn test_resolve_invalid() {
        assert!(matches!(
            Axis::resolve(3),
            Err(TransformError::InvalidAxis(_))
        ));
        assert!(matches!(
            Axis::resolve(-1),
            Err(TransformError::InvalidAxis(_))
        ));
        assert!(matches!(
            Axis::resolve("Columns"),
            Err(TransformError::InvalidAxis(_))
        ));
        assert!(matches!(
            Axis::resolve("diagonal"),
            Err(TransformError::InvalidAxis(_))
        ));
    }

    #[test]
    fn test_flipped() {
        assert_eq!(Axis::Rows.flipped(), Axis::Columns);
        assert_eq!(Axis::Columns.flipped(), Axis::Rows);
        assert_eq!(Axis::Both.flipped(), Axis::Both);
    }
}
