//! Percentage and totals transforms for labeled tables
//!
//! Adds totals, subtotals and percentage blocks to [`crosstab_frame`]
//! tables and keeps chained calls honest: every margin an operation adds is
//! tracked on the table's metadata so later operations leave it out of
//! their computations. Percentages can be rounded so they still add up to
//! their base.
//!
//! # Examples
//!
//! ```
//! use crosstab_frame::{Frame, Index};
//! use crosstab_transforms::{
//!     add_totals, as_percentages, Axis, PercentageOptions, TotalsOptions,
//! };
//!
//! let counts = Frame::from_values(
//!     Index::from_labels(["jan", "feb"]).unwrap(),
//!     Index::from_labels(["A", "B"]).unwrap(),
//!     vec![vec![10.0, 30.0], vec![20.0, 40.0]],
//! )
//! .unwrap();
//!
//! let with_totals = add_totals(&counts, Axis::Both, &TotalsOptions::default()).unwrap();
//! let options = PercentageOptions {
//!     ndigits: 0,
//!     base: 100.0,
//!     label_totals: Some("Totals".into()),
//!     ..PercentageOptions::default()
//! };
//! let pcts = as_percentages(&with_totals, Axis::Both, &options).unwrap();
//! assert_eq!(pcts.value(2, 2), Some(100.0));
//! ```

pub mod aggregation;
pub mod axis;
pub mod config;
pub mod error;
pub mod labels;
pub mod mask;
pub mod percentages;
pub mod rounding;
pub mod split;
pub mod totals;

/// Re-export generic margin aggregation.
pub use aggregation::{add_agg, add_subagg, AggFunc, AggOptions, LevelSelector, SubaggOptions};
/// Re-export axis resolution.
pub use axis::{Axis, AxisSelector};
/// Re-export configurable defaults.
pub use config::Defaults;
/// Re-export transform error types.
pub use error::{Result, TransformError};
/// Re-export label tracking.
pub use labels::Category;
/// Re-export data masking.
pub use mask::{data_mask, kept_positions};
/// Re-export percentage transforms.
pub use percentages::{
    add_percentages, add_percentages_data, add_series_percentages, as_percentages,
    as_percentages_data, as_series_percentages, PercentageOptions,
};
/// Re-export rounding helpers.
pub use rounding::{round_apportioned, round_half_even};
/// Re-export the values-and-totals split.
pub use split::{SeriesValuesAndTotals, Totals, ValuesAndTotals};
/// Re-export totals transforms.
pub use totals::{
    add_series_total, add_subtotals, add_totals, add_totals_data, drop_totals, SubtotalsOptions,
    TotalsOptions,
};
