//! Labeled-table data structure for crosstab
//!
//! Provides the 2D [`Frame`] and 1D [`Series`] containers the transform crate
//! operates on: ordered flat or hierarchical indexes on both axes, nullable
//! numeric cells, axis-aware broadcast arithmetic, and a per-instance
//! metadata slot ([`Attrs`]) that survives copies.
//!
//! # Examples
//!
//! ```
//! use crosstab_frame::{Frame, Index};
//!
//! let frame = Frame::from_values(
//!     Index::from_labels(["jan", "feb", "mar"]).unwrap(),
//!     Index::from_labels(["A", "B"]).unwrap(),
//!     vec![vec![10.0, 15.0], vec![20.0, 25.0], vec![30.0, 20.0]],
//! )
//! .unwrap();
//!
//! assert_eq!(frame.shape(), (3, 2));
//! assert_eq!(frame.sum_down(), vec![60.0, 60.0]);
//! ```

mod attrs;
mod csv;
mod data;
mod error;
mod frame;
mod index;
mod label;
mod series;

/// Re-export margin-label metadata.
pub use attrs::Attrs;
/// Re-export CSV options.
pub use csv::CsvOptions;
/// Re-export the shape-dispatch wrapper.
pub use data::Data;
/// Re-export frame error types.
pub use error::{FrameError, Result};
/// Re-export the 2D table type.
pub use frame::Frame;
/// Re-export index types.
pub use index::{Index, Key};
/// Re-export the label type.
pub use label::Label;
/// Re-export the 1D series type.
pub use series::Series;
