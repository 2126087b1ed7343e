//! Display and export adapters for crosstab tables
//!
//! Read-only consumers of transform output: a serializable [`TableSpec`]
//! for data viewers and a plain-text grid writer for terminal inspection.
//! Margin rows and columns are flagged from the tracked labels so a viewer
//! can style them without recomputing anything.

mod error;
mod tablespec;
mod text;

/// Re-export render error types.
pub use error::{RenderError, Result};
/// Re-export the viewer spec builder.
pub use tablespec::{TableSpec, TableSpecBuilder};
/// Re-export the plain-text writer.
pub use text::{to_text, TextOptions};
