use crosstab_frame::FrameError;
use thiserror::Error;

/// Errors that can occur during table transforms
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Invalid axis: {0} (expected 0, 1, 2, \"index\", \"columns\" or \"both\")")]
    InvalidAxis(String),

    #[error("Label not found: {0}")]
    LabelNotFound(String),

    #[error("Unsupported shape: no implementation for {0} input")]
    UnsupportedShape(&'static str),

    #[error("Subtotals require a hierarchical index on the target axis")]
    NotHierarchical,

    #[error("Level must be smaller than {max} to leave room for grouping, got {level}")]
    InvalidLevel { level: usize, max: usize },

    #[error(transparent)]
    Frame(#[from] FrameError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
