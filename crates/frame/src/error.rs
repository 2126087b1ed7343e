use crate::index::Key;
use thiserror::Error;

/// Errors that can occur during frame operations
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Shape mismatch: index has {index_len} entries but data has {data_len}")]
    ShapeMismatch { index_len: usize, data_len: usize },

    #[error("Row length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Key level mismatch: index has {nlevels} levels, key has {key_levels}")]
    KeyLevelMismatch { nlevels: usize, key_levels: usize },

    #[error("Duplicate key: {key:?}")]
    DuplicateKey { key: Key },

    #[error("Level out of bounds: {level} (index has {nlevels} levels)")]
    LevelOutOfBounds { level: usize, nlevels: usize },

    #[error("Level not found: {name}")]
    LevelNotFound { name: String },

    #[error("Index mismatch: frames must agree on the shared axis to concatenate")]
    RowIndexMismatch,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FrameError>;
