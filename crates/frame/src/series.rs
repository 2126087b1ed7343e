use crate::attrs::Attrs;
use crate::error::{FrameError, Result};
use crate::index::Index;
use serde::Serialize;

/// A labeled 1D vector of nullable numeric values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    index: Index,
    values: Vec<Option<f64>>,
    name: Option<String>,
    attrs: Attrs,
}

impl Series {
    /// Create a series from an index and values, validating length.
    pub fn new(index: Index, values: Vec<Option<f64>>) -> Result<Self> {
        if values.len() != index.len() {
            return Err(FrameError::ShapeMismatch {
                index_len: index.len(),
                data_len: values.len(),
            });
        }
        Ok(Series {
            index,
            values,
            name: None,
            attrs: Attrs::new(),
        })
    }

    /// Create a series from non-null numeric values.
    pub fn from_values(index: Index, values: Vec<f64>) -> Result<Self> {
        Self::new(index, values.into_iter().map(Some).collect())
    }

    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    #[must_use]
    pub fn with_attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn index(&self) -> &Index {
        &self.index
    }

    #[must_use]
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    #[must_use]
    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut Attrs {
        &mut self.attrs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn value(&self, pos: usize) -> Option<f64> {
        self.values[pos]
    }

    /// Sum of non-null values (0 when there are none).
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.values.iter().flatten().sum()
    }

    /// Copy containing only the given positions, in order.
    #[must_use]
    pub fn select(&self, positions: &[usize]) -> Self {
        Series {
            index: self.index.select(positions),
            values: positions.iter().map(|&p| self.values[p]).collect(),
            name: self.name.clone(),
            attrs: self.attrs.clone(),
        }
    }

    /// Append a labeled value at the end.
    pub fn push(&mut self, key: crate::index::Key, value: Option<f64>) -> Result<()> {
        self.index.push(key)?;
        self.values.push(value);
        Ok(())
    }

    /// Element-wise map over values.
    #[must_use]
    pub fn map(&self, f: impl Fn(Option<f64>) -> Option<f64>) -> Self {
        Series {
            index: self.index.clone(),
            values: self.values.iter().map(|&v| f(v)).collect(),
            name: self.name.clone(),
            attrs: self.attrs.clone(),
        }
    }
}
