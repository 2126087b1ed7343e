use crate::frame::Frame;
use crate::series::Series;

/// Shape-dispatch wrapper for operations that accept 1D or 2D input.
///
/// Transforms match on the variant instead of probing the type dynamically;
/// shapes an operation does not dispatch for surface an unsupported-shape
/// error at the boundary.
#[derive(Debug, Clone)]
pub enum Data {
    Scalar(f64),
    Series(Series),
    Frame(Frame),
}

impl Data {
    /// Human-readable shape name for error messages.
    #[must_use]
    pub fn shape_name(&self) -> &'static str {
        match self {
            Data::Scalar(_) => "scalar",
            Data::Series(_) => "series",
            Data::Frame(_) => "frame",
        }
    }

    /// Take the frame out of the wrapper, if that is what it holds.
    #[must_use]
    pub fn into_frame(self) -> Option<Frame> {
        match self {
            Data::Frame(frame) => Some(frame),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_series(self) -> Option<Series> {
        match self {
            Data::Series(series) => Some(series),
            _ => None,
        }
    }
}

impl From<f64> for Data {
    fn from(value: f64) -> Self {
        Data::Scalar(value)
    }
}

impl From<Series> for Data {
    fn from(series: Series) -> Self {
        Data::Series(series)
    }
}

impl From<Frame> for Data {
    fn from(frame: Frame) -> Self {
        Data::Frame(frame)
    }
}
