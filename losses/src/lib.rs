//! Loss objectives and evaluation metrics for model predictions.
//!
//! Inputs are passed as [`Labels`]: either one value per sample, or one
//! one-hot (or probability) row per sample. The caller picks the variant;
//! nothing is inferred from the data.

pub mod metrics;
pub mod objectives;

use thiserror::Error;

pub use metrics::{accuracy, binary_cross_entropy, cross_entropy, mean_square_error, r2_score};
pub use objectives::{BinaryCrossEntropy, CrossEntropy, MeanSquareError, Objective};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MetricError {
    #[error("shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch { expected: (usize, usize), found: (usize, usize) },
    #[error("no samples")]
    Empty,
    #[error("rows of a one-hot matrix must all have the same length")]
    RaggedRows,
    #[error("true values are constant, r2 is undefined")]
    ZeroVariance,
    #[error("expected one-hot rows, got scalar labels")]
    NotOneHot,
}

/// True or predicted values for a batch of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Labels<'a> {
    /// One value per sample.
    Scalar(&'a [f64]),
    /// One row per sample, one column per class.
    OneHot(&'a [Vec<f64>]),
}

impl<'a> Labels<'a> {
    /// `(samples, columns)`; scalar labels have one column.
    pub fn shape(&self) -> Result<(usize, usize), MetricError> {
        match self {
            Labels::Scalar(values) => Ok((values.len(), 1)),
            Labels::OneHot(rows) => {
                let width = rows.first().map(Vec::len).unwrap_or(0);
                if rows.iter().any(|row| row.len() != width) {
                    return Err(MetricError::RaggedRows);
                }
                Ok((rows.len(), width))
            }
        }
    }

    /// Every value in row-major order.
    pub fn values(&self) -> Box<dyn Iterator<Item = f64> + 'a> {
        match *self {
            Labels::Scalar(values) => Box::new(values.iter().copied()),
            Labels::OneHot(rows) => Box::new(rows.iter().flat_map(|row| row.iter().copied())),
        }
    }
}

/// Checks that `y` and `z` are the same variant with the same non-empty
/// shape and returns that shape.
pub(crate) fn matching_shape(y: &Labels<'_>, z: &Labels<'_>) -> Result<(usize, usize), MetricError> {
    let expected = y.shape()?;
    let found = z.shape()?;
    let same_kind = matches!(
        (y, z),
        (Labels::Scalar(_), Labels::Scalar(_)) | (Labels::OneHot(_), Labels::OneHot(_))
    );
    if !same_kind || expected != found {
        return Err(MetricError::ShapeMismatch { expected, found });
    }
    if expected.0 == 0 || expected.1 == 0 {
        return Err(MetricError::Empty);
    }
    Ok(expected)
}
