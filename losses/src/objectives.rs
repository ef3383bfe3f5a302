use crate::{Labels, MetricError, matching_shape};

/// Probabilities are clipped to `[EPSILON, 1 - EPSILON]` before taking logs.
pub const EPSILON: f64 = 1e-15;

pub trait Objective {
    /// Loss of predictions `z` against true values `y`.
    fn objective(&self, y: &Labels<'_>, z: &Labels<'_>) -> Result<f64, MetricError>;
}

/// Mean of the squared differences.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanSquareError;

impl Objective for MeanSquareError {
    fn objective(&self, y: &Labels<'_>, z: &Labels<'_>) -> Result<f64, MetricError> {
        let (rows, cols) = matching_shape(y, z)?;
        let sum: f64 = y.values().zip(z.values()).map(|(t, p)| (t - p).powi(2)).sum();
        Ok(sum / (rows * cols) as f64)
    }
}

/// Mean of `-(y ln z + (1 - y) ln(1 - z))` over every value.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCrossEntropy;

impl Objective for BinaryCrossEntropy {
    fn objective(&self, y: &Labels<'_>, z: &Labels<'_>) -> Result<f64, MetricError> {
        let (rows, cols) = matching_shape(y, z)?;
        let sum: f64 = y
            .values()
            .zip(z.values())
            .map(|(t, p)| {
                let p = p.clamp(EPSILON, 1.0 - EPSILON);
                -(t * p.ln() + (1.0 - t) * (1.0 - p).ln())
            })
            .sum();
        Ok(sum / (rows * cols) as f64)
    }
}

/// Mean over samples of `-sum(y ln z)`. One-hot rows only.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossEntropy;

impl Objective for CrossEntropy {
    fn objective(&self, y: &Labels<'_>, z: &Labels<'_>) -> Result<f64, MetricError> {
        if matches!(y, Labels::Scalar(_)) || matches!(z, Labels::Scalar(_)) {
            return Err(MetricError::NotOneHot);
        }
        let (rows, _) = matching_shape(y, z)?;
        let sum: f64 = y
            .values()
            .zip(z.values())
            .map(|(t, p)| -t * p.clamp(EPSILON, 1.0 - EPSILON).ln())
            .sum();
        Ok(sum / rows as f64)
    }
}
