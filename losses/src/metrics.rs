use crate::objectives::{BinaryCrossEntropy, CrossEntropy, MeanSquareError, Objective};
use crate::{Labels, MetricError, matching_shape};

/// Coefficient of determination, `1 - RSS / TSS`.
pub fn r2_score(y: &[f64], z: &[f64]) -> Result<f64, MetricError> {
    matching_shape(&Labels::Scalar(y), &Labels::Scalar(z))?;
    let mean = y.iter().sum::<f64>() / y.len() as f64;
    let rss: f64 = y.iter().zip(z).map(|(t, p)| (t - p).powi(2)).sum();
    let tss: f64 = y.iter().map(|t| (t - mean).powi(2)).sum();
    if tss == 0.0 {
        return Err(MetricError::ZeroVariance);
    }
    Ok(1.0 - rss / tss)
}

/// Fraction of samples whose predicted class matches the true class.
///
/// Scalar predictions are class 1 above 0.5 and class 0 otherwise; one-hot
/// rows are compared by argmax.
pub fn accuracy(y: &Labels<'_>, z: &Labels<'_>) -> Result<f64, MetricError> {
    let (samples, _) = matching_shape(y, z)?;
    let correct = match (y, z) {
        (Labels::Scalar(truth), Labels::Scalar(predicted)) => truth
            .iter()
            .zip(predicted.iter())
            .filter(|&(&t, &p)| t == if p > 0.5 { 1.0 } else { 0.0 })
            .count(),
        (Labels::OneHot(truth), Labels::OneHot(predicted)) => truth
            .iter()
            .zip(predicted.iter())
            .filter(|(t, p)| argmax(t) == argmax(p))
            .count(),
        _ => {
            return Err(MetricError::ShapeMismatch { expected: y.shape()?, found: z.shape()? });
        }
    };
    Ok(correct as f64 / samples as f64)
}

pub fn mean_square_error(y: &Labels<'_>, z: &Labels<'_>) -> Result<f64, MetricError> {
    MeanSquareError.objective(y, z)
}

pub fn binary_cross_entropy(y: &Labels<'_>, z: &Labels<'_>) -> Result<f64, MetricError> {
    BinaryCrossEntropy.objective(y, z)
}

pub fn cross_entropy(y: &Labels<'_>, z: &Labels<'_>) -> Result<f64, MetricError> {
    CrossEntropy.objective(y, z)
}

// First index of the largest value, like numpy's argmax.
fn argmax(row: &[f64]) -> usize {
    let mut best = 0;
    for (i, &value) in row.iter().enumerate() {
        if value > row[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholded_accuracy() {
        let y = [1.0, 0.0, 1.0, 1.0];
        let z = [0.9, 0.2, 0.4, 0.8];
        assert_eq!(accuracy(&Labels::Scalar(&y), &Labels::Scalar(&z)), Ok(0.75));
    }

    #[test]
    fn threshold_is_exclusive() {
        assert_eq!(accuracy(&Labels::Scalar(&[0.0]), &Labels::Scalar(&[0.5])), Ok(1.0));
    }

    #[test]
    fn one_hot_accuracy_uses_argmax() {
        let y = vec![vec![0.0, 1.0, 0.0], vec![1.0, 0.0, 0.0], vec![0.0, 0.0, 1.0]];
        let z = vec![vec![0.1, 0.7, 0.2], vec![0.3, 0.6, 0.1], vec![0.2, 0.2, 0.6]];
        let score = accuracy(&Labels::OneHot(&y), &Labels::OneHot(&z)).unwrap();
        assert!((score - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn argmax_takes_first_maximum() {
        assert_eq!(argmax(&[0.5, 0.5, 0.1]), 0);
        assert_eq!(argmax(&[0.1, 0.2, 0.7]), 2);
    }

    #[test]
    fn mixed_variants_are_rejected() {
        let y = [1.0];
        let z = vec![vec![1.0]];
        assert!(matches!(
            accuracy(&Labels::Scalar(&y), &Labels::OneHot(&z)),
            Err(MetricError::ShapeMismatch { .. })
        ));
        let ragged = vec![vec![1.0, 0.0], vec![1.0]];
        assert_eq!(
            accuracy(&Labels::OneHot(&ragged), &Labels::OneHot(&ragged)),
            Err(MetricError::RaggedRows)
        );
    }

    #[test]
    fn perfect_fit_scores_one() {
        let y = [3.0, -0.5, 2.0, 7.0];
        assert_eq!(r2_score(&y, &y), Ok(1.0));
    }

    #[test]
    fn r2_of_mean_prediction_is_zero() {
        let y = [1.0, 2.0, 3.0];
        let z = [2.0, 2.0, 2.0];
        assert!(r2_score(&y, &z).unwrap().abs() < 1e-12);
    }

    #[test]
    fn r2_edge_cases() {
        assert_eq!(r2_score(&[2.0, 2.0], &[1.0, 2.0]), Err(MetricError::ZeroVariance));
        assert_eq!(r2_score(&[], &[]), Err(MetricError::Empty));
        assert!(matches!(r2_score(&[1.0, 2.0], &[1.0]), Err(MetricError::ShapeMismatch { .. })));
    }

    #[test]
    fn wrappers_delegate() {
        let y = [1.0, 0.0];
        let z = [0.8, 0.3];
        let (y, z) = (Labels::Scalar(&y), Labels::Scalar(&z));
        assert_eq!(mean_square_error(&y, &z), MeanSquareError.objective(&y, &z));
        assert_eq!(binary_cross_entropy(&y, &z), BinaryCrossEntropy.objective(&y, &z));
        assert_eq!(cross_entropy(&y, &z), Err(MetricError::NotOneHot));
    }
}
