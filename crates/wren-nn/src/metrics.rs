// Evaluation Metrics
//
// Binary classification helpers for networks with a single probability
// output per row (sigmoid head):
//
//   threshold_classes(pred, 0.5)          — probabilities → {0, 1} per element
//   accuracy(predictions, targets)        — fraction of equal class indices
//   binary_accuracy(pred, target, 0.5)    — both of the above on tensors
//
// Targets are thresholded with the same cut-off, so {0.0, 1.0} labels and
// soft labels both work.

use wren_core::{Error, Result, Tensor};

/// Classification accuracy: fraction of positions where prediction == target.
///
/// Returns 0 for empty input. Extra elements of the longer slice are ignored.
pub fn accuracy(predictions: &[usize], targets: &[usize]) -> f32 {
    let n = predictions.len().min(targets.len());
    if n == 0 {
        return 0.0;
    }
    let correct = predictions
        .iter()
        .zip(targets.iter())
        .filter(|(p, t)| p == t)
        .count();
    correct as f32 / n as f32
}

/// Map every element to class 1 if it is strictly above `threshold`, else 0.
pub fn threshold_classes(probabilities: &Tensor, threshold: f32) -> Vec<usize> {
    probabilities
        .data()
        .iter()
        .map(|&p| usize::from(p > threshold))
        .collect()
}

/// Accuracy of thresholded predictions against thresholded targets.
pub fn binary_accuracy(prediction: &Tensor, target: &Tensor, threshold: f32) -> Result<f32> {
    if prediction.shape() != target.shape() {
        return Err(Error::shape_mismatch(
            "binary_accuracy",
            prediction.shape(),
            target.shape(),
        ));
    }
    Ok(accuracy(
        &threshold_classes(prediction, threshold),
        &threshold_classes(target, threshold),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(&[0, 1, 1, 0], &[0, 1, 0, 0]), 0.75);
        assert_eq!(accuracy(&[], &[]), 0.0);
    }

    #[test]
    fn test_threshold_is_strict() {
        let p = Tensor::from_vec(vec![0.2, 0.5, 0.51, 0.99], 4, 1).unwrap();
        assert_eq!(threshold_classes(&p, 0.5), vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_binary_accuracy() {
        let p = Tensor::from_vec(vec![0.1, 0.9, 0.8, 0.6], 4, 1).unwrap();
        let t = Tensor::from_vec(vec![0.0, 1.0, 1.0, 0.0], 4, 1).unwrap();
        assert_eq!(binary_accuracy(&p, &t, 0.5).unwrap(), 0.75);
        let wrong = Tensor::new(2, 2).unwrap();
        assert!(binary_accuracy(&p, &wrong, 0.5).is_err());
    }
}
