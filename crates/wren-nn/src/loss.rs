// Loss Functions
//
// A loss turns (prediction, target) into one scalar and, separately, gives
// the gradient of that scalar with respect to every prediction element. The
// gradient is what seeds the backward pass of the last layer.
//
// KEY LOSSES:
//
// 1. MSE (Mean Squared Error): mean((p - t)²)
//    ∂/∂p = 2 (p - t) / n
//
// 2. BCE (Binary Cross-Entropy) on probabilities:
//    mean(-(t ln p + (1 - t) ln(1 - p)))
//    ∂/∂p = (p - t) / (p (1 - p) n)
//    p is clamped to [ε, 1 - ε] with ε = 1e-7 in both the value and the
//    gradient, so a saturated sigmoid never produces ln(0) or 1/0.
//
// Both derivatives already include the 1/n of the mean. Callers must not
// divide by the batch size again.
//
// Shapes of prediction, target (and the gradient output) must be identical.
// A mismatch is an Err; the gradient buffer is then left untouched.

use tracing::warn;
use wren_core::{Error, Result, Tensor};

/// Clamp used by binary cross-entropy before taking logarithms.
pub const BCE_EPSILON: f32 = 1e-7;

fn check_shapes(op: &'static str, prediction: &Tensor, target: &Tensor) -> Result<()> {
    if prediction.shape() != target.shape() {
        warn!(
            op,
            prediction = %prediction.shape(),
            target = %target.shape(),
            "loss shape mismatch"
        );
        return Err(Error::shape_mismatch(op, prediction.shape(), target.shape()));
    }
    Ok(())
}

fn check_grad(op: &'static str, prediction: &Tensor, target: &Tensor, grad: &Tensor) -> Result<()> {
    check_shapes(op, prediction, target)?;
    check_shapes(op, prediction, grad)
}

fn clamp_probability(p: f32) -> f32 {
    p.clamp(BCE_EPSILON, 1.0 - BCE_EPSILON)
}

/// Mean Squared Error: `mean((prediction - target)²)`.
pub fn mse_loss(prediction: &Tensor, target: &Tensor) -> Result<f32> {
    check_shapes("mse_loss", prediction, target)?;
    let n = prediction.elem_count();
    if n == 0 {
        return Ok(0.0);
    }
    let sum: f32 = prediction
        .data()
        .iter()
        .zip(target.data())
        .map(|(p, t)| (p - t) * (p - t))
        .sum();
    Ok(sum / n as f32)
}

/// Binary cross-entropy on probabilities in (0, 1), e.g. sigmoid outputs.
///
/// Computes `mean(-(t ln p + (1 - t) ln(1 - p)))` with `p` clamped into
/// `[1e-7, 1 - 1e-7]`.
pub fn bce_loss(prediction: &Tensor, target: &Tensor) -> Result<f32> {
    check_shapes("bce_loss", prediction, target)?;
    let n = prediction.elem_count();
    if n == 0 {
        return Ok(0.0);
    }
    let sum: f32 = prediction
        .data()
        .iter()
        .zip(target.data())
        .map(|(&p, &t)| {
            let p = clamp_probability(p);
            -(t * p.ln() + (1.0 - t) * (1.0 - p).ln())
        })
        .sum();
    Ok(sum / n as f32)
}

/// Gradient of [`mse_loss`] with respect to `prediction`, written to `grad`.
pub fn mse_derivative(prediction: &Tensor, target: &Tensor, grad: &mut Tensor) -> Result<()> {
    check_grad("mse_derivative", prediction, target, grad)?;
    let n = prediction.elem_count() as f32;
    for ((g, &p), &t) in grad
        .data_mut()
        .iter_mut()
        .zip(prediction.data())
        .zip(target.data())
    {
        *g = 2.0 * (p - t) / n;
    }
    Ok(())
}

/// Gradient of [`bce_loss`] with respect to `prediction`, written to `grad`.
pub fn bce_derivative(prediction: &Tensor, target: &Tensor, grad: &mut Tensor) -> Result<()> {
    check_grad("bce_derivative", prediction, target, grad)?;
    let n = prediction.elem_count() as f32;
    for ((g, &p), &t) in grad
        .data_mut()
        .iter_mut()
        .zip(prediction.data())
        .zip(target.data())
    {
        let p = clamp_probability(p);
        *g = (p - t) / (p * (1.0 - p) * n);
    }
    Ok(())
}

/// A loss selectable at runtime, exposing the compute/derivative pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loss {
    MeanSquaredError,
    BinaryCrossEntropy,
}

impl Loss {
    /// The scalar loss.
    pub fn compute(&self, prediction: &Tensor, target: &Tensor) -> Result<f32> {
        match self {
            Loss::MeanSquaredError => mse_loss(prediction, target),
            Loss::BinaryCrossEntropy => bce_loss(prediction, target),
        }
    }

    /// Write `∂loss/∂prediction` into a caller-provided, equally shaped tensor.
    pub fn derivative(&self, prediction: &Tensor, target: &Tensor, grad: &mut Tensor) -> Result<()> {
        match self {
            Loss::MeanSquaredError => mse_derivative(prediction, target, grad),
            Loss::BinaryCrossEntropy => bce_derivative(prediction, target, grad),
        }
    }

    /// Allocating form of [`Loss::derivative`].
    pub fn gradient(&self, prediction: &Tensor, target: &Tensor) -> Result<Tensor> {
        let mut grad = prediction.zeros_like()?;
        self.derivative(prediction, target, &mut grad)?;
        Ok(grad)
    }
}
