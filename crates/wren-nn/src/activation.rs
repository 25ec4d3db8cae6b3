// Activation — the elementwise nonlinearity of a dense layer
//
// A layer picks one variant at construction and never changes it. Forward and
// backward both go through a single evaluation/derivative pair so the layer
// algorithm itself has no per-activation branches:
//
//   apply(pre)                             → output
//   local_gradient(grad_out, pre, output)  → grad_out ⊙ f'(·)
//
// Which buffer the derivative reads matters:
//   Identity — f'(x) = 1, the gradient passes through unchanged
//   Relu     — f'(x) = 1 if x > 0 else 0, read from the PRE-activation
//   Sigmoid  — f'(x) = s(1 - s) with s = σ(x), read from the OUTPUT

use std::fmt;

use wren_core::{Error, Result, Tensor};

/// Elementwise activation applied after the affine transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    /// f(x) = x
    #[default]
    Identity,
    /// f(x) = max(0, x)
    Relu,
    /// f(x) = 1 / (1 + e^-x)
    Sigmoid,
}

impl Activation {
    /// Evaluate the activation on pre-activation values.
    pub fn apply(&self, pre_activation: &Tensor) -> Result<Tensor> {
        match self {
            Activation::Identity => Ok(pre_activation.clone()),
            Activation::Relu => pre_activation.relu(),
            Activation::Sigmoid => pre_activation.sigmoid(),
        }
    }

    /// Undo the activation in the backward pass: `grad_output ⊙ f'`.
    ///
    /// `pre_activation` and `output` are the values cached by the forward
    /// call; `grad_output` must have the same shape as `output`.
    pub fn local_gradient(
        &self,
        grad_output: &Tensor,
        pre_activation: &Tensor,
        output: &Tensor,
    ) -> Result<Tensor> {
        if grad_output.shape() != output.shape() {
            return Err(Error::shape_mismatch(
                "activation backward",
                output.shape(),
                grad_output.shape(),
            ));
        }
        match self {
            Activation::Identity => Ok(grad_output.clone()),
            Activation::Relu => grad_output.mul(&pre_activation.relu_derivative()?),
            Activation::Sigmoid => grad_output.mul(&output.sigmoid_derivative()?),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Activation::Identity => "identity",
            Activation::Relu => "relu",
            Activation::Sigmoid => "sigmoid",
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn row(data: &[f32]) -> Tensor {
        Tensor::from_slice(data, 1, data.len()).unwrap()
    }

    #[test]
    fn test_apply() {
        let x = row(&[-2.0, 0.0, 3.0]);
        assert_eq!(Activation::Identity.apply(&x).unwrap(), x);
        assert_eq!(Activation::Relu.apply(&x).unwrap().data(), &[0.0, 0.0, 3.0]);
        let s = Activation::Sigmoid.apply(&x).unwrap();
        assert_abs_diff_eq!(s.data()[1], 0.5, epsilon = 1e-7);
    }

    #[test]
    fn test_identity_passes_gradient_through() {
        let pre = row(&[-1.0, 2.0]);
        let g = row(&[0.3, -0.7]);
        let local = Activation::Identity
            .local_gradient(&g, &pre, &pre)
            .unwrap();
        assert_eq!(local, g);
    }

    #[test]
    fn test_relu_gradient_masks_on_pre_activation() {
        let pre = row(&[-1.0, 0.0, 2.0]);
        let out = Activation::Relu.apply(&pre).unwrap();
        let g = row(&[5.0, 5.0, 5.0]);
        let local = Activation::Relu.local_gradient(&g, &pre, &out).unwrap();
        assert_eq!(local.data(), &[0.0, 0.0, 5.0]);
    }

    #[test]
    fn test_sigmoid_gradient_uses_output() {
        let pre = row(&[0.0, 1.5]);
        let out = Activation::Sigmoid.apply(&pre).unwrap();
        let g = row(&[2.0, 1.0]);
        let local = Activation::Sigmoid.local_gradient(&g, &pre, &out).unwrap();
        assert_abs_diff_eq!(local.data()[0], 2.0 * 0.25, epsilon = 1e-7);
        let s = out.data()[1];
        assert_abs_diff_eq!(local.data()[1], s * (1.0 - s), epsilon = 1e-7);
    }

    #[test]
    fn test_gradient_shape_mismatch() {
        let pre = row(&[1.0, 2.0]);
        let g = row(&[1.0, 2.0, 3.0]);
        assert!(Activation::Relu.local_gradient(&g, &pre, &pre).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Activation::Sigmoid.to_string(), "sigmoid");
        assert_eq!(Activation::default(), Activation::Identity);
    }
}
