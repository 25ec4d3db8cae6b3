// SGD — plain gradient descent
//
//   θ ← θ - lr · ∇θ
//
// No per-parameter state: the update depends only on the current gradient,
// so layers can be stepped in any order, together or one at a time.

use wren_core::Result;
use wren_nn::Dense;

use crate::optimizer::Optimizer;

/// Stochastic Gradient Descent optimizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    learning_rate: f32,
}

impl Sgd {
    pub fn new(learning_rate: f32) -> Self {
        Sgd { learning_rate }
    }

    /// Update one layer: `param -= lr * grad` for every weight and bias.
    pub fn step_layer(&self, layer: &mut Dense) {
        let lr = self.learning_rate;
        let (weight, grad) = layer.weight_with_grad_mut();
        descend(weight, grad, lr);
        let (bias, grad) = layer.bias_with_grad_mut();
        descend(bias, grad, lr);
    }
}

fn descend(params: &mut [f32], grads: &[f32], lr: f32) {
    for (p, g) in params.iter_mut().zip(grads) {
        *p -= lr * g;
    }
}

impl Optimizer for Sgd {
    fn step(&mut self, layers: &mut [Dense]) -> Result<()> {
        for layer in layers.iter_mut() {
            self.step_layer(layer);
        }
        Ok(())
    }

    fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    fn set_learning_rate(&mut self, lr: f32) {
        self.learning_rate = lr;
    }
}
