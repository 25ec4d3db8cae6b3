// Sequential — Dense layers applied one after another
//
// The training loop of a feed-forward network is always the same walk:
//
//   forward:   x → layer₀ → layer₁ → … → layerₙ → prediction
//   backward:  ∂L/∂pred → layerₙ → … → layer₀ → ∂L/∂x
//
// Sequential owns the ordered list and performs both walks. The layers stay
// reachable as a slice (`layers_mut()`), which is exactly what optimizers
// step over, so positions are stable across iterations.
//
// Example:
//   let mut model = Sequential::new()
//       .add(Dense::new(2, 4, Activation::Relu, &mut rng)?)
//       .add(Dense::new(4, 1, Activation::Sigmoid, &mut rng)?);
//
//   let pred = model.forward(&x)?;

use wren_core::{bail, Result, Tensor};

use crate::dense::Dense;

/// An ordered chain of dense layers.
#[derive(Debug, Clone, Default)]
pub struct Sequential {
    layers: Vec<Dense>,
}

impl Sequential {
    /// Create an empty Sequential.
    pub fn new() -> Self {
        Sequential { layers: Vec::new() }
    }

    /// Append a layer. Returns self for chaining.
    #[allow(clippy::should_implement_trait)]
    pub fn add(mut self, layer: Dense) -> Self {
        self.layers.push(layer);
        self
    }

    /// Append a layer in place.
    pub fn push(&mut self, layer: Dense) {
        self.layers.push(layer);
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[Dense] {
        &self.layers
    }

    /// The layers in order, for optimizer steps.
    pub fn layers_mut(&mut self) -> &mut [Dense] {
        &mut self.layers
    }

    /// Total learnable scalars across all layers.
    pub fn param_count(&self) -> usize {
        self.layers.iter().map(Dense::param_count).sum()
    }

    /// Run every layer's forward pass; returns the last layer's output.
    pub fn forward(&mut self, input: &Tensor) -> Result<&Tensor> {
        let Some((first, rest)) = self.layers.split_first_mut() else {
            bail!("forward on an empty Sequential");
        };
        let mut out = first.forward(input)?;
        for layer in rest {
            out = layer.forward(out)?;
        }
        Ok(out)
    }

    /// Run every layer's backward pass in reverse order.
    ///
    /// Returns the gradient with respect to the network input.
    pub fn backward(&mut self, grad_output: &Tensor) -> Result<Tensor> {
        let mut grad = grad_output.clone();
        for layer in self.layers.iter_mut().rev() {
            grad = layer.backward(&grad)?;
        }
        Ok(grad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::Activation;
    use wren_core::rng::seeded;
    use wren_core::Error;

    fn two_layer() -> Sequential {
        let mut rng = seeded(0);
        Sequential::new()
            .add(Dense::new(2, 4, Activation::Relu, &mut rng).unwrap())
            .add(Dense::new(4, 1, Activation::Sigmoid, &mut rng).unwrap())
    }

    #[test]
    fn test_forward_shape() {
        let mut model = two_layer();
        assert_eq!(model.len(), 2);
        assert_eq!(model.param_count(), (2 * 4 + 4) + (4 + 1));
        let x = Tensor::ones(3, 2).unwrap();
        let y = model.forward(&x).unwrap();
        assert_eq!((y.rows(), y.cols()), (3, 1));
        assert!(y.data().iter().all(|&p| p > 0.0 && p < 1.0));
    }

    #[test]
    fn test_backward_reaches_every_layer() {
        let mut model = two_layer();
        let x = Tensor::ones(3, 2).unwrap();
        model.forward(&x).unwrap();
        let grad_in = model.backward(&Tensor::ones(3, 1).unwrap()).unwrap();
        assert_eq!((grad_in.rows(), grad_in.cols()), (3, 2));
        // sigmoid output layer always has a non-zero bias gradient
        assert!(model.layers()[1].grad_bias().data()[0] != 0.0);
    }

    #[test]
    fn test_backward_before_forward() {
        let mut model = two_layer();
        let err = model.backward(&Tensor::ones(1, 1).unwrap()).unwrap_err();
        assert_eq!(err, Error::BackwardBeforeForward);
    }

    #[test]
    fn test_empty_forward_is_error() {
        let mut model = Sequential::new();
        assert!(model.is_empty());
        assert!(model.forward(&Tensor::ones(1, 1).unwrap()).is_err());
    }

    #[test]
    fn test_mismatched_chain_is_error() {
        let mut rng = seeded(1);
        let mut model = Sequential::new();
        model.push(Dense::new(2, 3, Activation::Identity, &mut rng).unwrap());
        model.push(Dense::new(4, 1, Activation::Identity, &mut rng).unwrap());
        assert!(model.forward(&Tensor::ones(1, 2).unwrap()).is_err());
    }
}
