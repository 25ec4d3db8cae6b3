// Dense — Fully-connected layer with hand-derived gradients
//
// The layer computes y = f(x · W + b) and remembers what it needs to run the
// chain rule backwards.
//
// PARAMETER SHAPES:
//
//   weight:      [in, out]   — x · W needs no transpose
//   bias:        [1, out]    — broadcast across the batch (row) dimension
//   grad_weight: [in, out]   — overwritten by every backward()
//   grad_bias:   [1, out]    — overwritten by every backward()
//
// WEIGHT INITIALIZATION:
//
//   Xavier/Glorot uniform, U(-b, b) with b = sqrt(6 / (in + out)); bias and
//   gradients start at zero. `he_init()` swaps in N(0, 2 / in) for layers
//   feeding ReLUs.
//
// FORWARD CACHE:
//
//   forward() stores an owned copy of the input, the pre-activation sum and
//   the output. Only the latest call is kept: the previous cache is dropped
//   when the new one is assigned. Before the first forward there is no cache
//   and backward() reports Error::BackwardBeforeForward.
//
// BACKWARD (given g = ∂L/∂y, same shape as y):
//
//   local      = g ⊙ f'(·)                    (activation decides the buffer)
//   grad_W     = xᵀ · local
//   grad_b     = Σ_rows local
//   ∂L/∂x      = local · Wᵀ                    (returned to the caller)
//
// STATES:
//
//   Constructed --forward--> HasActivation --backward--> HasGradients
//        ^                        ^                           |
//        |                        +---------forward-----------+
//   (gradients stay stale until the next backward)

use rand::Rng;
use tracing::{debug, trace};
use wren_core::{bail, Error, Result, Shape, Tensor};

use crate::activation::Activation;
use crate::init;

/// Values remembered by the most recent forward call.
#[derive(Debug, Clone)]
struct ForwardCache {
    input: Tensor,
    pre_activation: Tensor,
    output: Tensor,
}

/// A fully-connected layer: `y = f(x · W + b)`.
///
/// # Example
/// ```
/// use wren_core::{rng, Tensor};
/// use wren_nn::{Activation, Dense};
///
/// let mut rng = rng::seeded(0);
/// let mut layer = Dense::new(2, 4, Activation::Relu, &mut rng)?;
/// let x = Tensor::ones(3, 2)?;            // batch of 3
/// let y = layer.forward(&x)?;             // shape [3, 4]
/// assert_eq!((y.rows(), y.cols()), (3, 4));
/// let grad_in = layer.backward(&Tensor::ones(3, 4)?)?;
/// assert_eq!((grad_in.rows(), grad_in.cols()), (3, 2));
/// # Ok::<(), wren_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Dense {
    weight: Tensor,
    bias: Tensor,
    grad_weight: Tensor,
    grad_bias: Tensor,
    activation: Activation,
    cache: Option<ForwardCache>,
}

impl Dense {
    /// Create a layer with Xavier-uniform weights and zero bias.
    pub fn new<R: Rng + ?Sized>(
        input_size: usize,
        output_size: usize,
        activation: Activation,
        rng: &mut R,
    ) -> Result<Self> {
        if input_size == 0 || output_size == 0 {
            bail!("dense layer sizes must be non-zero, got {input_size} -> {output_size}");
        }
        let weight = init::xavier_uniform(input_size, output_size, rng)?;
        let layer = Self::with_parameters(weight, Tensor::new(1, output_size)?, activation)?;
        debug!(
            input_size,
            output_size,
            %activation,
            params = layer.param_count(),
            "created dense layer"
        );
        Ok(layer)
    }

    /// Build a layer from explicit parameters.
    ///
    /// `bias` must be `[1, weight.cols]`.
    pub fn from_tensors(weight: Tensor, bias: Tensor, activation: Activation) -> Result<Self> {
        if weight.elem_count() == 0 {
            bail!("dense weight must be non-empty, got shape {}", weight.shape());
        }
        Self::with_parameters(weight, bias, activation)
    }

    fn with_parameters(weight: Tensor, bias: Tensor, activation: Activation) -> Result<Self> {
        let expected = Shape::new(1, weight.cols());
        if bias.shape() != expected {
            return Err(Error::shape_mismatch("dense bias", expected, bias.shape()));
        }
        Ok(Dense {
            grad_weight: weight.zeros_like()?,
            grad_bias: bias.zeros_like()?,
            weight,
            bias,
            activation,
            cache: None,
        })
    }

    /// Re-draw the weight from the Xavier/Glorot uniform distribution.
    pub fn xavier_init<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        self.weight = init::xavier_uniform(self.input_size(), self.output_size(), rng)?;
        Ok(())
    }

    /// Re-draw the weight from N(0, 2 / in), the He/Kaiming scheme for ReLU.
    pub fn he_init<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        self.weight = init::he_normal(self.input_size(), self.output_size(), rng)?;
        Ok(())
    }

    // Accessors

    pub fn input_size(&self) -> usize {
        self.weight.rows()
    }

    pub fn output_size(&self) -> usize {
        self.weight.cols()
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn weight(&self) -> &Tensor {
        &self.weight
    }

    pub fn bias(&self) -> &Tensor {
        &self.bias
    }

    /// ∂L/∂W from the most recent backward (zeros before the first).
    pub fn grad_weight(&self) -> &Tensor {
        &self.grad_weight
    }

    /// ∂L/∂b from the most recent backward (zeros before the first).
    pub fn grad_bias(&self) -> &Tensor {
        &self.grad_bias
    }

    /// Output of the most recent forward, if any.
    pub fn output(&self) -> Option<&Tensor> {
        self.cache.as_ref().map(|c| &c.output)
    }

    pub fn has_forward_cache(&self) -> bool {
        self.cache.is_some()
    }

    /// Replace the weight; the shape must stay `[in, out]`.
    pub fn set_weight(&mut self, weight: Tensor) -> Result<()> {
        if weight.shape() != self.weight.shape() {
            return Err(Error::shape_mismatch("set_weight", self.weight.shape(), weight.shape()));
        }
        self.weight = weight;
        Ok(())
    }

    /// Replace the bias; the shape must stay `[1, out]`.
    pub fn set_bias(&mut self, bias: Tensor) -> Result<()> {
        if bias.shape() != self.bias.shape() {
            return Err(Error::shape_mismatch("set_bias", self.bias.shape(), bias.shape()));
        }
        self.bias = bias;
        Ok(())
    }

    /// Weight buffer for in-place updates, paired with its gradient.
    pub fn weight_with_grad_mut(&mut self) -> (&mut [f32], &[f32]) {
        (self.weight.data_mut(), self.grad_weight.data())
    }

    /// Bias buffer for in-place updates, paired with its gradient.
    pub fn bias_with_grad_mut(&mut self) -> (&mut [f32], &[f32]) {
        (self.bias.data_mut(), self.grad_bias.data())
    }

    /// Number of learnable scalars: `in * out + out`.
    pub fn param_count(&self) -> usize {
        self.weight.elem_count() + self.bias.cols()
    }

    // Forward / backward

    /// Compute `f(input · W + b)` for a `[batch, in]` input.
    ///
    /// The returned output stays owned by the layer and is replaced by the
    /// next call.
    pub fn forward(&mut self, input: &Tensor) -> Result<&Tensor> {
        if input.cols() != self.input_size() {
            return Err(Error::shape_mismatch(
                "dense forward",
                Shape::new(input.rows(), self.input_size()),
                input.shape(),
            ));
        }
        let pre_activation = input.matmul(&self.weight)?.add_row_broadcast(&self.bias)?;
        let output = self.activation.apply(&pre_activation)?;
        let cache = self.cache.insert(ForwardCache {
            input: input.clone(),
            pre_activation,
            output,
        });
        Ok(&cache.output)
    }

    /// Propagate `grad_output = ∂L/∂y` through the layer.
    ///
    /// Overwrites `grad_weight` / `grad_bias` and returns `∂L/∂x` as a new
    /// `[batch, in]` tensor. Nothing is written if an error is returned.
    pub fn backward(&mut self, grad_output: &Tensor) -> Result<Tensor> {
        let cache = self.cache.as_ref().ok_or(Error::BackwardBeforeForward)?;
        let local =
            self.activation
                .local_gradient(grad_output, &cache.pre_activation, &cache.output)?;

        let grad_weight = cache.input.transpose()?.matmul(&local)?;
        let grad_bias = local.sum_rows()?;
        let grad_input = local.matmul(&self.weight.transpose()?)?;

        trace!(
            batch = grad_output.rows(),
            activation = %self.activation,
            "dense backward"
        );
        self.grad_weight = grad_weight;
        self.grad_bias = grad_bias;
        Ok(grad_input)
    }
}
