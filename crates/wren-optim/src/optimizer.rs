// Optimizer trait — the interface every update rule implements
//
// The driver calls step() once per training iteration, after every layer has
// finished its backward pass. The optimizer reads each layer's gradient
// buffers and rewrites its weight and bias in place.
//
// Layers are passed as a slice in network order. Stateful optimizers (Adam)
// key their per-layer state on the POSITION in that slice, so the same
// layers must be passed in the same order every step.

use wren_core::Result;
use wren_nn::Dense;

/// A parameter-update rule for dense layers.
pub trait Optimizer {
    /// Apply one update to every layer using its current gradients.
    fn step(&mut self, layers: &mut [Dense]) -> Result<()>;

    /// The base learning rate.
    fn learning_rate(&self) -> f32;

    /// Change the base learning rate (e.g. from a schedule in the driver).
    fn set_learning_rate(&mut self, lr: f32);
}
