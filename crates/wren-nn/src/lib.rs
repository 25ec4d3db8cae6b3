//! # wren-nn
//!
//! Dense layers, activations, loss functions, and metrics for Wren.
//!
//! 1. **Dense** — fully connected `y = f(x·W + b)` with a hand-derived
//!    backward pass and cached forward state
//! 2. **Activation** — identity, ReLU, sigmoid as one closed enum
//! 3. **init** — Xavier/Glorot uniform and He normal weight initializers
//! 4. **Loss functions** — MSE and binary cross-entropy with their gradients
//! 5. **Sequential** — ordered chain of dense layers
//! 6. **metrics** — thresholded binary accuracy
//!
//! Layers own their parameters and gradient buffers; optimizers in
//! `wren-optim` update them in place.

pub mod activation;
pub mod dense;
pub mod init;
pub mod loss;
pub mod metrics;
pub mod sequential;

pub use activation::Activation;
pub use dense::Dense;
pub use loss::{bce_derivative, bce_loss, mse_derivative, mse_loss, Loss, BCE_EPSILON};
pub use metrics::{accuracy, binary_accuracy, threshold_classes};
pub use sequential::Sequential;
