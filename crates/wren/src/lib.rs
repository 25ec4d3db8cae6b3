//! # Wren
//!
//! A minimal feed-forward neural-network training engine built from scratch
//! in Rust.
//!
//! This is the top-level facade crate that re-exports everything you need.
//!
//! ## Usage
//!
//! ```rust
//! use wren::prelude::*;
//! ```
//!
//! ## Architecture
//!
//! | Crate | Purpose |
//! |-------|---------|
//! | `wren-core` | Tensor, Shape, Error, seeded random sources |
//! | `wren-nn` | Dense layer, activations, initializers, losses, Sequential, metrics |
//! | `wren-optim` | Optimizer trait, SGD, Adam |
//!
//! ## Training loop
//!
//! ```rust
//! use wren::prelude::*;
//!
//! # fn main() -> wren::Result<()> {
//! let mut rng = rng::seeded(7);
//! let mut model = Sequential::new()
//!     .add(Dense::new(2, 4, Activation::Relu, &mut rng)?)
//!     .add(Dense::new(4, 1, Activation::Sigmoid, &mut rng)?);
//! let mut optimizer = Adam::new(0.1);
//!
//! let x = Tensor::from_vec(vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0], 4, 2)?;
//! let y = Tensor::from_vec(vec![0.0, 1.0, 1.0, 0.0], 4, 1)?;
//!
//! for _ in 0..10 {
//!     let pred = model.forward(&x)?.clone();
//!     let grad = Loss::BinaryCrossEntropy.gradient(&pred, &y)?;
//!     model.backward(&grad)?;
//!     optimizer.step(model.layers_mut())?;
//! }
//! # Ok(())
//! # }
//! ```

/// Re-export core types.
pub use wren_core::{bail, rng, Error, Result, Shape, Tensor};

/// Re-export layers, losses, and metrics.
pub mod nn {
    pub use wren_nn::*;
}

/// Re-export optimizers.
pub mod optim {
    pub use wren_optim::*;
}

/// Prelude: import this for the most common types.
pub mod prelude {
    pub use crate::nn::{
        bce_derivative, bce_loss, binary_accuracy, mse_derivative, mse_loss, threshold_classes,
    };
    pub use crate::nn::{Activation, Dense, Loss, Sequential};
    pub use crate::optim::{Adam, AdamConfig, Optimizer, Sgd};
    pub use crate::{rng, Error, Result, Shape, Tensor};
}
