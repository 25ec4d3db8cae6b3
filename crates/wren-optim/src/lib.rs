//! # wren-optim
//!
//! Parameter-update rules for Wren dense layers.
//!
//! - [`Sgd`] — plain gradient descent, stateless
//! - [`Adam`] — adaptive moments with bias correction, state per layer position
//!
//! Both implement [`Optimizer`] and are driven the same way:
//!
//! ```ignore
//! model.forward(&x)?;
//! model.backward(&grad)?;
//! optimizer.step(model.layers_mut())?;
//! ```

pub mod adam;
pub mod optimizer;
pub mod sgd;

pub use adam::{Adam, AdamConfig};
pub use optimizer::Optimizer;
pub use sgd::Sgd;
