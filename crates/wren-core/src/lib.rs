//! # wren-core
//!
//! Core tensor primitives, errors, and random sources for Wren.
//!
//! This crate provides:
//! - [`Tensor`] — dense, row-major 2-D `f32` matrix with elementwise,
//!   matrix, and activation operations
//! - [`Shape`] — the `(rows, cols)` pair
//! - [`Error`] / [`Result`] — the error type shared by every Wren crate
//! - [`rng`] — helpers for building explicitly-seeded random sources
// - Shape: rows x cols of a matrix
// - Tensor: the only numeric container; owned, never shared
// - rng: randomness is always passed in, never global

pub mod error;
pub mod rng;
pub mod shape;
pub mod tensor;

pub use error::{Error, Result};
pub use shape::Shape;
pub use tensor::Tensor;
