use crate::shape::Shape;

/// All errors that can occur within Wren.
///
/// Every failing operation reports one of these instead of writing a
/// partial result, so "computed zero" and "failed" are always distinguishable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The buffer for a `rows x cols` tensor could not be obtained.
    #[error("failed to allocate tensor of shape [{rows}, {cols}]")]
    Allocation { rows: usize, cols: usize },

    /// Two operands of an elementwise (or copy) operation differ in shape.
    #[error("{op}: shape mismatch, expected {expected}, got {got}")]
    ShapeMismatch {
        op: &'static str,
        expected: Shape,
        got: Shape,
    },

    /// Matrix multiplication dimension mismatch.
    #[error("matmul shape mismatch: [{m}x{k1}] @ [{k2}x{n}], inner dims must match")]
    MatmulShapeMismatch {
        m: usize,
        k1: usize,
        k2: usize,
        n: usize,
    },

    /// Element count mismatch when creating a tensor from a vec.
    #[error("element count mismatch: shape {shape} requires {expected} elements, got {got}")]
    ElementCountMismatch {
        shape: Shape,
        expected: usize,
        got: usize,
    },

    /// `backward()` was called on a layer that has never run `forward()`.
    #[error("backward called before any forward pass")]
    BackwardBeforeForward,

    /// Generic message for cases not covered above.
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an error from any string message.
    pub fn msg(s: impl Into<String>) -> Self {
        Error::Msg(s.into())
    }

    /// Shorthand for a [`Error::ShapeMismatch`].
    pub fn shape_mismatch(op: &'static str, expected: Shape, got: Shape) -> Self {
        Error::ShapeMismatch { op, expected, got }
    }
}

/// Convenience Result type used throughout Wren.
pub type Result<T> = std::result::Result<T, Error>;

/// Macro for early return with a formatted error message.
/// Usage: `bail!("layer size must be non-zero, got {}", n)`
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::Msg(format!($($arg)*)))
    };
}
