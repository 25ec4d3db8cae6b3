use std::fmt;

// Shape — the (rows, cols) pair of a 2-D tensor
//
// Every Wren tensor is a matrix, so a shape is just two numbers. It exists as
// its own type so error messages and comparisons read naturally:
//
//   [4, 2]  — 4 rows (samples), 2 columns (features)
//   [1, 8]  — a row vector, e.g. a bias
//
// Element (i, j) of a row-major buffer lives at offset i * cols + j.

/// Shape of a 2-D tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Shape { rows, cols }
    }

    /// Total number of elements, or `None` if `rows * cols` overflows.
    pub fn checked_elem_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// Total number of elements.
    pub fn elem_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Row-major offset of element (i, j).
    pub fn offset(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }

    /// Shape with rows and columns swapped.
    pub fn transposed(&self) -> Shape {
        Shape::new(self.cols, self.rows)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Shape::new(rows, cols)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.rows, self.cols)
    }
}
