use std::fmt;

use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::Normal;

use crate::error::{Error, Result};
use crate::shape::Shape;

// Tensor — The fundamental data structure
//
// A Tensor is a dense 2-D matrix of f32 values stored row-major in one
// contiguous buffer: element (i, j) lives at offset i * cols + j. Rows are
// samples, columns are features, so a batch of four 2-feature inputs is a
// [4, 2] tensor and a bias is a [1, out] row.
//
// OWNERSHIP:
//
//   A Tensor owns its buffer outright. Clone is a deep copy, and there are no
//   views or shared storage, so a mutation through `&mut Tensor` can never be
//   observed by another holder. Dropping the tensor releases the buffer.
//
// SHAPE CONTRACT:
//
//   - elementwise ops (add, sub, mul, copy) need identical shapes
//   - matmul needs a.cols == b.rows
//   - the `_into` variants also need `out` pre-sized to the result shape
//
//   Any violation returns Err and leaves every output untouched. Nothing is
//   ever resized implicitly.

/// A dense, row-major, two-dimensional `f32` buffer.
///
/// # Example
/// ```
/// use wren_core::Tensor;
///
/// let a = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3)?;
/// let b = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 2)?;
/// let c = a.matmul(&b)?;
/// assert_eq!(c.data(), &[22.0, 28.0, 49.0, 64.0]);
/// # Ok::<(), wren_core::Error>(())
/// ```
#[derive(Clone, PartialEq)]
pub struct Tensor {
    data: Vec<f32>,
    shape: Shape,
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor(shape={}, data={:?})", self.shape, self.data)
    }
}

/// Prints one row per line with four decimals, e.g.
///
/// ```text
/// Tensor [2, 2]
///   [  1.0000,   2.0000]
///   [  3.0000,   4.0000]
/// ```
impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tensor {}", self.shape)?;
        for i in 0..self.rows() {
            let row: Vec<String> = self.row(i).iter().map(|v| format!("{v:8.4}")).collect();
            writeln!(f, "  [{}]", row.join(", "))?;
        }
        Ok(())
    }
}

impl Tensor {
    // Constructors

    /// Create a zero-filled tensor of shape `rows x cols`.
    ///
    /// Fails with [`Error::Allocation`] if `rows * cols` overflows or the
    /// buffer cannot be reserved.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Self::full(rows, cols, 0.0)
    }

    /// Alias of [`Tensor::new`].
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Self::new(rows, cols)
    }

    /// A tensor with every element set to 1.
    pub fn ones(rows: usize, cols: usize) -> Result<Self> {
        Self::full(rows, cols, 1.0)
    }

    /// A tensor with every element set to `value`.
    pub fn full(rows: usize, cols: usize, value: f32) -> Result<Self> {
        let shape = Shape::new(rows, cols);
        let len = shape
            .checked_elem_count()
            .ok_or(Error::Allocation { rows, cols })?;
        let mut data = Vec::new();
        if data.try_reserve_exact(len).is_err() {
            tracing::warn!(rows, cols, "tensor allocation failed");
            return Err(Error::Allocation { rows, cols });
        }
        data.resize(len, value);
        Ok(Tensor { data, shape })
    }

    /// Wrap an existing row-major buffer.
    pub fn from_vec(data: Vec<f32>, rows: usize, cols: usize) -> Result<Self> {
        let shape = Shape::new(rows, cols);
        match shape.checked_elem_count() {
            Some(expected) if expected == data.len() => Ok(Tensor { data, shape }),
            Some(expected) => Err(Error::ElementCountMismatch {
                shape,
                expected,
                got: data.len(),
            }),
            None => Err(Error::Allocation { rows, cols }),
        }
    }

    /// Copy a row-major slice into a new tensor.
    pub fn from_slice(data: &[f32], rows: usize, cols: usize) -> Result<Self> {
        Self::from_vec(data.to_vec(), rows, cols)
    }

    /// A zero tensor with the same shape as `self`.
    pub fn zeros_like(&self) -> Result<Self> {
        Self::new(self.rows(), self.cols())
    }

    /// A tensor of i.i.d. uniform samples in `[min, max)`.
    pub fn random<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        min: f32,
        max: f32,
        rng: &mut R,
    ) -> Result<Self> {
        let mut t = Self::new(rows, cols)?;
        t.fill_random(min, max, rng)?;
        Ok(t)
    }

    // Accessors

    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    pub fn cols(&self) -> usize {
        self.shape.cols
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Total number of elements (`rows * cols`).
    pub fn elem_count(&self) -> usize {
        self.data.len()
    }

    /// The raw row-major buffer.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable access to the raw buffer. Its length cannot change.
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consume the tensor and return its buffer.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Element (i, j), or `None` when out of bounds.
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i < self.rows() && j < self.cols() {
            Some(self.data[self.shape.offset(i, j)])
        } else {
            None
        }
    }

    /// Set element (i, j).
    pub fn set(&mut self, i: usize, j: usize, value: f32) -> Result<()> {
        if i >= self.rows() || j >= self.cols() {
            return Err(Error::msg(format!(
                "index ({i}, {j}) out of bounds for tensor of shape {}",
                self.shape
            )));
        }
        let off = self.shape.offset(i, j);
        self.data[off] = value;
        Ok(())
    }

    /// Row `i` as a slice. Panics if `i >= rows`, like slice indexing.
    pub fn row(&self, i: usize) -> &[f32] {
        let start = i * self.cols();
        &self.data[start..start + self.cols()]
    }

    fn check_same_shape(&self, other: &Tensor, op: &'static str) -> Result<()> {
        if self.shape != other.shape {
            return Err(Error::shape_mismatch(op, self.shape, other.shape));
        }
        Ok(())
    }

    // In-place fills

    /// Set every element to `value`.
    pub fn fill(&mut self, value: f32) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    /// Set every element to 0.
    pub fn zero(&mut self) {
        self.fill(0.0);
    }

    /// Set every element to 1.
    pub fn fill_ones(&mut self) {
        self.fill(1.0);
    }

    /// Overwrite every element with an i.i.d. uniform draw from `[min, max)`.
    ///
    /// `min == max` fills with that constant. An inverted range, a non-finite
    /// bound, or a width `max - min` that overflows f32 is rejected without
    /// touching the buffer.
    pub fn fill_random<R: Rng + ?Sized>(&mut self, min: f32, max: f32, rng: &mut R) -> Result<()> {
        if min == max {
            self.fill(min);
            return Ok(());
        }
        if !(min.is_finite() && max.is_finite() && min < max && (max - min).is_finite()) {
            return Err(Error::msg(format!(
                "fill_random: invalid range [{min}, {max})"
            )));
        }
        let dist = Uniform::new(min, max);
        for x in self.data.iter_mut() {
            *x = dist.sample(rng);
        }
        Ok(())
    }

    /// Overwrite every element with a draw from N(mean, std²).
    pub fn fill_normal<R: Rng + ?Sized>(&mut self, mean: f32, std: f32, rng: &mut R) -> Result<()> {
        let dist = Normal::new(mean, std)
            .map_err(|e| Error::msg(format!("fill_normal: {e} (mean={mean}, std={std})")))?;
        for x in self.data.iter_mut() {
            *x = dist.sample(rng);
        }
        Ok(())
    }

    /// Overwrite this tensor's buffer with `src`'s.
    ///
    /// Shapes must match; on mismatch `self` is left unmodified.
    pub fn copy_from(&mut self, src: &Tensor) -> Result<()> {
        self.check_same_shape(src, "copy")?;
        self.data.copy_from_slice(&src.data);
        Ok(())
    }

    /// Multiply every element by `scalar` in place.
    pub fn scale(&mut self, scalar: f32) {
        self.data.iter_mut().for_each(|x| *x *= scalar);
    }

    // Elementwise binary ops

    fn zip_into(
        &self,
        other: &Tensor,
        out: &mut Tensor,
        op: &'static str,
        f: impl Fn(f32, f32) -> f32,
    ) -> Result<()> {
        self.check_same_shape(other, op)?;
        self.check_same_shape(out, op)?;
        for ((o, &a), &b) in out.data.iter_mut().zip(&self.data).zip(&other.data) {
            *o = f(a, b);
        }
        Ok(())
    }

    /// `out = self + other`, elementwise.
    pub fn add_into(&self, other: &Tensor, out: &mut Tensor) -> Result<()> {
        self.zip_into(other, out, "add", |a, b| a + b)
    }

    /// `out = self - other`, elementwise.
    pub fn sub_into(&self, other: &Tensor, out: &mut Tensor) -> Result<()> {
        self.zip_into(other, out, "sub", |a, b| a - b)
    }

    /// `out = self * other`, elementwise (Hadamard product).
    pub fn mul_into(&self, other: &Tensor, out: &mut Tensor) -> Result<()> {
        self.zip_into(other, out, "mul", |a, b| a * b)
    }

    /// Elementwise sum as a new tensor.
    pub fn add(&self, other: &Tensor) -> Result<Tensor> {
        let mut out = self.zeros_like()?;
        self.add_into(other, &mut out)?;
        Ok(out)
    }

    /// Elementwise difference as a new tensor.
    pub fn sub(&self, other: &Tensor) -> Result<Tensor> {
        let mut out = self.zeros_like()?;
        self.sub_into(other, &mut out)?;
        Ok(out)
    }

    /// Elementwise product as a new tensor.
    pub fn mul(&self, other: &Tensor) -> Result<Tensor> {
        let mut out = self.zeros_like()?;
        self.mul_into(other, &mut out)?;
        Ok(out)
    }

    // Matrix ops

    /// Dense matrix product `self · other`.
    ///
    /// `[m, k] · [k, n] → [m, n]`, computed with the plain triple loop.
    pub fn matmul(&self, other: &Tensor) -> Result<Tensor> {
        let (m, k, n) = (self.rows(), self.cols(), other.cols());
        if k != other.rows() {
            return Err(Error::MatmulShapeMismatch {
                m,
                k1: k,
                k2: other.rows(),
                n,
            });
        }
        let mut out = Tensor::new(m, n)?;
        for i in 0..m {
            for j in 0..n {
                let mut sum = 0.0f32;
                for p in 0..k {
                    sum += self.data[i * k + p] * other.data[p * n + j];
                }
                out.data[i * n + j] = sum;
            }
        }
        Ok(out)
    }

    /// A new `[cols, rows]` tensor with `out(j, i) = self(i, j)`.
    pub fn transpose(&self) -> Result<Tensor> {
        let (rows, cols) = (self.rows(), self.cols());
        let mut out = Tensor::new(cols, rows)?;
        for i in 0..rows {
            for j in 0..cols {
                out.data[j * rows + i] = self.data[i * cols + j];
            }
        }
        Ok(out)
    }

    /// Add a `[1, cols]` row to every row of `self`.
    pub fn add_row_broadcast(&self, row: &Tensor) -> Result<Tensor> {
        let expected = Shape::new(1, self.cols());
        if row.shape != expected {
            return Err(Error::shape_mismatch("add_row_broadcast", expected, row.shape));
        }
        let mut out = self.clone();
        for chunk in out.data.chunks_mut(self.cols().max(1)) {
            for (x, &b) in chunk.iter_mut().zip(&row.data) {
                *x += b;
            }
        }
        Ok(out)
    }

    /// Column-wise sum across rows: `[rows, cols] → [1, cols]`.
    pub fn sum_rows(&self) -> Result<Tensor> {
        let mut out = Tensor::new(1, self.cols())?;
        for chunk in self.data.chunks(self.cols().max(1)) {
            for (acc, &x) in out.data.iter_mut().zip(chunk) {
                *acc += x;
            }
        }
        Ok(out)
    }

    /// Sum of all elements.
    pub fn sum_all(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Mean of all elements (0 for an empty tensor).
    pub fn mean_all(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.sum_all() / self.data.len() as f32
    }

    /// Largest absolute elementwise difference to `other`.
    pub fn max_abs_diff(&self, other: &Tensor) -> Result<f32> {
        self.check_same_shape(other, "max_abs_diff")?;
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max))
    }

    // Activations
    //
    // Each has an `_into` form writing a pre-sized output buffer and an
    // allocating form. The derivatives deliberately read different buffers:
    //   relu_derivative    — evaluated on PRE-activation values x
    //   sigmoid_derivative — evaluated on the activated OUTPUT s = σ(x)

    fn map_into(&self, out: &mut Tensor, op: &'static str, f: impl Fn(f32) -> f32) -> Result<()> {
        self.check_same_shape(out, op)?;
        for (o, &x) in out.data.iter_mut().zip(&self.data) {
            *o = f(x);
        }
        Ok(())
    }

    fn map(&self, op: &'static str, f: impl Fn(f32) -> f32) -> Result<Tensor> {
        let mut out = self.zeros_like()?;
        self.map_into(&mut out, op, f)?;
        Ok(out)
    }

    /// `out = max(0, self)`.
    pub fn relu_into(&self, out: &mut Tensor) -> Result<()> {
        self.map_into(out, "relu", relu)
    }

    /// `out = 1` where `self > 0`, else `0`.
    pub fn relu_derivative_into(&self, out: &mut Tensor) -> Result<()> {
        self.map_into(out, "relu_derivative", relu_derivative)
    }

    /// `out = 1 / (1 + e^-self)`.
    pub fn sigmoid_into(&self, out: &mut Tensor) -> Result<()> {
        self.map_into(out, "sigmoid", sigmoid)
    }

    /// `out = self * (1 - self)`, where `self` is already a sigmoid output.
    pub fn sigmoid_derivative_into(&self, out: &mut Tensor) -> Result<()> {
        self.map_into(out, "sigmoid_derivative", sigmoid_derivative)
    }

    pub fn relu(&self) -> Result<Tensor> {
        self.map("relu", relu)
    }

    pub fn relu_derivative(&self) -> Result<Tensor> {
        self.map("relu_derivative", relu_derivative)
    }

    pub fn sigmoid(&self) -> Result<Tensor> {
        self.map("sigmoid", sigmoid)
    }

    pub fn sigmoid_derivative(&self) -> Result<Tensor> {
        self.map("sigmoid_derivative", sigmoid_derivative)
    }
}

fn relu(x: f32) -> f32 {
    x.max(0.0)
}

fn relu_derivative(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else {
        0.0
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

fn sigmoid_derivative(s: f32) -> f32 {
    s * (1.0 - s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;
    use approx::assert_abs_diff_eq;

    fn t(data: &[f32], rows: usize, cols: usize) -> Tensor {
        Tensor::from_slice(data, rows, cols).unwrap()
    }

    #[test]
    fn test_new_is_zero_filled() {
        let z = Tensor::new(3, 4).unwrap();
        assert_eq!(z.rows(), 3);
        assert_eq!(z.cols(), 4);
        assert_eq!(z.elem_count(), 12);
        assert!(z.data().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_new_overflow_is_allocation_error() {
        let err = Tensor::new(usize::MAX, 2).unwrap_err();
        assert_eq!(
            err,
            Error::Allocation {
                rows: usize::MAX,
                cols: 2
            }
        );
    }

    #[test]
    fn test_from_vec_checks_length() {
        let err = Tensor::from_vec(vec![1.0; 5], 2, 3).unwrap_err();
        assert!(matches!(
            err,
            Error::ElementCountMismatch {
                expected: 6,
                got: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_fill_zero_ones() {
        let mut a = Tensor::new(2, 2).unwrap();
        a.fill(5.0);
        assert!(a.data().iter().all(|&x| x == 5.0));
        a.fill_ones();
        assert!(a.data().iter().all(|&x| x == 1.0));
        a.zero();
        assert!(a.data().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_fill_random_stays_in_range() {
        let mut rng = seeded(3);
        let a = Tensor::random(16, 16, -0.5, 0.25, &mut rng).unwrap();
        assert!(a.data().iter().all(|&x| (-0.5..0.25).contains(&x)));
        // not all equal
        assert!(a.data().iter().any(|&x| x != a.data()[0]));
    }

    #[test]
    fn test_fill_random_is_reproducible() {
        let a = Tensor::random(4, 4, -1.0, 1.0, &mut seeded(11)).unwrap();
        let b = Tensor::random(4, 4, -1.0, 1.0, &mut seeded(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fill_random_rejects_inverted_range() {
        let mut a = Tensor::full(2, 2, 9.0).unwrap();
        assert!(a.fill_random(1.0, -1.0, &mut seeded(0)).is_err());
        assert!(a.data().iter().all(|&x| x == 9.0));
    }

    #[test]
    fn test_fill_random_rejects_overflowing_width() {
        let mut a = Tensor::full(2, 2, 9.0).unwrap();
        let err = a.fill_random(-f32::MAX, f32::MAX, &mut seeded(0)).unwrap_err();
        assert!(matches!(err, Error::Msg(_)));
        assert!(a.data().iter().all(|&x| x == 9.0));
        assert!(Tensor::random(1, 3, -f32::MAX, f32::MAX, &mut seeded(0)).is_err());
    }

    #[test]
    fn test_fill_normal_moments() {
        let mut a = Tensor::new(100, 100).unwrap();
        a.fill_normal(0.0, 2.0, &mut seeded(5)).unwrap();
        let mean = a.mean_all();
        let var = a.data().iter().map(|x| (x - mean) * (x - mean)).sum::<f32>()
            / a.elem_count() as f32;
        assert!(mean.abs() < 0.1, "mean {mean}");
        assert!((var.sqrt() - 2.0).abs() < 0.1, "std {}", var.sqrt());
    }

    #[test]
    fn test_copy_roundtrip() {
        let src = Tensor::random(3, 5, -10.0, 10.0, &mut seeded(1)).unwrap();
        let mut dst = src.clone();
        dst.copy_from(&src).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn test_copy_from_mismatch_leaves_dst() {
        let mut dst = Tensor::full(2, 3, 7.0).unwrap();
        let src = Tensor::ones(3, 2).unwrap();
        let err = dst.copy_from(&src).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { op: "copy", .. }));
        assert!(dst.data().iter().all(|&x| x == 7.0));
    }

    #[test]
    fn test_add_sub_mul() {
        let a = t(&[1.0, 2.0, 3.0, 4.0], 2, 2);
        let b = t(&[10.0, 20.0, 30.0, 40.0], 2, 2);
        assert_eq!(a.add(&b).unwrap().data(), &[11.0, 22.0, 33.0, 44.0]);
        assert_eq!(b.sub(&a).unwrap().data(), &[9.0, 18.0, 27.0, 36.0]);
        assert_eq!(a.mul(&b).unwrap().data(), &[10.0, 40.0, 90.0, 160.0]);
    }

    #[test]
    fn test_add_into_mismatch_no_write() {
        let a = Tensor::ones(2, 2).unwrap();
        let b = Tensor::ones(2, 3).unwrap();
        let mut out = Tensor::full(2, 2, -1.0).unwrap();
        assert!(a.add_into(&b, &mut out).is_err());
        assert!(out.data().iter().all(|&x| x == -1.0));

        // wrong output shape is also rejected
        let mut small = Tensor::full(1, 2, -1.0).unwrap();
        assert!(a.add_into(&a, &mut small).is_err());
        assert!(small.data().iter().all(|&x| x == -1.0));
    }

    #[test]
    fn test_scale() {
        let mut a = t(&[1.0, -2.0, 3.0], 1, 3);
        a.scale(-2.0);
        assert_eq!(a.data(), &[-2.0, 4.0, -6.0]);
    }

    #[test]
    fn test_matmul_values() {
        let a = t(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
        let b = t(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 2);
        let c = a.matmul(&b).unwrap();
        assert_eq!(c.shape(), Shape::new(2, 2));
        assert_eq!(c.data(), &[22.0, 28.0, 49.0, 64.0]);
    }

    #[test]
    fn test_matmul_inner_dim_mismatch() {
        let a = Tensor::ones(2, 3).unwrap();
        let b = Tensor::ones(2, 3).unwrap();
        assert_eq!(
            a.matmul(&b).unwrap_err(),
            Error::MatmulShapeMismatch {
                m: 2,
                k1: 3,
                k2: 2,
                n: 3
            }
        );
    }

    #[test]
    fn test_transpose() {
        let a = t(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
        let b = a.transpose().unwrap();
        assert_eq!(b.shape(), Shape::new(3, 2));
        assert_eq!(b.data(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert_eq!(b.transpose().unwrap(), a);
    }

    #[test]
    fn test_matmul_transpose_identity() {
        // (A·B)ᵀ == Bᵀ·Aᵀ over a spread of shapes
        let mut rng = seeded(42);
        for &(m, k, n) in &[(1, 1, 1), (2, 3, 4), (5, 1, 3), (4, 4, 4), (7, 2, 6)] {
            let a = Tensor::random(m, k, -3.0, 3.0, &mut rng).unwrap();
            let b = Tensor::random(k, n, -3.0, 3.0, &mut rng).unwrap();
            let lhs = b
                .transpose()
                .unwrap()
                .matmul(&a.transpose().unwrap())
                .unwrap();
            let rhs = a.matmul(&b).unwrap().transpose().unwrap();
            assert_eq!(lhs.shape(), rhs.shape());
            assert!(lhs.max_abs_diff(&rhs).unwrap() < 1e-5);
        }
    }

    #[test]
    fn test_add_row_broadcast_and_sum_rows() {
        let x = t(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 2);
        let b = t(&[10.0, -1.0], 1, 2);
        let y = x.add_row_broadcast(&b).unwrap();
        assert_eq!(y.data(), &[11.0, 1.0, 13.0, 3.0, 15.0, 5.0]);
        assert_eq!(x.sum_rows().unwrap().data(), &[9.0, 12.0]);
        assert!(x.add_row_broadcast(&x).is_err());
    }

    #[test]
    fn test_relu() {
        let x = t(&[-2.0, -1.0, 1.0, 2.0], 1, 4);
        assert_eq!(x.relu().unwrap().data(), &[0.0, 0.0, 1.0, 2.0]);
        assert_eq!(x.relu_derivative().unwrap().data(), &[0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_relu_derivative_at_zero_is_zero() {
        let x = t(&[0.0], 1, 1);
        assert_eq!(x.relu_derivative().unwrap().data(), &[0.0]);
    }

    #[test]
    fn test_relu_into_requires_sized_output() {
        let x = t(&[-1.0, 1.0], 1, 2);
        let mut out = Tensor::full(2, 1, 3.0).unwrap();
        assert!(x.relu_into(&mut out).is_err());
        assert_eq!(out.data(), &[3.0, 3.0]);
    }

    #[test]
    fn test_sigmoid_values() {
        let x = t(&[0.0, 2.0, -2.0], 1, 3);
        let s = x.sigmoid().unwrap();
        assert_abs_diff_eq!(s.data()[0], 0.5, epsilon = 1e-7);
        assert_abs_diff_eq!(s.data()[1], 0.880_797, epsilon = 1e-5);
        assert_abs_diff_eq!(s.data()[1] + s.data()[2], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_sigmoid_derivative_reads_output() {
        let x = t(&[-4.0, -1.0, 0.0, 0.5, 3.0], 1, 5);
        let s = x.sigmoid().unwrap();
        let d = s.sigmoid_derivative().unwrap();
        for (&si, &di) in s.data().iter().zip(d.data()) {
            assert_abs_diff_eq!(di, si * (1.0 - si), epsilon = 1e-7);
        }
        assert_abs_diff_eq!(d.data()[2], 0.25, epsilon = 1e-7);
    }

    #[test]
    fn test_get_set() {
        let mut a = Tensor::new(2, 3).unwrap();
        a.set(1, 2, 4.5).unwrap();
        assert_eq!(a.get(1, 2), Some(4.5));
        assert_eq!(a.data()[5], 4.5);
        assert_eq!(a.get(2, 0), None);
        assert!(a.set(0, 3, 1.0).is_err());
    }

    #[test]
    fn test_display() {
        let a = t(&[1.0, 2.0, 3.0, 4.0], 2, 2);
        let s = format!("{a}");
        assert!(s.starts_with("Tensor [2, 2]"));
        assert!(s.contains("1.0000"));
        assert_eq!(s.lines().count(), 3);
    }
}
