use rand::Rng;

use crate::matmul::matmul_i8;

/// Owned row-major matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Matrix<T> {
    /// Wrap row-major `data`. Panics if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Self {
        assert_eq!(data.len(), rows * cols, "matrix data does not match {rows}x{cols}");
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major flattening.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn row_iter(&self) -> impl Iterator<Item = &[T]> {
        // chunks(0) panics; a 0-column matrix has no elements to yield anyway.
        self.data.chunks(self.cols.max(1))
    }
}

impl Matrix<i8> {
    /// Draw a `rows x cols` matrix uniformly from the inclusive range `[lo, hi]`.
    /// Element (r, c) is the (r * cols + c)-th draw from `rng`.
    pub fn random<R: Rng>(rng: &mut R, rows: usize, cols: usize, lo: i8, hi: i8) -> Self {
        let data = (0..rows * cols).map(|_| rng.gen_range(lo..=hi)).collect();
        Self { rows, cols, data }
    }

    /// Exact product `self x rhs` with i32 accumulation.
    pub fn matmul(&self, rhs: &Matrix<i8>) -> Matrix<i32> {
        assert_eq!(
            self.cols, rhs.rows,
            "inner dimensions differ: {}x{} * {}x{}",
            self.rows, self.cols, rhs.rows, rhs.cols
        );
        let (m, k, n) = (self.rows, self.cols, rhs.cols);
        let mut out = vec![0i32; m * n];
        matmul_i8(&self.data, &rhs.data, &mut out, m, k, n);
        Matrix { rows: m, cols: n, data: out }
    }
}
