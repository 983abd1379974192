//! Dense linear system storage
//!
//! A [`LinearSystem`] owns the coefficient matrix, the right-hand side and
//! the permutation trace. Row swaps always move all three together.

use crate::error::{GaussError, Result};
use crate::parallel::{Schedule, WorkerPool};
use ndarray::{Array1, Array2, ArrayView1, ArrayViewMut1, Axis, Zip};

/// Dense `n x n` system `A x = b` with a permutation trace
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    matrix: Array2<f64>,
    rhs: Array1<f64>,
    trace: Vec<usize>,
}

/// Coefficient at `(row, col)` of the generated benchmark system
#[inline]
fn generated_entry(row: usize, col: usize) -> f64 {
    if col < row {
        2.0 * (col + 1) as f64
    } else {
        2.0 * (row + 1) as f64
    }
}

fn fill_generated_row(row: usize, mut values: ArrayViewMut1<f64>, rhs: &mut f64) {
    for (col, value) in values.iter_mut().enumerate() {
        *value = generated_entry(row, col);
    }
    *rhs = row as f64;
}

impl LinearSystem {
    /// Build the reproducible benchmark system of dimension `n`
    ///
    /// Row `i`, column `j` holds `2(j+1)` below the diagonal and `2(i+1)`
    /// elsewhere; `b[i] = i`. For `n = 3`:
    ///
    /// ```text
    /// [2 2 2]       [0]
    /// [2 4 4]  b =  [1]
    /// [2 4 6]       [2]
    /// ```
    pub fn generate(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(GaussError::EmptySystem);
        }

        let matrix = Array2::from_shape_fn((n, n), |(i, j)| generated_entry(i, j));
        let rhs = Array1::from_iter((0..n).map(|i| i as f64));

        Ok(Self {
            matrix,
            rhs,
            trace: (0..n).collect(),
        })
    }

    /// Same system as [`LinearSystem::generate`], rows filled by the pool
    pub fn generate_with(n: usize, pool: &WorkerPool) -> Result<Self> {
        if n == 0 {
            return Err(GaussError::EmptySystem);
        }

        let mut matrix = Array2::<f64>::zeros((n, n));
        let mut rhs = Array1::<f64>::zeros(n);

        let rows = matrix
            .outer_iter_mut()
            .zip(rhs.iter_mut())
            .enumerate()
            .map(|(i, (values, b))| (i, values, b));
        pool.dispatch(Schedule::Block, rows, |(i, values, b)| {
            fill_generated_row(i, values, b)
        });

        Ok(Self {
            matrix,
            rhs,
            trace: (0..n).collect(),
        })
    }

    /// Build a system from an explicit matrix and right-hand side
    pub fn from_parts(matrix: Array2<f64>, rhs: Array1<f64>) -> Result<Self> {
        let (rows, cols) = matrix.dim();
        if rows == 0 {
            return Err(GaussError::EmptySystem);
        }
        if rows != cols {
            return Err(GaussError::NotSquare { rows, cols });
        }
        if rhs.len() != rows {
            return Err(GaussError::DimensionMismatch {
                expected: rows,
                got: rhs.len(),
            });
        }

        Ok(Self {
            matrix,
            rhs,
            trace: (0..rows).collect(),
        })
    }

    /// Matrix dimension
    pub fn dim(&self) -> usize {
        self.rhs.len()
    }

    /// Coefficient matrix
    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// Right-hand side
    pub fn rhs(&self) -> &Array1<f64> {
        &self.rhs
    }

    /// Original row index currently stored at each physical row
    pub fn permutation(&self) -> &[usize] {
        &self.trace
    }

    /// Exchange rows `a` and `b` of the matrix, the right-hand side and the trace
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }

        let (first, second) = if a < b { (a, b) } else { (b, a) };
        let (mut head, mut tail) = self.matrix.view_mut().split_at(Axis(0), second);
        Zip::from(head.row_mut(first))
            .and(tail.row_mut(0))
            .for_each(std::mem::swap);
        self.rhs.swap(a, b);
        self.trace.swap(a, b);
    }

    /// Reorder rows so that physical row `p` holds row `trace[p]` of `self`
    pub fn permuted(&self, trace: &[usize]) -> Result<Self> {
        let n = self.dim();
        if trace.len() != n {
            return Err(GaussError::DimensionMismatch {
                expected: n,
                got: trace.len(),
            });
        }

        Ok(Self {
            matrix: self.matrix.select(Axis(0), trace),
            rhs: self.rhs.select(Axis(0), trace),
            trace: trace.iter().map(|&p| self.trace[p]).collect(),
        })
    }

    /// Relative residual `||A x - b||_inf / max(||b||_inf, 1)`
    pub fn residual(&self, x: ArrayView1<f64>) -> Result<f64> {
        if x.len() != self.dim() {
            return Err(GaussError::DimensionMismatch {
                expected: self.dim(),
                got: x.len(),
            });
        }

        let ax = self.matrix.dot(&x);
        let error = ax
            .iter()
            .zip(self.rhs.iter())
            .map(|(lhs, b)| (lhs - b).abs())
            .fold(0.0_f64, f64::max);
        let scale = self.rhs.iter().map(|b| b.abs()).fold(1.0_f64, f64::max);

        Ok(error / scale)
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut Array2<f64>, &mut Array1<f64>) {
        (&mut self.matrix, &mut self.rhs)
    }
}
