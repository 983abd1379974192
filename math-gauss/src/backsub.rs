//! Back substitution on the reduced system

use crate::elimination::EliminatedSystem;
use ndarray::Array1;

/// Solution of the linear system
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Solution vector
    pub x: Array1<f64>,
}

/// Solve the unit upper triangular system left by forward elimination
///
/// `x[n-1] = b[n-1]`, then for `i` from `n-2` down to `0`:
/// `x[i] = b[i] - sum_{j>i} m[i][j] * x[j]`, accumulated from the last
/// column toward the diagonal.
pub fn back_substitute(eliminated: &EliminatedSystem) -> Solution {
    let system = eliminated.system();
    let matrix = system.matrix();
    let rhs = system.rhs();
    let n = system.dim();

    let mut x = Array1::<f64>::zeros(n);
    x[n - 1] = rhs[n - 1];
    for i in (0..n - 1).rev() {
        let mut value = rhs[i];
        for j in (i + 1..n).rev() {
            value -= matrix[[i, j]] * x[j];
        }
        x[i] = value;
    }

    Solution { x }
}
