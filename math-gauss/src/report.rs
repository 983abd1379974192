//! Text output and solution verification
//!
//! Matrix and vector dumps use fixed-point `{:6.5}` fields, verification
//! lines pair `b[i]` (`{:6.5}`) with `x[i]` (`{:5.5}`).

use crate::backsub::Solution;
use crate::elimination::EliminatedSystem;
use crate::error::Result;
use crate::system::LinearSystem;
use ndarray::{Array2, ArrayView1};
use std::io::{self, Write};

/// Default relative tolerance for [`verify_solution`]
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Write the matrix, one row per line
pub fn write_matrix<W: Write>(out: &mut W, matrix: &Array2<f64>) -> io::Result<()> {
    writeln!(out, "\nPrinting matrix:")?;
    for row in matrix.outer_iter() {
        for value in row.iter() {
            write!(out, "{:6.5} ", value)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write a vector on a single line
pub fn write_array<W: Write>(out: &mut W, values: ArrayView1<f64>) -> io::Result<()> {
    writeln!(out, "\nPrinting array:")?;
    for value in values.iter() {
        write!(out, "{:6.5} ", value)?;
    }
    writeln!(out)
}

/// Write one `b[i] x[i]` line per row
pub fn write_verification<W: Write>(
    out: &mut W,
    rhs: ArrayView1<f64>,
    solution: &Solution,
) -> io::Result<()> {
    for (b, x) in rhs.iter().zip(solution.x.iter()) {
        writeln!(out, "{:6.5} {:5.5}", b, x)?;
    }
    Ok(())
}

/// Residuals of a solution against the original system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verification {
    /// Relative residual against the system in its original row order
    pub residual: f64,
    /// Relative residual against the original rows reordered by the
    /// permutation trace of the eliminated system
    pub permuted_residual: f64,
    /// Tolerance both residuals were checked against
    pub tolerance: f64,
}

impl Verification {
    /// Both residuals are within tolerance
    pub fn passed(&self) -> bool {
        self.residual <= self.tolerance && self.permuted_residual <= self.tolerance
    }
}

/// Check `A x = b` for the original system, in both row orders
pub fn verify_solution(
    original: &LinearSystem,
    eliminated: &EliminatedSystem,
    solution: &Solution,
    tolerance: f64,
) -> Result<Verification> {
    let residual = original.residual(solution.x.view())?;
    let permuted = original.permuted(eliminated.system().permutation())?;
    let permuted_residual = permuted.residual(solution.x.view())?;

    log::debug!(
        "Verification: residual {:.3e}, permuted residual {:.3e}",
        residual,
        permuted_residual
    );

    Ok(Verification {
        residual,
        permuted_residual,
        tolerance,
    })
}
