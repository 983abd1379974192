//! Pivot selection and row normalization
//!
//! The first row (from the diagonal downward) with a nonzero entry in the
//! active column becomes the pivot. This is first-match pivoting, not
//! maximum-magnitude pivoting.

use crate::error::{GaussError, Result};
use crate::system::LinearSystem;
use ndarray::s;

/// First row `>= step` whose entry in column `step` is nonzero
pub fn find_pivot_row(system: &LinearSystem, step: usize) -> Option<usize> {
    system
        .matrix()
        .column(step)
        .iter()
        .enumerate()
        .skip(step)
        .find(|(_, value)| **value != 0.0)
        .map(|(row, _)| row)
}

/// Install a pivot for `step` and scale its row to a unit leading coefficient
///
/// Returns the physical row the pivot was taken from. On
/// [`GaussError::SingularMatrix`] the system is left untouched.
pub fn select_pivot(system: &mut LinearSystem, step: usize) -> Result<usize> {
    let source = if system.matrix()[[step, step]] != 0.0 {
        step
    } else {
        find_pivot_row(system, step).ok_or(GaussError::SingularMatrix { column: step })?
    };

    if source != step {
        log::debug!("Step {}: swapping row {} into pivot position", step, source);
        system.swap_rows(source, step);
    }

    let (matrix, rhs) = system.parts_mut();
    let pivot_val = matrix[[step, step]];
    if pivot_val != 1.0 {
        matrix[[step, step]] = 1.0;
        matrix
            .slice_mut(s![step, step + 1..])
            .mapv_inplace(|v| v / pivot_val);
        rhs[step] /= pivot_val;
    }

    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_diagonal_pivot_normalized() {
        let mut system = LinearSystem::generate(3).expect("valid size");
        let source = select_pivot(&mut system, 0).expect("pivot exists");

        assert_eq!(source, 0);
        assert_eq!(system.matrix().row(0), array![1.0, 1.0, 1.0]);
        assert_eq!(system.rhs()[0], 0.0);
        assert_eq!(system.permutation(), &[0, 1, 2]);
    }

    #[test]
    fn test_zero_diagonal_takes_first_nonzero() {
        let mut system = LinearSystem::from_parts(
            array![[0.0, 1.0, 1.0], [0.0, 2.0, 0.0], [3.0, 9.0, 1.0]],
            array![1.0, 2.0, 6.0],
        )
        .expect("valid shape");

        let source = select_pivot(&mut system, 0).expect("pivot exists");

        assert_eq!(source, 2);
        assert_eq!(system.permutation(), &[2, 1, 0]);
        assert_eq!(system.matrix().row(0), array![1.0, 3.0, 1.0 / 3.0]);
        assert_eq!(system.rhs()[0], 2.0);
        assert_eq!(system.matrix().row(2), array![0.0, 1.0, 1.0]);
        assert_eq!(system.rhs()[2], 1.0);
    }

    #[test]
    fn test_first_match_not_largest() {
        let mut system = LinearSystem::from_parts(
            array![[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [100.0, 0.0, 1.0]],
            array![0.0, 0.0, 0.0],
        )
        .expect("valid shape");

        assert_eq!(find_pivot_row(&system, 0), Some(1));
        assert_eq!(select_pivot(&mut system, 0).expect("pivot exists"), 1);
        assert_eq!(system.permutation(), &[1, 0, 2]);
    }

    #[test]
    fn test_unit_pivot_left_alone() {
        let mut system =
            LinearSystem::from_parts(array![[1.0, 3.0], [2.0, 5.0]], array![7.0, 1.0])
                .expect("valid shape");

        select_pivot(&mut system, 0).expect("pivot exists");

        assert_eq!(system.matrix().row(0), array![1.0, 3.0]);
        assert_eq!(system.rhs()[0], 7.0);
    }

    #[test]
    fn test_zero_column_is_singular() {
        let original = LinearSystem::from_parts(
            array![[1.0, 2.0, 3.0], [0.0, 0.0, 4.0], [0.0, 0.0, 5.0]],
            array![1.0, 1.0, 1.0],
        )
        .expect("valid shape");
        let mut system = original.clone();

        let err = select_pivot(&mut system, 1).unwrap_err();

        assert!(matches!(err, GaussError::SingularMatrix { column: 1 }));
        assert_eq!(system, original);
    }
}
