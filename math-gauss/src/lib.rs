//! Dense Gaussian elimination with a parallel row-reduction kernel
//!
//! This crate solves `A x = b` for a dense square matrix by forward
//! elimination with partial pivoting followed by back substitution. It is
//! meant for measuring how the O(n³) elimination phase scales with the
//! number of workers, not as a general purpose linear algebra library.
//!
//! # Features
//!
//! - **Pivoting**: first nonzero candidate in the active column, with a
//!   permutation trace of every row swap
//! - **Parallel elimination**: persistent worker pool, one task per row
//!   below the pivot, full barrier between steps
//! - **Schedules**: shared task queue, contiguous blocks, or sequential
//! - **Deterministic**: results are bit-identical for any worker count
//!
//! # Example
//!
//! ```
//! use math_audio_gauss::{EliminationConfig, GaussianElimination, LinearSystem};
//!
//! let system = LinearSystem::generate(3).unwrap();
//! let config = EliminationConfig {
//!     workers: 2,
//!     ..Default::default()
//! };
//! let gauss = GaussianElimination::new(config).unwrap();
//! let solution = gauss.eliminate(system).unwrap().solve();
//! assert_eq!(solution.x.to_vec(), vec![-0.5, 0.0, 0.5]);
//! ```

pub mod backsub;
pub mod elimination;
pub mod error;
pub mod parallel;
pub mod pivot;
pub mod report;
pub mod system;

pub use backsub::{Solution, back_substitute};
pub use elimination::{EliminatedSystem, EliminationConfig, GaussianElimination, gauss_solve};
pub use error::{GaussError, Result};
pub use parallel::{Schedule, WorkerPool};
pub use pivot::select_pivot;
pub use report::{Verification, verify_solution};
pub use system::LinearSystem;
