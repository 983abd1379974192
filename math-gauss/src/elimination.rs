//! Forward elimination with a barrier-synchronized worker pool
//!
//! Each step selects a pivot on the calling thread, then hands every row
//! below the pivot to the pool as an independent task. A task owns a
//! mutable view of exactly one row (and its right-hand side entry) while
//! the pivot row is shared read-only, so the matrix itself needs no lock.
//! The next step starts only after the pool reports every task done.
//!
//! The result of a step depends only on the pivot row and on each row's own
//! values, so the final system is bit-identical for any worker count and
//! any [`Schedule`].

use crate::backsub::{Solution, back_substitute};
use crate::error::Result;
use crate::parallel::{Schedule, WorkerPool};
use crate::pivot::select_pivot;
use crate::system::LinearSystem;
use ndarray::{ArrayView1, ArrayViewMut1, Axis, Zip, s};

/// Elimination configuration
#[derive(Debug, Clone)]
pub struct EliminationConfig {
    /// Number of workers in the pool (>= 1)
    pub workers: usize,
    /// How row tasks are distributed to the workers
    pub schedule: Schedule,
    /// Log progress every N steps (0 = no output)
    pub progress_interval: usize,
}

impl Default for EliminationConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            schedule: Schedule::Queue,
            progress_interval: 0,
        }
    }
}

/// One unit of work: reduce a single row below the pivot
struct RowTask<'a> {
    index: usize,
    row: ArrayViewMut1<'a, f64>,
    rhs: &'a mut f64,
}

impl RowTask<'_> {
    fn reduce(mut self, step: usize, pivot_row: ArrayView1<f64>, pivot_rhs: f64) {
        debug_assert!(self.index > step);

        let factor = self.row[step];
        self.row[step] = 0.0;
        Zip::from(self.row.slice_mut(s![step + 1..]))
            .and(pivot_row.slice(s![step + 1..]))
            .for_each(|value, &pivot| *value -= factor * pivot);
        *self.rhs -= factor * pivot_rhs;
    }
}

/// A system whose forward elimination finished for every step
///
/// Only [`GaussianElimination::eliminate`] produces this type, so back
/// substitution can never run on a partially reduced matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct EliminatedSystem {
    system: LinearSystem,
}

impl EliminatedSystem {
    /// The upper triangular system with unit diagonal
    pub fn system(&self) -> &LinearSystem {
        &self.system
    }

    /// Take back the reduced system
    pub fn into_inner(self) -> LinearSystem {
        self.system
    }

    /// Solve the triangular system
    pub fn solve(&self) -> Solution {
        back_substitute(self)
    }
}

/// Gaussian elimination driver holding a persistent worker pool
#[derive(Debug)]
pub struct GaussianElimination {
    config: EliminationConfig,
    pool: WorkerPool,
}

impl GaussianElimination {
    /// Build the driver and its worker pool
    pub fn new(config: EliminationConfig) -> Result<Self> {
        let pool = WorkerPool::new(config.workers)?;
        Ok(Self { config, pool })
    }

    /// Active configuration
    pub fn config(&self) -> &EliminationConfig {
        &self.config
    }

    /// The worker pool shared by every step
    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Run elimination step `step`: pivot, then reduce every row below it
    ///
    /// Returns once all rows below the pivot have been reduced. A singular
    /// column fails before any row is dispatched.
    ///
    /// # Panics
    /// If `step >= system.dim()`.
    pub fn step(&self, system: &mut LinearSystem, step: usize) -> Result<()> {
        select_pivot(system, step)?;

        let rows_left = system.dim() - step - 1;
        log::debug!("Step {}: dispatching {} row(s)", step, rows_left);
        if rows_left == 0 {
            return Ok(());
        }

        let (matrix, rhs) = system.parts_mut();
        let (pivot_block, mut lower) = matrix.view_mut().split_at(Axis(0), step + 1);
        let (rhs_head, mut rhs_tail) = rhs.view_mut().split_at(Axis(0), step + 1);
        let pivot_row = pivot_block.row(step);
        let pivot_rhs = rhs_head[step];

        let tasks = lower
            .outer_iter_mut()
            .zip(rhs_tail.iter_mut())
            .enumerate()
            .map(|(offset, (row, rhs))| RowTask {
                index: step + 1 + offset,
                row,
                rhs,
            });

        self.pool.dispatch(self.config.schedule, tasks, |task| {
            task.reduce(step, pivot_row, pivot_rhs)
        });

        Ok(())
    }

    /// Reduce `system` to upper triangular form with a unit diagonal
    ///
    /// On a singular matrix the partially reduced system is dropped.
    pub fn eliminate(&self, mut system: LinearSystem) -> Result<EliminatedSystem> {
        let n = system.dim();

        for step in 0..n {
            self.step(&mut system, step)?;

            if self.config.progress_interval > 0 && (step + 1) % self.config.progress_interval == 0
            {
                log::info!("Elimination step {} of {} done", step + 1, n);
            }
        }

        Ok(EliminatedSystem { system })
    }
}

/// Eliminate and back-substitute in one call
///
/// Convenience wrapper that builds a pool for a single solve.
pub fn gauss_solve(system: LinearSystem, config: &EliminationConfig) -> Result<Solution> {
    let driver = GaussianElimination::new(config.clone())?;
    let eliminated = driver.eliminate(system)?;
    Ok(eliminated.solve())
}
