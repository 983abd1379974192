//! Persistent worker pool for row-reduction tasks
//!
//! The pool is built once with a fixed number of workers and reused for
//! every elimination step. Each call to [`WorkerPool::dispatch`] is a full
//! barrier: it returns only after every task handed to it has been applied,
//! and all writes made by the workers are visible to the caller afterwards.

use crate::error::{GaussError, Result};
use crossbeam_channel::bounded;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// How tasks of one step are handed to the workers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    /// Shared bounded queue, filled then closed; workers claim one task at a
    /// time until the queue is drained
    #[default]
    Queue,
    /// Contiguous blocks of `ceil(tasks / workers)` tasks, one block per worker
    Block,
    /// Everything runs on the calling thread, the pool is not engaged
    Sequential,
}

impl Schedule {
    /// Every available schedule, in declaration order
    pub const ALL: [Schedule; 3] = [Schedule::Queue, Schedule::Block, Schedule::Sequential];
}

/// Fixed-size pool of worker threads
#[derive(Debug)]
pub struct WorkerPool {
    pool: ThreadPool,
    workers: usize,
}

impl WorkerPool {
    /// Build a pool with `workers` threads (must be >= 1)
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(GaussError::InvalidWorkerCount(workers));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("gauss-worker-{i}"))
            .build()?;

        log::info!("Worker pool ready with {} worker(s)", workers);

        Ok(Self { pool, workers })
    }

    /// Number of workers in the pool
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Apply `work` to every task and wait until all of them are done
    ///
    /// Tasks are owned values; a task that carries a mutable borrow gives
    /// its worker exclusive access to that data, so no locking is needed
    /// as long as the borrows are disjoint.
    pub fn dispatch<I, F>(&self, schedule: Schedule, tasks: I, work: F)
    where
        I: IntoIterator,
        I::Item: Send,
        F: Fn(I::Item) + Sync,
    {
        match schedule {
            Schedule::Sequential => tasks.into_iter().for_each(work),
            Schedule::Queue => self.drain_queue(tasks.into_iter().collect(), &work),
            Schedule::Block => self.run_blocks(tasks.into_iter().collect(), &work),
        }
    }

    /// Fill a bounded queue with every task, close it, then let each worker
    /// claim tasks until the queue reports disconnection
    fn drain_queue<T, F>(&self, tasks: Vec<T>, work: &F)
    where
        T: Send,
        F: Fn(T) + Sync,
    {
        if tasks.is_empty() {
            return;
        }

        // capacity covers every task and `receiver` lives until the end of
        // this function, so a send can neither block nor fail
        let (sender, receiver) = bounded(tasks.len());
        for task in tasks {
            sender
                .send(task)
                .expect("queue holds every task and its receiver is alive");
        }
        drop(sender);

        let receiver = &receiver;
        let workers = self.workers;
        self.pool.scope(|scope| {
            for _ in 0..workers {
                scope.spawn(move |_| {
                    while let Ok(task) = receiver.recv() {
                        work(task);
                    }
                });
            }
        });
    }

    /// Hand each worker one contiguous block of tasks
    fn run_blocks<T, F>(&self, mut tasks: Vec<T>, work: &F)
    where
        T: Send,
        F: Fn(T) + Sync,
    {
        let len = block_len(tasks.len(), self.workers);
        let mut blocks = Vec::with_capacity(self.workers);
        while !tasks.is_empty() {
            let rest = tasks.split_off(len.min(tasks.len()));
            blocks.push(std::mem::replace(&mut tasks, rest));
        }

        self.pool.scope(|scope| {
            for block in blocks {
                scope.spawn(move |_| block.into_iter().for_each(work));
            }
        });
    }
}

/// Tasks per worker for [`Schedule::Block`]
pub(crate) fn block_len(tasks: usize, workers: usize) -> usize {
    tasks.div_ceil(workers.max(1)).max(1)
}
