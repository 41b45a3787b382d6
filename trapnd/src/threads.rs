//! Shared-memory worker groups backed by a dedicated rayon thread pool.
//!
//! Each pool thread is one rank. The collective sum is a two-phase exchange:
//! every worker writes its partial sum into its own slot and waits on a
//! barrier, then the coordinator adds the slots in rank order. The fixed order
//! makes the result reproducible from run to run.

use std::sync::{Barrier, Mutex, PoisonError};

use log::debug;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::group::{integrate_on_group, WorkerGroup, COORDINATOR};
use crate::integrand::Integrand;

/// A fixed-size group of worker threads.
pub struct ThreadGroup {
    pool: ThreadPool,
}

impl ThreadGroup {
    /// Starts a pool of exactly `n_workers` threads.
    pub fn new(n_workers: usize) -> Result<Self> {
        if n_workers == 0 {
            return Err(Error::NoWorkers);
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(n_workers)
            .thread_name(|i| format!("trapnd-worker-{i}"))
            .build()
            .map_err(|e| Error::ThreadPool(e.to_string()))?;
        debug!("started thread group with {n_workers} workers");
        Ok(ThreadGroup { pool })
    }

    /// Sizes the group like the global rayon pool, which honours
    /// `RAYON_NUM_THREADS`.
    pub fn from_env() -> Result<Self> {
        Self::new(rayon::current_num_threads())
    }

    pub fn size(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Runs `op` once on every worker, concurrently, and returns the results
    /// in rank order.
    ///
    /// All workers share one reduction, so `op` may call
    /// [`WorkerGroup::reduce_sum`] as long as every worker does so the same
    /// number of times.
    pub fn run<OP, R>(&self, op: OP) -> Vec<R>
    where
        OP: Fn(&LocalWorker<'_>) -> R + Sync,
        R: Send,
    {
        let size = self.size();
        let reduction = Reduction::new(size);
        self.pool.broadcast(|ctx| {
            let worker = LocalWorker {
                rank: ctx.index(),
                size,
                reduction: &reduction,
            };
            op(&worker)
        })
    }

    /// Integrates `integrand` over `[lower, upper]` using every worker of the
    /// group and returns the coordinator's result.
    pub fn integral<F: Integrand + Sync + ?Sized>(
        &self,
        integrand: &F,
        lower: &[f64],
        upper: &[f64],
        segments_count: usize,
    ) -> Result<f64> {
        // validated once, up front, so no worker can bail out before the reduction
        let grid = Grid::new(lower, upper, segments_count)?;
        self.run(|worker| integrate_on_group(integrand, &grid, worker))
            .into_iter()
            .nth(COORDINATOR)
            .unwrap_or(Err(Error::NoWorkers))
    }
}

/// Convenience wrapper: builds a [`ThreadGroup`] of `n_workers` threads and
/// integrates on it.
pub fn threaded_integral<F: Integrand + Sync + ?Sized>(
    integrand: &F,
    lower: &[f64],
    upper: &[f64],
    segments_count: usize,
    n_workers: usize,
) -> Result<f64> {
    ThreadGroup::new(n_workers)?.integral(integrand, lower, upper, segments_count)
}

struct Reduction {
    partials: Mutex<Vec<f64>>,
    barrier: Barrier,
}

impl Reduction {
    fn new(size: usize) -> Self {
        Reduction {
            partials: Mutex::new(vec![0.0; size]),
            barrier: Barrier::new(size),
        }
    }
}

/// One rank of a running [`ThreadGroup`].
pub struct LocalWorker<'a> {
    rank: usize,
    size: usize,
    reduction: &'a Reduction,
}

impl WorkerGroup for LocalWorker<'_> {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn reduce_sum(&self, local: f64) -> Option<f64> {
        self.reduction
            .partials
            .lock()
            .unwrap_or_else(PoisonError::into_inner)[self.rank] = local;
        self.reduction.barrier.wait();

        let total = self.is_coordinator().then(|| {
            self.reduction
                .partials
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
                .sum()
        });
        // keep the slots stable until the coordinator has read them
        self.reduction.barrier.wait();
        total
    }
}
