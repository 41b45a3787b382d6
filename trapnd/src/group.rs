//! Worker groups and the parallel integration driver.
//!
//! A parallel integration runs in two phases. Every worker first sums its own
//! share of the cells with no communication at all, then all partial sums are
//! combined by one blocking collective sum onto the coordinator, rank 0.
//!
//! Each member of the group must reach the reduction. A worker that panics or
//! hangs during its local pass leaves the others waiting forever.

use log::{debug, trace};

use crate::error::Result;
use crate::grid::Grid;
use crate::integrand::Integrand;
use crate::partition::Partition;
use crate::trapezoid::accumulate_range;

/// The rank that receives the reduced result.
pub const COORDINATOR: usize = 0;

/// One member's view of a fixed-size group of cooperating workers.
pub trait WorkerGroup {
    /// This worker's rank, in `[0, size)`.
    fn rank(&self) -> usize;

    /// The number of workers in the group.
    fn size(&self) -> usize;

    /// Sums `local` over all workers onto the coordinator.
    ///
    /// Blocks until every worker has contributed. Returns `Some(total)` on
    /// [`COORDINATOR`] and `None` everywhere else.
    fn reduce_sum(&self, local: f64) -> Option<f64>;

    fn is_coordinator(&self) -> bool {
        self.rank() == COORDINATOR
    }
}

/// A group with a single member, where the reduction is the identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleWorker;

impl WorkerGroup for SingleWorker {
    fn rank(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        1
    }

    fn reduce_sum(&self, local: f64) -> Option<f64> {
        Some(local)
    }
}

/// Integrates `integrand` over `[lower, upper]` with the work split across
/// `group`.
///
/// This method should be called by every worker of the group with the same
/// arguments. The final result is returned on the coordinator, while other
/// workers return `0.0`.
pub fn parallel_integral<F, G>(
    integrand: &F,
    lower: &[f64],
    upper: &[f64],
    segments_count: usize,
    group: &G,
) -> Result<f64>
where
    F: Integrand + ?Sized,
    G: WorkerGroup + ?Sized,
{
    let grid = Grid::new(lower, upper, segments_count)?;
    integrate_on_group(integrand, &grid, group)
}

/// Runs the local pass for `group.rank()` over a validated grid, then joins
/// the reduction.
pub(crate) fn integrate_on_group<F, G>(integrand: &F, grid: &Grid, group: &G) -> Result<f64>
where
    F: Integrand + ?Sized,
    G: WorkerGroup + ?Sized,
{
    let rank = group.rank();
    let range = Partition::new(grid.total_cells(), group.size())?.range(rank)?;
    debug!(
        "rank {rank}/{} integrating cells [{}, {})",
        group.size(),
        range.first,
        range.last
    );

    let local = accumulate_range(integrand, grid, range.first, range.last);
    trace!("rank {rank} partial sum {local}");

    match group.reduce_sum(local) {
        Some(total) => {
            debug!("reduced {} partial sums to {total}", group.size());
            Ok(total)
        }
        None => Ok(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::fixtures::{FirstIntegral, PiIntegral};
    use crate::trapezoid::sequential_integral;

    /// A fake group member that reports a fixed partial sum from its peers.
    struct Peer {
        rank: usize,
        size: usize,
        others: f64,
    }

    impl WorkerGroup for Peer {
        fn rank(&self) -> usize {
            self.rank
        }

        fn size(&self) -> usize {
            self.size
        }

        fn reduce_sum(&self, local: f64) -> Option<f64> {
            self.is_coordinator().then_some(local + self.others)
        }
    }

    #[test]
    fn test_single_worker_matches_sequential() {
        let f = FirstIntegral::new();
        let seq = sequential_integral(&f, f.lower_bound(), f.upper_bound(), 200).unwrap();
        let par =
            parallel_integral(&f, f.lower_bound(), f.upper_bound(), 200, &SingleWorker).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_ranks_sum_to_sequential() {
        let f = PiIntegral::new();
        let size = 3;
        // 1000 cells over 3 ranks: rank 0 owns [0, 334)
        let locals: Vec<f64> = (1..size)
            .map(|rank| {
                let peer = Peer {
                    rank,
                    size,
                    others: 0.0,
                };
                assert_eq!(
                    parallel_integral(&f, f.lower_bound(), f.upper_bound(), 1000, &peer),
                    Ok(0.0)
                );
                let grid = Grid::new(f.lower_bound(), f.upper_bound(), 1000).unwrap();
                let range = Partition::new(1000, size).unwrap().range(rank).unwrap();
                accumulate_range(&f, &grid, range.first, range.last)
            })
            .collect();

        let coordinator = Peer {
            rank: 0,
            size,
            others: locals.iter().sum(),
        };
        let total =
            parallel_integral(&f, f.lower_bound(), f.upper_bound(), 1000, &coordinator).unwrap();
        let seq = sequential_integral(&f, f.lower_bound(), f.upper_bound(), 1000).unwrap();
        assert!(((total - seq) / seq).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_inputs_are_rejected_before_reduction() {
        let f = PiIntegral::new();
        assert_eq!(
            parallel_integral(&f, &[1.0], &[0.0], 10, &SingleWorker),
            Err(Error::InvertedBounds {
                dim: 0,
                lower: 1.0,
                upper: 0.0
            })
        );
    }
}
