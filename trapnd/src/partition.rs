//! Splitting the flat cell range between the workers of a group.

use crate::error::{Error, Result};
use std::ops::Range;

/// A contiguous half-open range of flat cell indices owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkRange {
    pub first: usize,
    pub last: usize,
}

impl WorkRange {
    pub fn len(&self) -> usize {
        self.last - self.first
    }

    pub fn is_empty(&self) -> bool {
        self.first == self.last
    }

    pub fn as_range(&self) -> Range<usize> {
        self.first..self.last
    }
}

/// The assignment of `[0, total_cells)` to `n_workers` ranks.
///
/// Every rank gets `total_cells / n_workers` cells. The remainder is NOT spread
/// over the first ranks: all of it goes to rank 0, the coordinator, and the
/// other ranks are shifted forward by the remainder. This lopsided split is
/// kept on purpose so results match reference runs bit for bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    total_cells: usize,
    n_workers: usize,
}

impl Partition {
    pub fn new(total_cells: usize, n_workers: usize) -> Result<Self> {
        if n_workers == 0 {
            return Err(Error::NoWorkers);
        }
        Ok(Partition {
            total_cells,
            n_workers,
        })
    }

    pub fn total_cells(&self) -> usize {
        self.total_cells
    }

    pub fn n_workers(&self) -> usize {
        self.n_workers
    }

    /// Returns the cells assigned to `rank`.
    pub fn range(&self, rank: usize) -> Result<WorkRange> {
        if rank >= self.n_workers {
            return Err(Error::InvalidRank {
                rank,
                size: self.n_workers,
            });
        }

        Ok(self.unchecked_range(rank))
    }

    /// Iterates over the ranges of all ranks in rank order.
    pub fn iter(&self) -> impl Iterator<Item = WorkRange> + '_ {
        (0..self.n_workers).map(move |rank| self.unchecked_range(rank))
    }

    fn unchecked_range(&self, rank: usize) -> WorkRange {
        let base = self.total_cells / self.n_workers;
        let remainder = self.total_cells % self.n_workers;
        let first = if rank == 0 { 0 } else { rank * base + remainder };
        WorkRange {
            first,
            last: (rank + 1) * base + remainder,
        }
    }
}

/// Shorthand for `Partition::new(total_cells, n_workers)?.range(rank)`.
pub fn work_range(total_cells: usize, n_workers: usize, rank: usize) -> Result<WorkRange> {
    Partition::new(total_cells, n_workers)?.range(rank)
}
