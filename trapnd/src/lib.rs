//! `trapnd` integrates a scalar function over an axis-aligned hyper-rectangle
//! with the composite trapezoid rule.
//!
//! The domain is cut into `segments_count ^ dim` equal cells. The cells can be
//! summed in one sequential pass, or split between the members of a worker
//! group (threads, or MPI processes with the `mpi` feature) whose partial sums
//! are reduced onto rank 0.

pub mod error;
pub mod fixtures;
pub mod grid;
pub mod group;
pub mod integrand;
pub mod partition;
pub mod threads;
pub mod trapezoid;

#[cfg(feature = "mpi")]
pub mod mpi;

pub use error::{Error, Result};
pub use grid::Grid;
pub use group::{parallel_integral, SingleWorker, WorkerGroup};
pub use integrand::{FnIntegrand, Integrand, SimdIntegrand};
pub use partition::{Partition, WorkRange};
pub use threads::{threaded_integral, ThreadGroup};
pub use trapezoid::{sequential_integral, sequential_integral_simd};
