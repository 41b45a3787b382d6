//! MPI-specific implementation for distributed integration.
use crate::error::Result;
use crate::group::{parallel_integral, WorkerGroup, COORDINATOR};
use crate::integrand::Integrand;
use mpi::collective::SystemOperation;
use mpi::topology::Communicator;
use mpi::traits::*;

/// Adapts an MPI communicator into a [`WorkerGroup`].
///
/// The group bootstrap (`mpi::initialize`) and teardown stay with the caller.
pub struct MpiGroup<'a, C: Communicator> {
    world: &'a C,
}

impl<'a, C: Communicator> MpiGroup<'a, C> {
    pub fn new(world: &'a C) -> Self {
        MpiGroup { world }
    }
}

impl<C: Communicator> WorkerGroup for MpiGroup<'_, C> {
    fn rank(&self) -> usize {
        self.world.rank() as usize
    }

    fn size(&self) -> usize {
        self.world.size() as usize
    }

    fn reduce_sum(&self, local: f64) -> Option<f64> {
        let root = self.world.process_at_rank(COORDINATOR as i32);
        if self.is_coordinator() {
            let mut total = 0.0;
            root.reduce_into_root(&local, &mut total, SystemOperation::sum());
            Some(total)
        } else {
            root.reduce_into(&local, SystemOperation::sum());
            None
        }
    }
}

/// Integrates the given function in a distributed manner using MPI.
///
/// This method should be called by all processes in the MPI communicator.
/// The final result is returned on the root process (rank 0), while other
/// processes will return `0.0`.
///
/// # Arguments
///
/// * `integrand`: The function to integrate.
/// * `lower`, `upper`: The corners of the integration domain.
/// * `segments_count`: The number of segments along every dimension.
/// * `world`: The MPI communicator.
pub fn parallel_integral_mpi<F, C>(
    integrand: &F,
    lower: &[f64],
    upper: &[f64],
    segments_count: usize,
    world: &C,
) -> Result<f64>
where
    F: Integrand + ?Sized,
    C: Communicator,
{
    parallel_integral(
        integrand,
        lower,
        upper,
        segments_count,
        &MpiGroup::new(world),
    )
}
