//! MPI-based point-to-point communication.
//!
//! This module provides an implementation of the `Comm` trait on top of the MPI world
//! communicator, for runs where every worker is a separate process started by `mpirun`.
//! It is only available when the `mpi` feature is enabled.
//!
//! # Usage
//!
//! - `MpiComm::new` initializes MPI and keeps the environment alive for as long as the
//!   communicator exists; MPI is finalized when it is dropped.
//! - Sends and receives are blocking standard-mode operations tagged with [`Tag`] values.
//! - `abort` calls `MPI_Abort` on the world, taking every process down with it.
//!
//! # References
//! - [MPI Standard](https://www.mpi-forum.org/)
//!
//! # Example
//! ```no_run
//! # #[cfg(feature = "mpi")]
//! # {
//! use heat2d::parallel::{Comm, MpiComm};
//! let comm = MpiComm::new().unwrap();
//! println!("Rank: {} / {}", comm.rank(), comm.size());
//! # }
//! ```

use mpi::environment::Universe;
use mpi::datatype::Equivalence;
use mpi::topology::SimpleCommunicator;
use mpi::traits::*;

use super::{Comm, Tag};
use crate::error::{HeatError, Result};

/// MPI communicator wrapper for distributed runs.
///
/// Holds the MPI world communicator, the rank of the current process, and the total number of processes.
pub struct MpiComm {
    /// The MPI world communicator (all processes in the job).
    pub world: SimpleCommunicator,
    /// The rank (ID) of this process within the communicator.
    pub rank: usize,
    /// The total number of processes in the communicator.
    pub size: usize,
    // Dropped last: finalizes MPI.
    _universe: Universe,
}

impl MpiComm {
    /// Initializes MPI and constructs a new `MpiComm` instance.
    ///
    /// Fails if MPI has already been initialized in this process.
    pub fn new() -> Result<Self> {
        let universe = mpi::initialize()
            .ok_or_else(|| HeatError::Comm("MPI is already initialized".to_string()))?;
        let world = universe.world();
        let rank = world.rank() as usize;
        let size = world.size() as usize;
        Ok(MpiComm { world, rank, size, _universe: universe })
    }
}

impl Comm for MpiComm {
    /// Returns the rank (ID) of this process.
    fn rank(&self) -> usize { self.rank }
    /// Returns the total number of processes in the communicator.
    fn size(&self) -> usize { self.size }

    /// Blocking tagged send to `dest`.
    fn send_or_skip(&self, dest: Option<usize>, tag: Tag, buf: &[f64]) -> Result<()> {
        if let Some(dest) = dest {
            self.world
                .process_at_rank(dest as i32)
                .send_with_tag(buf, tag.value());
        }
        Ok(())
    }

    /// Blocking tagged receive from `src` directly into `buf`.
    fn receive_or_skip(&self, src: Option<usize>, tag: Tag, buf: &mut [f64]) -> Result<bool> {
        let Some(src) = src else { return Ok(false) };
        let status = self
            .world
            .process_at_rank(src as i32)
            .receive_into_with_tag(buf, tag.value());
        let count = status.count(f64::equivalent_datatype()) as usize;
        if count != buf.len() {
            return Err(HeatError::Comm(format!(
                "rank {} expected {} values tagged {:?} from {src}, got {count}",
                self.rank,
                buf.len(),
                tag
            )));
        }
        Ok(true)
    }

    /// Aborts every process in the world communicator.
    fn abort(&self) {
        self.world.abort(1)
    }
}
