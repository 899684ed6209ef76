//! heat2d: distributed explicit solver for the 2-D heat equation
//!
//! The global NX×NY grid is split over a fixed PX×PY arrangement of workers.
//! Every worker owns one rectangular sub-grid with a one-cell ghost border,
//! applies a zero-flux condition on global edges, swaps halos with its four
//! neighbors each step, advances with a 5-point forward-Euler stencil, and
//! finally fans its sum and maximum in to the coordinator.
//!
//! Workers talk only through the [`parallel::Comm`] trait: threads of one
//! process ([`parallel::LocalComm`]) or, with the `mpi` feature, processes of
//! an MPI job.

pub mod parallel;

pub mod config;
pub mod decomp;
pub mod error;
pub mod grid;
pub mod launch;
pub mod report;
pub mod solver;

// Re-exports for convenience
pub use config::{RunOptions, WorkerConfig};
pub use decomp::{Coord, Extent, Neighbors, Offset, Shape, Sides, Topology};
pub use error::{HeatError, Result};
pub use grid::{DoubleBuffer, HaloGrid};
pub use launch::run_local;
#[cfg(feature = "mpi")]
pub use launch::run_mpi;
pub use report::Report;
pub use solver::{FieldStats, HeatWorker};
