//! Domain decomposition: worker-grid topology and sub-grid partitioning.
//!
//! Both halves are pure functions of the worker identifier and the run
//! parameters, so every worker derives the same global picture without
//! any communication.

pub mod partition;
pub use partition::{Extent, Offset, offset, partition};

pub mod topology;
pub use topology::{Coord, Neighbors, Shape, Sides, Topology};
