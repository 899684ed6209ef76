//! Point-to-point messaging between workers.
//!
//! The solver only needs blocking, tagged send/receive between pairs of
//! workers plus a way to bring the whole group down. Peers are addressed by
//! `Option<usize>`: `None` stands for "no neighbor on this side" and turns the
//! operation into a no-op, so exchange code never branches on the topology.

pub mod local_comm;
pub use local_comm::LocalComm;

#[cfg(feature = "mpi")]
pub mod mpi_comm;
#[cfg(feature = "mpi")]
pub use mpi_comm::MpiComm;

#[cfg(feature = "rayon")]
pub mod pool;
#[cfg(feature = "rayon")]
pub use pool::init_thread_pool;

use crate::error::Result;

/// Message tags. Each directed exchange has its own tag so a worker never
/// confuses a row meant for one ghost edge with another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Tag {
    /// First interior row, travelling north.
    RowNorth = 0,
    /// Last interior row, travelling south.
    RowSouth = 1,
    /// First interior column, travelling west.
    ColumnWest = 2,
    /// Last interior column, travelling east.
    ColumnEast = 3,
    /// Local interior sum, travelling to the coordinator.
    LocalSum = 10,
    /// Local interior maximum, travelling to the coordinator.
    LocalMax = 11,
}

impl Tag {
    pub fn value(self) -> i32 {
        self as i32
    }
}

pub trait Comm {
    /// Identifier of this worker.
    fn rank(&self) -> usize;
    /// Number of workers in the group.
    fn size(&self) -> usize;
    /// Sends `buf` to `dest`; does nothing when `dest` is `None`.
    fn send_or_skip(&self, dest: Option<usize>, tag: Tag, buf: &[f64]) -> Result<()>;
    /// Blocks until a message tagged `tag` from `src` fills `buf`.
    ///
    /// Returns `Ok(false)` without touching `buf` when `src` is `None`.
    fn receive_or_skip(&self, src: Option<usize>, tag: Tag, buf: &mut [f64]) -> Result<bool>;
    /// Tears down the whole group after an unrecoverable error.
    fn abort(&self);
}

impl<C: Comm + ?Sized> Comm for &C {
    fn rank(&self) -> usize {
        (**self).rank()
    }
    fn size(&self) -> usize {
        (**self).size()
    }
    fn send_or_skip(&self, dest: Option<usize>, tag: Tag, buf: &[f64]) -> Result<()> {
        (**self).send_or_skip(dest, tag, buf)
    }
    fn receive_or_skip(&self, src: Option<usize>, tag: Tag, buf: &mut [f64]) -> Result<bool> {
        (**self).receive_or_skip(src, tag, buf)
    }
    fn abort(&self) {
        (**self).abort()
    }
}
