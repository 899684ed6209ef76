//! Immutable per-worker configuration.

use crate::config::RunOptions;
use crate::decomp::{offset, partition, Coord, Extent, Neighbors, Offset, Shape, Topology};
use crate::error::Result;

/// Identifier of the worker that seeds the hotspot and collects the reduction.
pub const COORDINATOR: usize = 0;

/// Everything one worker needs to know about its place in the run.
///
/// Built once at startup from the run options and the identity handed out by
/// the communication backend, then shared read-only with every component.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerConfig {
    pub id: usize,
    pub worker_count: usize,
    pub shape: Shape,
    pub coord: Coord,
    pub neighbors: Neighbors,
    pub extent: Extent,
    pub offset: Offset,
}

impl WorkerConfig {
    /// Validates `opts` against `worker_count` and resolves worker `id`.
    pub fn new(opts: &RunOptions, id: usize, worker_count: usize) -> Result<Self> {
        opts.validate(worker_count)?;
        let shape = opts.shape();
        let Topology { coord, neighbors } = Topology::resolve(id, shape);
        let extent = Extent {
            nx: partition(opts.nx, shape.px, coord.px),
            ny: partition(opts.ny, shape.py, coord.py),
        };
        let offset = Offset {
            x: offset(opts.nx, shape.px, coord.px),
            y: offset(opts.ny, shape.py, coord.py),
        };
        Ok(WorkerConfig { id, worker_count, shape, coord, neighbors, extent, offset })
    }

    pub fn is_coordinator(&self) -> bool {
        self.id == COORDINATOR
    }

    /// Global (row, column) of local interior cell (i, j), 1-based interior indexing.
    pub fn global_cell(&self, i: usize, j: usize) -> (usize, usize) {
        (self.offset.y + i - 1, self.offset.x + j - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HeatError;

    fn opts() -> RunOptions {
        RunOptions { nx: 7, ny: 5, px: 3, py: 2, steps: 0, alpha: 0.1 }
    }

    #[test]
    fn resolves_extent_and_offset() {
        let cfg = WorkerConfig::new(&opts(), 5, 6).unwrap();
        assert_eq!(cfg.coord, Coord { px: 2, py: 1 });
        assert_eq!(cfg.extent, Extent { nx: 2, ny: 2 });
        assert_eq!(cfg.offset, Offset { x: 5, y: 3 });
        assert_eq!(cfg.global_cell(1, 1), (3, 5));
        assert_eq!(cfg.global_cell(2, 2), (4, 6));
        assert!(!cfg.is_coordinator());
    }

    #[test]
    fn every_global_cell_owned_exactly_once() {
        let o = opts();
        let mut owner = vec![None; o.nx * o.ny];
        for id in 0..6 {
            let cfg = WorkerConfig::new(&o, id, 6).unwrap();
            for i in 1..=cfg.extent.ny {
                for j in 1..=cfg.extent.nx {
                    let (r, c) = cfg.global_cell(i, j);
                    assert_eq!(owner[r * o.nx + c], None);
                    owner[r * o.nx + c] = Some(id);
                }
            }
        }
        assert!(owner.iter().all(Option::is_some));
    }

    #[test]
    fn mismatch_is_reported_before_resolving() {
        assert_eq!(
            WorkerConfig::new(&opts(), 0, 4),
            Err(HeatError::ShapeMismatch { px: 3, py: 2, workers: 4 })
        );
    }
}
