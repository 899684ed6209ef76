//! Halo (ghost-cell) exchange with the four cardinal neighbors.
//!
//! One call performs four directed exchanges, always in this order:
//!
//! 1. first interior row → north, ghost row `ny + 1` ← south
//! 2. last interior row → south, ghost row `0` ← north
//! 3. first interior column → west, ghost column `nx + 1` ← east
//! 4. last interior column → east, ghost column `0` ← west
//!
//! Every worker issues the same eight operations per step. Operations toward a
//! missing neighbor are skipped by the communicator, and a ghost column is only
//! written when a column actually arrived, so global-edge ghosts keep the
//! values the boundary condition put there.

use crate::decomp::Neighbors;
use crate::error::Result;
use crate::grid::HaloGrid;
use crate::parallel::{Comm, Tag};

/// Scratch space for the strided column exchanges, allocated once per worker.
#[derive(Debug, Clone)]
pub struct HaloExchange {
    send_col: Vec<f64>,
    recv_col: Vec<f64>,
}

impl HaloExchange {
    /// Sizes the column buffers for a sub-grid with `ny` interior rows.
    pub fn new(ny: usize) -> Self {
        Self { send_col: vec![0.0; ny], recv_col: vec![0.0; ny] }
    }

    /// Synchronizes all four ghost edges of `grid` with the neighbors' interiors.
    ///
    /// Returns once every exchange this worker takes part in has completed.
    pub fn exchange<C: Comm>(
        &mut self,
        comm: &C,
        neighbors: &Neighbors,
        grid: &mut HaloGrid<f64>,
    ) -> Result<()> {
        let (nx, ny) = (grid.nx(), grid.ny());

        comm.send_or_skip(neighbors.north, Tag::RowNorth, grid.interior_row(1))?;
        comm.receive_or_skip(neighbors.south, Tag::RowNorth, grid.interior_row_mut(ny + 1))?;

        comm.send_or_skip(neighbors.south, Tag::RowSouth, grid.interior_row(ny))?;
        comm.receive_or_skip(neighbors.north, Tag::RowSouth, grid.interior_row_mut(0))?;

        grid.gather_column(1, &mut self.send_col);
        comm.send_or_skip(neighbors.west, Tag::ColumnWest, &self.send_col)?;
        if comm.receive_or_skip(neighbors.east, Tag::ColumnWest, &mut self.recv_col)? {
            grid.scatter_column(nx + 1, &self.recv_col);
        }

        grid.gather_column(nx, &mut self.send_col);
        comm.send_or_skip(neighbors.east, Tag::ColumnEast, &self.send_col)?;
        if comm.receive_or_skip(neighbors.west, Tag::ColumnEast, &mut self.recv_col)? {
            grid.scatter_column(0, &self.recv_col);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decomp::{Shape, Topology};
    use crate::parallel::LocalComm;
    use std::thread;

    // Worker `id` fills its interior with 100 * id + 10 * i + j.
    fn tagged_grid(id: usize, nx: usize, ny: usize) -> HaloGrid<f64> {
        let mut g = HaloGrid::new(nx, ny);
        for i in 1..=ny {
            for j in 1..=nx {
                g[(i, j)] = (100 * id + 10 * i + j) as f64;
            }
        }
        g
    }

    #[test]
    fn two_by_two_exchange_fills_shared_edges() {
        let shape = Shape::new(2, 2);
        let (nx, ny) = (3, 2);
        let grids: Vec<HaloGrid<f64>> = thread::scope(|s| {
            let handles: Vec<_> = LocalComm::universe(4)
                .into_iter()
                .map(|comm| {
                    s.spawn(move || {
                        let id = comm.rank();
                        let topo = Topology::resolve(id, shape);
                        let mut grid = tagged_grid(id, nx, ny);
                        HaloExchange::new(ny)
                            .exchange(&comm, &topo.neighbors, &mut grid)
                            .unwrap();
                        grid
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        // worker 0 (north-west): south ghost row is worker 2's first row,
        // east ghost column is worker 1's first column
        let g0 = &grids[0];
        assert_eq!(g0.row(ny + 1)[1..=nx], [211.0, 212.0, 213.0]);
        assert_eq!((g0[(1, nx + 1)], g0[(2, nx + 1)]), (111.0, 121.0));
        // global edges untouched by the exchange
        assert_eq!(g0.row(0), &[0.0; 5]);
        assert_eq!((g0[(1, 0)], g0[(2, 0)]), (0.0, 0.0));

        // worker 3 (south-east): north ghost row is worker 1's last row,
        // west ghost column is worker 2's last column
        let g3 = &grids[3];
        assert_eq!(g3.row(0)[1..=nx], [121.0, 122.0, 123.0]);
        assert_eq!((g3[(1, 0)], g3[(2, 0)]), (213.0, 223.0));
    }

    #[test]
    fn single_worker_exchange_is_a_noop() {
        let comm = LocalComm::universe(1).remove(0);
        let topo = Topology::resolve(0, Shape::new(1, 1));
        let mut grid = tagged_grid(0, 2, 2);
        let before = grid.clone();
        HaloExchange::new(2).exchange(&comm, &topo.neighbors, &mut grid).unwrap();
        assert_eq!(grid, before);
    }
}
