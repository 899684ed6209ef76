//! Double-buffered field storage.
//!
//! Two grids of the same shape with a single `current` indicator. The stencil
//! reads from the current grid and writes the next one; `swap` flips the
//! indicator, so the roles change without copying any cell data.

use num_traits::Zero;

use super::HaloGrid;

#[derive(Debug, Clone)]
pub struct DoubleBuffer<T> {
    grids: [HaloGrid<T>; 2],
    current: usize,
}

impl<T: Copy + Zero> DoubleBuffer<T> {
    pub fn new(nx: usize, ny: usize) -> Self {
        Self { grids: [HaloGrid::new(nx, ny), HaloGrid::new(nx, ny)], current: 0 }
    }

    pub fn current(&self) -> &HaloGrid<T> {
        &self.grids[self.current]
    }

    pub fn current_mut(&mut self) -> &mut HaloGrid<T> {
        &mut self.grids[self.current]
    }

    /// Borrows the current grid for reading and the next grid for writing.
    pub fn split(&mut self) -> (&HaloGrid<T>, &mut HaloGrid<T>) {
        let (a, b) = self.grids.split_at_mut(1);
        if self.current == 0 {
            (&a[0], &mut b[0])
        } else {
            (&b[0], &mut a[0])
        }
    }

    /// Exchanges the roles of the two grids.
    pub fn swap(&mut self) {
        self.current ^= 1;
    }
}
