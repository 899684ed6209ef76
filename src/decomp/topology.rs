//! Worker-grid topology.
//!
//! Workers are numbered row-major over a PX×PY grid: `px = id % PX`,
//! `py = id / PX`. Row `py = 0` is the northern edge, column `px = 0` the
//! western edge.

use bitflags::bitflags;

bitflags! {
    /// A set of cardinal sides of a sub-grid.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Sides: u8 {
        const NORTH = 0b0001;
        const SOUTH = 0b0010;
        const WEST  = 0b0100;
        const EAST  = 0b1000;
    }
}

/// Shape of the worker grid (PX columns by PY rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub px: usize,
    pub py: usize,
}

impl Shape {
    pub fn new(px: usize, py: usize) -> Self {
        Self { px, py }
    }

    /// Number of workers the shape requires, or `None` if PX·PY overflows.
    pub fn workers(&self) -> Option<usize> {
        self.px.checked_mul(self.py)
    }
}

/// Position of a worker in the worker grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coord {
    pub px: usize,
    pub py: usize,
}

/// Cardinal neighbors of a worker; `None` marks a global edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Neighbors {
    pub north: Option<usize>,
    pub south: Option<usize>,
    pub west: Option<usize>,
    pub east: Option<usize>,
}

impl Neighbors {
    /// Sides with no neighbor, i.e. sides lying on the global boundary.
    pub fn physical_sides(&self) -> Sides {
        let mut sides = Sides::empty();
        sides.set(Sides::NORTH, self.north.is_none());
        sides.set(Sides::SOUTH, self.south.is_none());
        sides.set(Sides::WEST, self.west.is_none());
        sides.set(Sides::EAST, self.east.is_none());
        sides
    }
}

/// Resolved position of one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    pub coord: Coord,
    pub neighbors: Neighbors,
}

impl Topology {
    /// Maps a linear worker id to its coordinate and neighbors.
    ///
    /// The caller guarantees `id < PX * PY`.
    pub fn resolve(id: usize, shape: Shape) -> Self {
        debug_assert!(shape.workers().is_some_and(|w| id < w));
        let px = id % shape.px;
        let py = id / shape.px;
        let neighbors = Neighbors {
            north: (py > 0).then(|| id - shape.px),
            south: (py + 1 < shape.py).then(|| id + shape.px),
            west: (px > 0).then(|| id - 1),
            east: (px + 1 < shape.px).then(|| id + 1),
        };
        Topology { coord: Coord { px, py }, neighbors }
    }
}
