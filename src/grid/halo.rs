//! Halo-padded local grid.
//!
//! A worker's sub-grid of `ny` rows by `nx` columns is stored with a one-cell
//! ghost border on every side, as a flat row-major buffer of
//! `(ny + 2) * (nx + 2)` values. Row and column 0 and `n + 1` are ghosts; the
//! interior is `[1..=ny] x [1..=nx]`.

use std::ops::{Index, IndexMut};

use num_traits::Zero;

#[derive(Debug, Clone, PartialEq)]
pub struct HaloGrid<T> {
    nx: usize,
    ny: usize,
    data: Vec<T>,
}

impl<T: Copy + Zero> HaloGrid<T> {
    /// Allocates a zero-filled grid with `nx` by `ny` interior cells.
    pub fn new(nx: usize, ny: usize) -> Self {
        Self { nx, ny, data: vec![T::zero(); (nx + 2) * (ny + 2)] }
    }

    /// Interior columns.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Interior rows.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Distance between vertically adjacent cells in the flat store.
    pub fn stride(&self) -> usize {
        self.nx + 2
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Full padded row `i`, ghost columns included.
    pub fn row(&self, i: usize) -> &[T] {
        let s = self.stride();
        &self.data[i * s..(i + 1) * s]
    }

    /// Columns `1..=nx` of row `i`.
    pub fn interior_row(&self, i: usize) -> &[T] {
        let s = self.stride();
        &self.data[i * s + 1..i * s + 1 + self.nx]
    }

    pub fn interior_row_mut(&mut self, i: usize) -> &mut [T] {
        let s = self.stride();
        let nx = self.nx;
        &mut self.data[i * s + 1..i * s + 1 + nx]
    }

    /// Copies rows `1..=ny` of column `j` into `out`.
    ///
    /// Columns are strided in row-major storage, so they travel through a
    /// contiguous scratch buffer.
    pub fn gather_column(&self, j: usize, out: &mut [T]) {
        debug_assert_eq!(out.len(), self.ny);
        let s = self.stride();
        for (i, v) in out.iter_mut().enumerate() {
            *v = self.data[(i + 1) * s + j];
        }
    }

    /// Writes `src` into rows `1..=ny` of column `j`.
    pub fn scatter_column(&mut self, j: usize, src: &[T]) {
        debug_assert_eq!(src.len(), self.ny);
        let s = self.stride();
        for (i, &v) in src.iter().enumerate() {
            self.data[(i + 1) * s + j] = v;
        }
    }

    /// Iterates over interior cells row by row.
    pub fn interior(&self) -> impl Iterator<Item = T> + '_ {
        (1..=self.ny).flat_map(move |i| self.interior_row(i).iter().copied())
    }
}

impl<T> Index<(usize, usize)> for HaloGrid<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.data[i * (self.nx + 2) + j]
    }
}

impl<T> IndexMut<(usize, usize)> for HaloGrid<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        &mut self.data[i * (self.nx + 2) + j]
    }
}
