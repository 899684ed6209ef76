//! Zero-flux (reflective) boundary condition on global edges.

use num_traits::Zero;

use crate::decomp::Sides;
use crate::grid::HaloGrid;

/// Copies the outermost interior row/column into the ghost row/column on each
/// side in `sides`, making the outward gradient zero there.
///
/// Must run before the halo exchange of every step; sides with a real
/// neighbor are left for the exchange to fill.
pub fn apply_reflective<T: Copy + Zero>(grid: &mut HaloGrid<T>, sides: Sides) {
    let (nx, ny, s) = (grid.nx(), grid.ny(), grid.stride());
    if sides.contains(Sides::NORTH) {
        grid.as_mut_slice().copy_within(s + 1..s + 1 + nx, 1);
    }
    if sides.contains(Sides::SOUTH) {
        grid.as_mut_slice()
            .copy_within(ny * s + 1..ny * s + 1 + nx, (ny + 1) * s + 1);
    }
    if sides.contains(Sides::WEST) {
        for i in 1..=ny {
            grid[(i, 0)] = grid[(i, 1)];
        }
    }
    if sides.contains(Sides::EAST) {
        for i in 1..=ny {
            grid[(i, nx + 1)] = grid[(i, nx)];
        }
    }
}
