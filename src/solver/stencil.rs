//! Explicit 5-point stencil for the diffusion equation.
//!
//! `next(i,j) = C + alpha * (N + S + W + E - 4C)` over every interior cell,
//! reading only `current` (ghosts included) and writing only the interior of
//! `next`. This is forward Euler in time; it is stable for `alpha <= 0.25` and
//! nothing here checks that.

use num_traits::Float;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::grid::HaloGrid;

/// Updates one padded row. `above`, `row` and `below` are full padded rows of
/// the current grid; only `out[1..len-1]` is written.
#[inline]
fn update_row<T: Float>(above: &[T], row: &[T], below: &[T], out: &mut [T], alpha: T) {
    let four = T::one() + T::one() + T::one() + T::one();
    for j in 1..out.len() - 1 {
        let c = row[j];
        let lap = above[j] + below[j] + row[j - 1] + row[j + 1] - four * c;
        out[j] = c + alpha * lap;
    }
}

/// Applies one explicit step from `current` into `next`.
pub fn update<T>(current: &HaloGrid<T>, next: &mut HaloGrid<T>, alpha: T)
where
    T: Float + Send + Sync,
{
    assert_eq!((current.nx(), current.ny()), (next.nx(), next.ny()));
    let s = current.stride();
    let ny = current.ny();
    let cur = current.as_slice();

    #[cfg(feature = "rayon")]
    next.as_mut_slice()
        .par_chunks_mut(s)
        .enumerate()
        .skip(1)
        .take(ny)
        .for_each(|(i, out)| {
            update_row(
                &cur[(i - 1) * s..i * s],
                &cur[i * s..(i + 1) * s],
                &cur[(i + 1) * s..(i + 2) * s],
                out,
                alpha,
            )
        });

    #[cfg(not(feature = "rayon"))]
    for (i, out) in next.as_mut_slice().chunks_mut(s).enumerate().skip(1).take(ny) {
        update_row(
            &cur[(i - 1) * s..i * s],
            &cur[i * s..(i + 1) * s],
            &cur[(i + 1) * s..(i + 2) * s],
            out,
            alpha,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn point_source_spreads_to_neighbors() {
        let mut cur: HaloGrid<f64> = HaloGrid::new(3, 3);
        let mut next = HaloGrid::new(3, 3);
        cur[(2, 2)] = 100.0;
        update(&cur, &mut next, 0.1);
        assert_abs_diff_eq!(next[(2, 2)], 60.0, epsilon = 1e-12);
        for (i, j) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
            assert_abs_diff_eq!(next[(i, j)], 10.0, epsilon = 1e-12);
        }
        assert_eq!(next[(1, 1)], 0.0);
    }

    #[test]
    fn ghosts_feed_edges_but_are_not_written() {
        let mut cur: HaloGrid<f64> = HaloGrid::new(2, 1);
        let mut next = HaloGrid::new(2, 1);
        cur[(0, 1)] = 8.0;
        cur[(1, 3)] = 4.0;
        next[(0, 1)] = -1.0;
        update(&cur, &mut next, 0.25);
        assert_abs_diff_eq!(next[(1, 1)], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(next[(1, 2)], 1.0, epsilon = 1e-12);
        assert_eq!(next[(0, 1)], -1.0);
    }

    #[test]
    fn zero_alpha_is_identity() {
        let mut cur: HaloGrid<f32> = HaloGrid::new(4, 3);
        for (k, v) in cur.as_mut_slice().iter_mut().enumerate() {
            *v = (k % 7) as f32;
        }
        let mut next = HaloGrid::new(4, 3);
        update(&cur, &mut next, 0.0);
        assert!(cur.interior().eq(next.interior()));
    }

    #[test]
    fn uniform_field_is_steady() {
        let mut cur: HaloGrid<f64> = HaloGrid::new(3, 3);
        cur.as_mut_slice().fill(2.5);
        let mut next = HaloGrid::new(3, 3);
        update(&cur, &mut next, 0.2);
        assert!(next.interior().all(|v| (v - 2.5).abs() < 1e-12));
    }
}
