//! Static near-equal partitioning of the global grid.
//!
//! Along each axis `n` cells are split over `parts` workers as
//! `n / parts` each, with the `n % parts` leftover cells handed one apiece
//! to the lowest-indexed workers. When `n < parts` the trailing workers get
//! zero cells; run validation rejects such layouts before allocation.

/// Interior cell count of one worker's sub-grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub nx: usize,
    pub ny: usize,
}

/// Global index of a worker's first interior column (`x`) and row (`y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    pub x: usize,
    pub y: usize,
}

/// Number of cells owned by worker `index` out of `parts` along an axis of `n` cells.
pub fn partition(n: usize, parts: usize, index: usize) -> usize {
    let base = n / parts;
    let rem = n % parts;
    base + usize::from(index < rem)
}

/// Global index of the first cell owned by worker `index`.
pub fn offset(n: usize, parts: usize, index: usize) -> usize {
    let base = n / parts;
    let rem = n % parts;
    index * base + index.min(rem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remainder_goes_to_lowest_indices() {
        let sizes: Vec<usize> = (0..3).map(|i| partition(10, 3, i)).collect();
        assert_eq!(sizes, vec![4, 3, 3]);
        let offsets: Vec<usize> = (0..3).map(|i| offset(10, 3, i)).collect();
        assert_eq!(offsets, vec![0, 4, 7]);
    }

    #[test]
    fn partition_is_complete() {
        for n in 0..40 {
            for parts in 1..9 {
                let total: usize = (0..parts).map(|i| partition(n, parts, i)).sum();
                assert_eq!(total, n, "n = {n}, parts = {parts}");
            }
        }
    }

    #[test]
    fn offsets_tile_the_axis() {
        for n in 1..30 {
            for parts in 1..7 {
                for i in 0..parts {
                    assert_eq!(
                        offset(n, parts, i) + partition(n, parts, i),
                        offset(n, parts, i + 1)
                    );
                }
                assert_eq!(offset(n, parts, parts), n);
            }
        }
    }

    #[test]
    fn no_starvation_when_cells_cover_workers() {
        for n in 1..25 {
            for parts in 1..=n {
                assert!((0..parts).all(|i| partition(n, parts, i) >= 1));
            }
        }
    }

    #[test]
    fn fewer_cells_than_workers_leaves_trailing_workers_empty() {
        let sizes: Vec<usize> = (0..5).map(|i| partition(3, 5, i)).collect();
        assert_eq!(sizes, vec![1, 1, 1, 0, 0]);
    }
}
