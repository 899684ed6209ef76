//! Group launchers: start every worker of a run and collect the result.

use std::panic::{self, AssertUnwindSafe};
use std::thread;

use crate::config::RunOptions;
use crate::config::worker::COORDINATOR;
use crate::error::{HeatError, Result};
use crate::parallel::{Comm, LocalComm};
use crate::solver::{run_worker, FieldStats};

/// Runs `workers` workers as threads of this process and returns the
/// coordinator's global statistics.
///
/// `workers` plays the role of the process count of an MPI launch: a run whose
/// `px * py` differs from it is rejected. When several workers fail, the
/// first error that is not a mere consequence of the group abort is returned.
pub fn run_local(opts: &RunOptions, workers: usize) -> Result<FieldStats> {
    if workers == 0 {
        let e = HeatError::InvalidConfig("at least one worker is required".to_string());
        tracing::error!("{e}");
        return Err(e);
    }
    // Reject bad layouts before spawning anything sized by `workers`.
    if let Err(e) = opts.validate(workers) {
        tracing::error!("{e}");
        return Err(e);
    }
    #[cfg(feature = "rayon")]
    crate::parallel::init_thread_pool(workers);

    let results: Vec<Result<Option<FieldStats>>> = thread::scope(|s| {
        let handles: Vec<_> = LocalComm::universe(workers)
            .into_iter()
            .map(|comm| {
                s.spawn(move || {
                    let rank = comm.rank();
                    panic::catch_unwind(AssertUnwindSafe(|| run_worker(opts, &comm)))
                        .unwrap_or_else(|_| {
                            comm.abort();
                            Err(HeatError::WorkerPanicked(rank))
                        })
                })
            })
            .collect();
        handles
            .into_iter()
            .enumerate()
            .map(|(rank, h)| h.join().unwrap_or(Err(HeatError::WorkerPanicked(rank))))
            .collect()
    });

    let mut errors: Vec<HeatError> = Vec::new();
    let mut global = None;
    for (rank, result) in results.into_iter().enumerate() {
        match result {
            Ok(Some(stats)) if rank == COORDINATOR => global = Some(stats),
            Ok(_) => {}
            Err(e) => errors.push(e),
        }
    }
    if let Some(root) = errors.iter().find(|e| **e != HeatError::Aborted).or(errors.first()) {
        return Err(root.clone());
    }
    global.ok_or_else(|| HeatError::Comm("coordinator produced no result".to_string()))
}

/// Runs this process's worker of an MPI job.
///
/// Returns `Some(stats)` on the coordinator and `None` everywhere else.
#[cfg(feature = "mpi")]
pub fn run_mpi(opts: &RunOptions) -> Result<Option<FieldStats>> {
    let comm = crate::parallel::MpiComm::new()?;
    run_worker(opts, comm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_run_without_steps_keeps_hotspot() {
        let opts = RunOptions { nx: 5, ny: 4, px: 2, py: 2, steps: 0, alpha: 0.1 };
        let stats = run_local(&opts, 4).unwrap();
        assert_eq!(stats, FieldStats { sum: 100.0, max: 100.0 });
    }

    #[test]
    fn local_run_rejects_wrong_worker_count() {
        let opts = RunOptions { nx: 4, ny: 4, px: 2, py: 2, steps: 3, alpha: 0.1 };
        assert_eq!(
            run_local(&opts, 3),
            Err(HeatError::ShapeMismatch { px: 2, py: 2, workers: 3 })
        );
    }

    #[test]
    fn local_run_rejects_overflowing_shape() {
        let opts = RunOptions { nx: 4, ny: 4, px: usize::MAX, py: 2, steps: 1, alpha: 0.1 };
        assert_eq!(
            run_local(&opts, 4),
            Err(HeatError::ShapeMismatch { px: usize::MAX, py: 2, workers: 4 })
        );
    }
}
