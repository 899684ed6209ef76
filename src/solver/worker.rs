//! One worker's share of a distributed run.

use tracing::{debug, error, info, trace};

use crate::config::{RunOptions, WorkerConfig};
use crate::error::{HeatError, Result};
use crate::grid::{DoubleBuffer, HaloGrid};
use crate::parallel::Comm;

use super::boundary::apply_reflective;
use super::exchange::HaloExchange;
use super::reduce::{local_stats, reduce_to_coordinator, FieldStats};
use super::stencil;

/// Initial temperature of global cell (0, 0); every other cell starts at 0.0.
pub const HOTSPOT_TEMPERATURE: f64 = 100.0;

/// A worker owning one sub-grid, its double buffer and its communicator.
pub struct HeatWorker<C> {
    config: WorkerConfig,
    comm: C,
    field: DoubleBuffer<f64>,
    halo: HaloExchange,
    alpha: f64,
    steps_done: usize,
}

impl<C: Comm> HeatWorker<C> {
    /// Validates the run against the group size and allocates the field.
    ///
    /// Nothing is allocated when validation fails.
    pub fn new(opts: &RunOptions, comm: C) -> Result<Self> {
        let config = WorkerConfig::new(opts, comm.rank(), comm.size())?;
        let (nx, ny) = (config.extent.nx, config.extent.ny);
        debug!(
            id = config.id,
            px = config.coord.px,
            py = config.coord.py,
            nx,
            ny,
            x0 = config.offset.x,
            y0 = config.offset.y,
            "worker layout"
        );
        let mut field = DoubleBuffer::new(nx, ny);
        if config.is_coordinator() {
            field.current_mut()[(1, 1)] = HOTSPOT_TEMPERATURE;
        }
        Ok(HeatWorker {
            halo: HaloExchange::new(ny),
            config,
            comm,
            field,
            alpha: opts.alpha,
            steps_done: 0,
        })
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    pub fn comm(&self) -> &C {
        &self.comm
    }

    /// The current field, ghosts included.
    pub fn field(&self) -> &HaloGrid<f64> {
        self.field.current()
    }

    pub fn steps_done(&self) -> usize {
        self.steps_done
    }

    /// Advances the local field by one time step.
    ///
    /// Boundary condition, halo exchange, stencil, swap. The stencil does not
    /// start before all four exchanges of this worker have completed.
    pub fn step(&mut self) -> Result<()> {
        let neighbors = self.config.neighbors;
        let current = self.field.current_mut();
        apply_reflective(current, neighbors.physical_sides());
        self.halo.exchange(&self.comm, &neighbors, current)?;

        let (current, next) = self.field.split();
        stencil::update(current, next, self.alpha);
        self.field.swap();
        self.steps_done += 1;
        trace!(id = self.config.id, step = self.steps_done, "step complete");
        Ok(())
    }

    pub fn run(&mut self, steps: usize) -> Result<()> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    /// Reduces the final field; `Some` on the coordinator only.
    pub fn reduce(&self) -> Result<Option<FieldStats>> {
        reduce_to_coordinator(&self.comm, local_stats(self.field.current()))
    }
}

/// Runs one worker end to end: setup, `opts.steps` steps and the reduction.
///
/// Configuration errors are detected identically on every worker, so the
/// group shuts down without blocking and only the coordinator reports them.
/// Any failure after setup aborts the whole group, since peers would
/// otherwise wait forever on this worker's halo.
pub fn run_worker<C: Comm>(opts: &RunOptions, comm: C) -> Result<Option<FieldStats>> {
    let rank = comm.rank();
    let mut worker = match HeatWorker::new(opts, comm) {
        Ok(w) => w,
        Err(e) => {
            if rank == crate::config::worker::COORDINATOR {
                error!("{e}");
            }
            return Err(e);
        }
    };

    if worker.config().is_coordinator() {
        info!(
            nx = opts.nx,
            ny = opts.ny,
            px = opts.px,
            py = opts.py,
            steps = opts.steps,
            alpha = opts.alpha,
            "starting run"
        );
    }

    let outcome = worker.run(opts.steps).and_then(|_| worker.reduce());
    match outcome {
        Ok(stats) => {
            if let Some(stats) = &stats {
                info!(sum = stats.sum, max = stats.max, "run complete");
            }
            Ok(stats)
        }
        Err(e) => {
            match e {
                HeatError::Aborted => debug!(id = rank, "released by group abort"),
                _ => error!(id = rank, "{e}"),
            }
            worker.comm().abort();
            Err(e)
        }
    }
}
