//! Run parameters and their validation.
//!
//! `RunOptions` is what the outside world hands the solver: the global grid
//! extent, the worker-grid shape, the number of steps and the diffusion
//! coefficient. It is validated against the actual worker count once, before
//! any field buffer is allocated.

use serde::Serialize;

use crate::decomp::Shape;
use crate::error::{HeatError, Result};

/// Global run parameters (NX NY PX PY steps alpha).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOptions {
    /// Global grid columns
    pub nx: usize,
    /// Global grid rows
    pub ny: usize,
    /// Worker-grid columns
    pub px: usize,
    /// Worker-grid rows
    pub py: usize,
    /// Number of explicit time steps
    pub steps: usize,
    /// Diffusion coefficient (dt/dx² product); stable for alpha <= 0.25
    pub alpha: f64,
}

impl RunOptions {
    pub fn shape(&self) -> Shape {
        Shape::new(self.px, self.py)
    }

    /// Checks the options against the number of workers actually running.
    ///
    /// Every worker runs this before allocating, so all of them agree on the
    /// outcome and nobody is left waiting on a peer that bailed out.
    pub fn validate(&self, workers: usize) -> Result<()> {
        if self.nx == 0 || self.ny == 0 {
            return Err(HeatError::InvalidConfig(format!(
                "grid extent must be positive, got {}x{}",
                self.nx, self.ny
            )));
        }
        if self.px == 0 || self.py == 0 {
            return Err(HeatError::InvalidConfig(format!(
                "worker grid must be positive, got {}x{}",
                self.px, self.py
            )));
        }
        if self.shape().workers() != Some(workers) {
            return Err(HeatError::ShapeMismatch { px: self.px, py: self.py, workers });
        }
        if self.nx < self.px {
            return Err(HeatError::DegeneratePartition {
                axis: 'x',
                cells: self.nx,
                parts: self.px,
            });
        }
        if self.ny < self.py {
            return Err(HeatError::DegeneratePartition {
                axis: 'y',
                cells: self.ny,
                parts: self.py,
            });
        }
        Ok(())
    }
}
