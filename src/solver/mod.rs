//! Distributed explicit heat solver.
//!
//! Each step of a worker runs, in order: the reflective boundary on global
//! edges ([`boundary`]), the halo exchange with its neighbors ([`exchange`]),
//! the 5-point update into the spare buffer ([`stencil`]) and the buffer swap.
//! After the last step the interior statistics are fanned in to the
//! coordinator ([`reduce`]).

pub mod boundary;
pub mod exchange;
pub mod reduce;
pub mod stencil;

pub mod worker;
pub use worker::{run_worker, HeatWorker, HOTSPOT_TEMPERATURE};

pub use exchange::HaloExchange;
pub use reduce::FieldStats;
