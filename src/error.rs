use thiserror::Error;

// Unified error type for heat2d

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HeatError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("PX * PY must be equal to the number of workers ({px} * {py} != {workers})")]
    ShapeMismatch { px: usize, py: usize, workers: usize },
    #[error("cannot split {cells} cells along {axis} across {parts} workers")]
    DegeneratePartition { axis: char, cells: usize, parts: usize },
    #[error("communication error: {0}")]
    Comm(String),
    #[error("worker group aborted")]
    Aborted,
    #[error("worker {0} panicked")]
    WorkerPanicked(usize),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

pub type Result<T> = std::result::Result<T, HeatError>;
