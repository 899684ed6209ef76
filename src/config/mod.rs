//! Run configuration: user-facing options and the per-worker view derived from them.

pub mod options;
pub use options::RunOptions;

pub mod worker;
pub use worker::WorkerConfig;
