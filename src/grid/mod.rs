//! Local field storage: a halo-padded sub-grid and the double-buffer pair.

pub mod halo;
pub use halo::HaloGrid;

pub mod buffers;
pub use buffers::DoubleBuffer;
