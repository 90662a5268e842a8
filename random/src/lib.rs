//! ZPIC random number source
//!
//! Deterministic, reseedable pseudo-random numbers for particle-in-cell
//! simulation: uniform 32-bit draws from a multiply-with-carry generator and
//! standard normal draws for thermal velocity sampling.
//!
//! # Architecture
//!
//! - **rng**: Seed validation, the generator, snapshots, process-wide default stream
//! - **ffi**: Python bindings (feature `pyo3`)
//!
//! # Critical Invariants
//!
//! 1. Same seed → same sequence, bit for bit
//! 2. No state word is ever zero or stuck on a fixed point
//! 3. Normal draws never return NaN or infinity

pub mod rng;

// Re-exports for convenience
pub use rng::{
    InvalidSeedReason, RandomStream, Seed, SeedError, SeedWord, SnapshotError, StreamSnapshot,
};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn zpic_rng(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::stream::PyRandomStream>()?;
    Ok(())
}
