//! Deterministic random number generation
//!
//! Uses Marsaglia's multiply-with-carry generator for uniform draws and the
//! polar Box-Muller method for normal draws.
//! CRITICAL: All randomness in the simulation MUST go through this module.

mod checkpoint;
pub mod global;
mod mwc;
mod seed;

pub use checkpoint::{SnapshotError, StreamSnapshot};
pub use mwc::RandomStream;
pub use seed::{
    InvalidSeedReason, Seed, SeedError, SeedWord, W_FIXED_POINT, W_MULTIPLIER, Z_FIXED_POINT,
    Z_MULTIPLIER,
};
