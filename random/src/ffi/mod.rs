//! FFI (Foreign Function Interface) module
//!
//! PyO3 bindings for driving the random stream from Python scripts.
//!
//! # Design Principles
//!
//! 1. **Minimal boundary**: Only the stream operations cross it
//! 2. **Simple types**: Integers, floats, tuples and JSON strings
//! 3. **Safe errors**: Seed and snapshot errors become `ValueError`

pub mod stream;
