//! PyO3 wrapper for RandomStream

use pyo3::prelude::*;

use crate::rng::{RandomStream as RustRandomStream, Seed, StreamSnapshot};

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string())
}

/// Python wrapper for Rust RandomStream
///
/// # Example (from Python)
///
/// ```python
/// from zpic_rng import RandomStream
///
/// rng = RandomStream(521288629, 362436069)
/// assert rng.next_uint32() == 545736098
///
/// state = rng.snapshot()
/// ux = uth * rng.next_normal()
/// rng.restore(state)
/// ```
#[pyclass(name = "RandomStream")]
pub struct PyRandomStream {
    inner: RustRandomStream,
}

#[pymethods]
impl PyRandomStream {
    /// Create a stream, seeded with the default pair unless given one
    ///
    /// # Errors
    ///
    /// Raises ValueError if either word is zero or a fixed point
    #[new]
    #[pyo3(signature = (w = Seed::DEFAULT.w(), z = Seed::DEFAULT.z()))]
    fn new(w: u32, z: u32) -> PyResult<Self> {
        let inner = RustRandomStream::new(w, z).map_err(value_error)?;
        Ok(PyRandomStream { inner })
    }

    fn set_seed(&mut self, w: u32, z: u32) -> PyResult<()> {
        self.inner.set_seed(w, z).map_err(value_error)
    }

    /// Current `(w, z)` words
    fn get_seed(&self) -> (u32, u32) {
        self.inner.get_seed().into()
    }

    fn next_uint32(&mut self) -> u32 {
        self.inner.next_uint32()
    }

    fn next_normal(&mut self) -> f64 {
        self.inner.next_normal()
    }

    /// Full state as a JSON string
    fn snapshot(&self) -> PyResult<String> {
        self.inner.snapshot().to_json().map_err(value_error)
    }

    /// Restore state from a string produced by `snapshot()`
    fn restore(&mut self, state: &str) -> PyResult<()> {
        let snapshot = StreamSnapshot::from_json(state).map_err(value_error)?;
        self.inner.restore(&snapshot).map_err(value_error)
    }

    fn __repr__(&self) -> String {
        format!("RandomStream(seed={})", self.inner.get_seed())
    }
}
