//! Marsaglia multiply-with-carry generator
//!
//! Two 16-bit multiply-with-carry generators concatenated into one 32-bit
//! output (Marsaglia, sci.stat.math, 1999):
//!
//! ```text
//! z = 36969 * (z & 0xFFFF) + (z >> 16)
//! w = 18000 * (w & 0xFFFF) + (w >> 16)
//! out = (z << 16) + (w & 0xFFFF)
//! ```
//!
//! The period is about 2^60. Output is bit-exact for a given seed, which
//! makes simulation runs reproducible.
//!
//! # Determinism
//!
//! Same seed → same sequence. Reseeding discards the cached normal deviate
//! so the sequence after [`RandomStream::set_seed`] depends on the seed only.

use super::seed::{mwc_step, Seed, SeedError, W_MULTIPLIER, Z_MULTIPLIER};

/// Scale of the polar method's mapping of a `u32` into (-1, 1)
const POLAR_SCALE: f64 = 2147483649.0;

/// 2^32, maps a `u32` into [0, 1)
const TWO_POW_32: f64 = 4294967296.0;

/// Largest `u32` as `f64`, maps a `u32` into [0, 1]
const U32_MAX_F64: f64 = 4294967295.0;

/// Deterministic random stream
///
/// # Example
/// ```
/// use zpic_rng::RandomStream;
///
/// let mut rng = RandomStream::new(521288629, 362436069).unwrap();
/// assert_eq!(rng.next_uint32(), 545736098);
///
/// let ux = 0.1 * rng.next_normal();
/// assert!(ux.is_finite());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RandomStream {
    w: u32,
    z: u32,

    /// Second deviate of the last polar transform, returned by the next call
    spare_normal: Option<f64>,
}

impl RandomStream {
    /// Create a stream from two seed words
    ///
    /// # Errors
    /// [`SeedError::InvalidSeed`] if either word is zero or a fixed point.
    pub fn new(w: u32, z: u32) -> Result<Self, SeedError> {
        Ok(Self::from_seed(Seed::new(w, z)?))
    }

    /// Create a stream from an already validated seed
    pub const fn from_seed(seed: Seed) -> Self {
        Self {
            w: seed.w(),
            z: seed.z(),
            spare_normal: None,
        }
    }

    /// Overwrite the state words
    ///
    /// On error the stream is left unchanged.
    ///
    /// # Example
    /// ```
    /// use zpic_rng::RandomStream;
    ///
    /// let mut rng = RandomStream::default();
    /// rng.set_seed(1, 2).unwrap();
    /// assert_eq!(rng.get_seed().w(), 1);
    ///
    /// assert!(rng.set_seed(0, 5).is_err());
    /// assert_eq!(rng.get_seed().w(), 1);
    /// ```
    pub fn set_seed(&mut self, w: u32, z: u32) -> Result<(), SeedError> {
        let seed = Seed::new(w, z).map_err(|e| {
            log::warn!("Rejected seed ({}, {}): {}", w, z, e);
            e
        })?;
        self.reseed(seed);
        Ok(())
    }

    /// Overwrite the state with a validated seed
    pub fn reseed(&mut self, seed: Seed) {
        log::debug!("Reseeding random stream: {}", seed);
        self.w = seed.w();
        self.z = seed.z();
        self.spare_normal = None;
    }

    /// Current state words, for checkpointing or provenance
    pub fn get_seed(&self) -> Seed {
        Seed::from_state(self.w, self.z)
    }

    /// Cached normal deviate, if the last polar transform left one
    pub fn spare_normal(&self) -> Option<f64> {
        self.spare_normal
    }

    /// Advance one MWC step and return a uniform value in [0, 2^32 - 1]
    pub fn next_uint32(&mut self) -> u32 {
        self.z = mwc_step(self.z, Z_MULTIPLIER);
        self.w = mwc_step(self.w, W_MULTIPLIER);
        (self.z << 16).wrapping_add(self.w & 0xFFFF)
    }

    /// Uniform `f64` in [0.0, 1.0)
    pub fn next_f64(&mut self) -> f64 {
        self.next_uint32() as f64 / TWO_POW_32
    }

    /// Uniform `f64` in [0.0, 1.0], both ends reachable
    ///
    /// Used for placing particles at random positions inside a box.
    pub fn next_unit_closed(&mut self) -> f64 {
        self.next_uint32() as f64 / U32_MAX_F64
    }

    /// Standard normal deviate (mean 0, standard deviation 1)
    ///
    /// Marsaglia's polar form of the Box-Muller transform. Each accepted
    /// pair of uniforms gives two deviates; the second is cached and
    /// returned by the next call without touching the state words.
    pub fn next_normal(&mut self) -> f64 {
        if let Some(spare) = self.spare_normal.take() {
            return spare;
        }

        let (v1, v2, rsq) = loop {
            // Two uniforms in the open square (-1, 1) x (-1, 1)
            let v1 = (self.next_uint32() as f64 + 0.5) / POLAR_SCALE - 1.0;
            let v2 = (self.next_uint32() as f64 + 0.5) / POLAR_SCALE - 1.0;

            // Keep only points strictly inside the unit circle, excluding the
            // origin where ln(rsq) / rsq is undefined
            let rsq = v1 * v1 + v2 * v2;
            if rsq > 0.0 && rsq < 1.0 {
                break (v1, v2, rsq);
            }
        };

        let fac = (-2.0 * rsq.ln() / rsq).sqrt();
        self.spare_normal = Some(v1 * fac);
        v2 * fac
    }

    /// Normal deviate with the given mean and standard deviation
    ///
    /// # Example
    /// ```
    /// use zpic_rng::RandomStream;
    ///
    /// let mut rng = RandomStream::default();
    /// let uth = 0.05;
    /// let ux = rng.next_normal_scaled(0.0, uth);
    /// assert!(ux.is_finite());
    /// ```
    pub fn next_normal_scaled(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + std_dev * self.next_normal()
    }

    /// Run `f` with the stream temporarily reseeded, then restore it
    ///
    /// The full state is restored afterwards, including any cached normal
    /// deviate, so the outer sequence continues as if `f` never ran.
    ///
    /// # Example
    /// ```
    /// use zpic_rng::{RandomStream, Seed};
    ///
    /// let mut rng = RandomStream::default();
    /// let before = rng.get_seed();
    ///
    /// let positions: Vec<f64> = rng
    ///     .with_seed(Seed::new(7, 11).unwrap(), |r| {
    ///         (0..4).map(|_| r.next_unit_closed()).collect()
    ///     });
    ///
    /// assert_eq!(positions.len(), 4);
    /// assert_eq!(rng.get_seed(), before);
    /// ```
    pub fn with_seed<R>(&mut self, seed: Seed, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.clone();
        self.reseed(seed);
        let result = f(self);
        log::debug!("Restoring random stream: {}", saved.get_seed());
        *self = saved;
        result
    }

    pub(crate) fn set_state(&mut self, seed: Seed, spare_normal: Option<f64>) {
        self.w = seed.w();
        self.z = seed.z();
        self.spare_normal = spare_normal;
    }
}

impl Default for RandomStream {
    fn default() -> Self {
        Self::from_seed(Seed::DEFAULT)
    }
}

impl rand::RngCore for RandomStream {
    fn next_u32(&mut self) -> u32 {
        self.next_uint32()
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
