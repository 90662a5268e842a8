//! Checkpoint - Save/Restore Stream State
//!
//! A [`StreamSnapshot`] captures everything that determines the future output
//! of a [`RandomStream`]: both state words and the cached normal deviate.
//! Restoring a snapshot continues the exact sequence of the original stream,
//! which is what a simulation restart needs.
//!
//! # Critical Invariants
//!
//! - **Determinism**: restored stream produces the same draws as the original
//! - **Integrity**: a snapshot whose checksum does not match is rejected
//! - **Validity**: a snapshot can never put a zero word or a non-finite
//!   cached deviate into a stream

use super::mwc::RandomStream;
use super::seed::{Seed, SeedError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors from saving or restoring a snapshot
#[derive(Debug, Error, PartialEq)]
pub enum SnapshotError {
    #[error("Snapshot holds an invalid seed: {0}")]
    InvalidSeed(#[from] SeedError),

    #[error("Snapshot holds a non-finite cached deviate: {0}")]
    InvalidSpare(f64),

    #[error("Snapshot checksum mismatch: expected {expected}, found {found}")]
    ChecksumMismatch { expected: String, found: String },

    #[error("Snapshot serialization failed: {0}")]
    Serialization(String),
}

/// Complete stream state at a point in time
///
/// The cached deviate is stored as raw IEEE-754 bits so that it survives a
/// round trip through JSON exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSnapshot {
    pub w: u32,
    pub z: u32,

    /// Bits of the cached normal deviate, if any
    pub spare_normal_bits: Option<u64>,

    /// SHA256 hex digest of the fields above
    pub checksum: String,
}

impl StreamSnapshot {
    fn new(w: u32, z: u32, spare_normal: Option<f64>) -> Self {
        let spare_normal_bits = spare_normal.map(f64::to_bits);
        Self {
            w,
            z,
            spare_normal_bits,
            checksum: compute_state_checksum(w, z, spare_normal_bits),
        }
    }

    /// Check the checksum, the seed words and the cached deviate
    ///
    /// The checksum only catches accidental corruption; the state itself is
    /// always checked, so a snapshot cannot make `next_normal` return NaN.
    pub fn validate(&self) -> Result<Seed, SnapshotError> {
        let expected = compute_state_checksum(self.w, self.z, self.spare_normal_bits);
        if expected != self.checksum {
            return Err(SnapshotError::ChecksumMismatch {
                expected,
                found: self.checksum.clone(),
            });
        }

        let seed = Seed::new(self.w, self.z)?;

        if let Some(spare) = self.spare_normal() {
            if !spare.is_finite() {
                return Err(SnapshotError::InvalidSpare(spare));
            }
        }

        Ok(seed)
    }

    /// Cached deviate decoded from its bits
    pub fn spare_normal(&self) -> Option<f64> {
        self.spare_normal_bits.map(f64::from_bits)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::Serialization(e.to_string()))
    }
}

impl RandomStream {
    /// Capture the full stream state
    ///
    /// # Example
    /// ```
    /// use zpic_rng::RandomStream;
    ///
    /// let mut rng = RandomStream::default();
    /// rng.next_normal();
    ///
    /// let snapshot = rng.snapshot();
    /// let expected = rng.next_normal();
    ///
    /// let mut restored = RandomStream::default();
    /// restored.restore(&snapshot).unwrap();
    /// assert_eq!(restored.next_normal(), expected);
    /// ```
    pub fn snapshot(&self) -> StreamSnapshot {
        let seed = self.get_seed();
        StreamSnapshot::new(seed.w(), seed.z(), self.spare_normal())
    }

    /// Replace the stream state with a snapshot
    ///
    /// On error the stream is left unchanged.
    pub fn restore(&mut self, snapshot: &StreamSnapshot) -> Result<(), SnapshotError> {
        let seed = snapshot.validate().map_err(|e| {
            log::warn!("Rejected stream snapshot: {}", e);
            e
        })?;

        log::debug!("Restoring random stream from snapshot: {}", seed);
        self.set_state(seed, snapshot.spare_normal());
        Ok(())
    }
}

/// SHA256 over the little-endian bytes of the state fields
fn compute_state_checksum(w: u32, z: u32, spare_normal_bits: Option<u64>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(w.to_le_bytes());
    hasher.update(z.to_le_bytes());
    match spare_normal_bits {
        Some(bits) => {
            hasher.update([1u8]);
            hasher.update(bits.to_le_bytes());
        }
        None => hasher.update([0u8]),
    }
    format!("{:x}", hasher.finalize())
}
