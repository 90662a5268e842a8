//! Seed pair for the multiply-with-carry generator
//!
//! The generator state is two 32-bit words, `w` and `z`. Each word runs its
//! own 16-bit MWC recurrence, so each word has two values that break it:
//!
//! - `0` never changes and leaves that half of the output at zero
//! - the recurrence's fixed point (`multiplier * 2^16 - 1`) maps to itself,
//!   and so does anything that steps onto it
//!
//! A [`Seed`] can only be built from words that avoid both. Once a word has
//! been stepped its high half is at most the multiplier, and from there the
//! recurrence never reaches zero or the fixed point, so checking the seed is
//! enough.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Multiplier of the `w` recurrence
pub const W_MULTIPLIER: u32 = 18000;

/// Multiplier of the `z` recurrence
pub const Z_MULTIPLIER: u32 = 36969;

/// Fixed point of the `w` recurrence (`18000 * 2^16 - 1`)
pub const W_FIXED_POINT: u32 = 0x464F_FFFF;

/// Fixed point of the `z` recurrence (`36969 * 2^16 - 1`)
pub const Z_FIXED_POINT: u32 = 0x9068_FFFF;

/// Which half of the seed pair an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedWord {
    W,
    Z,
}

impl fmt::Display for SeedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedWord::W => write!(f, "w"),
            SeedWord::Z => write!(f, "z"),
        }
    }
}

/// Why a seed word was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidSeedReason {
    Zero,
    FixedPoint,
}

impl fmt::Display for InvalidSeedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidSeedReason::Zero => write!(f, "zero"),
            InvalidSeedReason::FixedPoint => write!(f, "trapped by the recurrence's fixed point"),
        }
    }
}

/// Errors from seeding
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SeedError {
    #[error("Invalid seed: {word} = {value:#010x} is {reason}")]
    InvalidSeed {
        word: SeedWord,
        value: u32,
        reason: InvalidSeedReason,
    },
}

/// Validated `(w, z)` seed pair
///
/// # Example
/// ```
/// use zpic_rng::Seed;
///
/// let seed = Seed::new(521288629, 362436069).unwrap();
/// assert_eq!(seed.w(), 521288629);
/// assert_eq!(<(u32, u32)>::from(seed), (521288629, 362436069));
///
/// assert!(Seed::new(0, 5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSeed", into = "RawSeed")]
pub struct Seed {
    w: u32,
    z: u32,
}

impl Seed {
    /// Seed used by a stream that was never explicitly seeded
    pub const DEFAULT: Seed = Seed { w: 12345, z: 67890 };

    /// Create a seed pair, rejecting zero and fixed-point words
    pub fn new(w: u32, z: u32) -> Result<Self, SeedError> {
        check_word(SeedWord::W, w)?;
        check_word(SeedWord::Z, z)?;
        Ok(Self { w, z })
    }

    pub const fn w(&self) -> u32 {
        self.w
    }

    pub const fn z(&self) -> u32 {
        self.z
    }

    /// Wrap words taken from a running stream, which are valid by construction
    pub(crate) fn from_state(w: u32, z: u32) -> Self {
        Self { w, z }
    }
}

/// One step of a single 16-bit multiply-with-carry recurrence
#[inline]
pub(crate) fn mwc_step(x: u32, multiplier: u32) -> u32 {
    multiplier.wrapping_mul(x & 0xFFFF).wrapping_add(x >> 16)
}

impl Default for Seed {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.w, self.z)
    }
}

impl From<Seed> for (u32, u32) {
    fn from(seed: Seed) -> Self {
        (seed.w, seed.z)
    }
}

impl TryFrom<(u32, u32)> for Seed {
    type Error = SeedError;

    fn try_from((w, z): (u32, u32)) -> Result<Self, Self::Error> {
        Seed::new(w, z)
    }
}

/// Unvalidated wire form, so deserialized seeds go through [`Seed::new`]
#[derive(Serialize, Deserialize)]
struct RawSeed {
    w: u32,
    z: u32,
}

impl TryFrom<RawSeed> for Seed {
    type Error = SeedError;

    fn try_from(raw: RawSeed) -> Result<Self, Self::Error> {
        Seed::new(raw.w, raw.z)
    }
}

impl From<Seed> for RawSeed {
    fn from(seed: Seed) -> Self {
        RawSeed {
            w: seed.w,
            z: seed.z,
        }
    }
}

fn check_word(word: SeedWord, value: u32) -> Result<(), SeedError> {
    let (multiplier, fixed_point) = match word {
        SeedWord::W => (W_MULTIPLIER, W_FIXED_POINT),
        SeedWord::Z => (Z_MULTIPLIER, Z_FIXED_POINT),
    };

    let reason = if value == 0 {
        InvalidSeedReason::Zero
    } else if value == fixed_point || mwc_step(value, multiplier) == fixed_point {
        InvalidSeedReason::FixedPoint
    } else {
        return Ok(());
    };

    Err(SeedError::InvalidSeed {
        word,
        value,
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_points_map_to_themselves() {
        assert_eq!(mwc_step(W_FIXED_POINT, W_MULTIPLIER), W_FIXED_POINT);
        assert_eq!(mwc_step(Z_FIXED_POINT, Z_MULTIPLIER), Z_FIXED_POINT);
    }

    #[test]
    fn test_word_stepping_onto_fixed_point_rejected() {
        // 35999 * 2^16 + 65534 -> 18000 * 65534 + 35999 = W_FIXED_POINT
        let preimage = 0x8C9F_FFFE;
        assert_eq!(mwc_step(preimage, W_MULTIPLIER), W_FIXED_POINT);
        assert_eq!(
            Seed::new(preimage, 1),
            Err(SeedError::InvalidSeed {
                word: SeedWord::W,
                value: preimage,
                reason: InvalidSeedReason::FixedPoint,
            })
        );
    }

    #[test]
    fn test_zero_words_rejected() {
        assert_eq!(
            Seed::new(0, 5),
            Err(SeedError::InvalidSeed {
                word: SeedWord::W,
                value: 0,
                reason: InvalidSeedReason::Zero,
            })
        );
        assert_eq!(
            Seed::new(5, 0),
            Err(SeedError::InvalidSeed {
                word: SeedWord::Z,
                value: 0,
                reason: InvalidSeedReason::Zero,
            })
        );
        // w is checked first
        assert!(matches!(
            Seed::new(0, 0),
            Err(SeedError::InvalidSeed {
                word: SeedWord::W,
                ..
            })
        ));
    }

    #[test]
    fn test_fixed_point_words_rejected() {
        let err = Seed::new(W_FIXED_POINT, 1).unwrap_err();
        assert_eq!(
            err,
            SeedError::InvalidSeed {
                word: SeedWord::W,
                value: W_FIXED_POINT,
                reason: InvalidSeedReason::FixedPoint,
            }
        );
        assert!(Seed::new(1, Z_FIXED_POINT).is_err());

        // Each fixed point is only degenerate for its own word
        assert!(Seed::new(Z_FIXED_POINT, W_FIXED_POINT).is_ok());
    }

    #[test]
    fn test_error_message() {
        let err = Seed::new(7, 0).unwrap_err();
        assert_eq!(err.to_string(), "Invalid seed: z = 0x00000000 is zero");
    }

    #[test]
    fn test_display_and_tuple() {
        let seed = Seed::DEFAULT;
        assert_eq!(seed.to_string(), "12345:67890");
        assert_eq!(<(u32, u32)>::from(seed), (12345, 67890));
        assert_eq!(Seed::try_from((12345, 67890)), Ok(seed));
    }

    #[test]
    fn test_serde_validates() {
        let seed: Seed = serde_json::from_str(r#"{"w": 1, "z": 2}"#).unwrap();
        assert_eq!((seed.w(), seed.z()), (1, 2));

        let json = serde_json::to_string(&seed).unwrap();
        assert_eq!(json, r#"{"w":1,"z":2}"#);

        assert!(serde_json::from_str::<Seed>(r#"{"w": 0, "z": 2}"#).is_err());
    }
}
