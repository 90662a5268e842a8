//! Seeding tests
//!
//! Seed round-trip and the rejection policy for degenerate words: zero and
//! fixed-point words are refused and leave the stream untouched.

use proptest::prelude::*;
use zpic_rng::{InvalidSeedReason, RandomStream, Seed, SeedError, SeedWord};

#[test]
fn test_seed_round_trip() {
    let mut rng = RandomStream::default();
    rng.set_seed(521288629, 362436069).unwrap();

    let (w, z) = rng.get_seed().into();
    assert_eq!((w, z), (521288629, 362436069));
}

#[test]
fn test_default_stream_seed() {
    let rng = RandomStream::default();
    assert_eq!(rng.get_seed(), Seed::DEFAULT);
    assert_eq!(<(u32, u32)>::from(rng.get_seed()), (12345, 67890));
}

#[test]
fn test_zero_seeds_rejected() {
    for (w, z) in [(0, 5), (5, 0), (0, 0)] {
        let mut rng = RandomStream::new(521288629, 362436069).unwrap();
        let before = rng.clone();

        let err = rng.set_seed(w, z).unwrap_err();
        assert!(matches!(
            err,
            SeedError::InvalidSeed {
                reason: InvalidSeedReason::Zero,
                ..
            }
        ));
        assert_eq!(rng, before, "rejected seed ({}, {}) changed the stream", w, z);

        // Stream still produces the reference sequence
        assert_eq!(rng.next_uint32(), 545736098);
    }
}

#[test]
fn test_new_rejects_zero() {
    assert_eq!(
        RandomStream::new(5, 0).unwrap_err(),
        SeedError::InvalidSeed {
            word: SeedWord::Z,
            value: 0,
            reason: InvalidSeedReason::Zero,
        }
    );
}

#[test]
fn test_fixed_point_seeds_rejected() {
    let mut rng = RandomStream::default();
    assert!(rng.set_seed(zpic_rng::rng::W_FIXED_POINT, 1).is_err());
    assert!(rng.set_seed(1, zpic_rng::rng::Z_FIXED_POINT).is_err());
    assert_eq!(rng.get_seed(), Seed::DEFAULT);
}

#[test]
fn test_fixed_point_would_freeze_half_the_output() {
    // The recurrence never leaves its fixed point
    let mut w = zpic_rng::rng::W_FIXED_POINT;
    for _ in 0..10 {
        w = zpic_rng::rng::W_MULTIPLIER
            .wrapping_mul(w & 0xFFFF)
            .wrapping_add(w >> 16);
        assert_eq!(w, zpic_rng::rng::W_FIXED_POINT);
    }
}

#[test]
fn test_seed_error_display() {
    let err = Seed::new(0, 1).unwrap_err();
    assert_eq!(err.to_string(), "Invalid seed: w = 0x00000000 is zero");
}

proptest! {
    #[test]
    fn prop_valid_seed_round_trips(w in 1u32.., z in 1u32..) {
        let mut rng = RandomStream::default();
        match Seed::new(w, z) {
            Ok(seed) => {
                rng.set_seed(w, z).unwrap();
                prop_assert_eq!(rng.get_seed(), seed);
                prop_assert_eq!(<(u32, u32)>::from(rng.get_seed()), (w, z));
            }
            Err(_) => {
                prop_assert!(rng.set_seed(w, z).is_err());
                prop_assert_eq!(rng.get_seed(), Seed::DEFAULT);
            }
        }
    }
}
