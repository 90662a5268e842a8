//! Default stream
//!
//! Free functions over the single process-wide [`RandomStream`], seeded with
//! [`Seed::DEFAULT`] at program start. Code that wants the one logical stream
//! without threading a `&mut RandomStream` through every call uses these.
//! Every thread sees the same stream; access is serialized by a mutex.
//!
//! ```
//! use zpic_rng::rng::global;
//!
//! global::set_seed(521288629, 362436069).unwrap();
//! assert_eq!(global::next_uint32(), 545736098);
//! ```

use super::mwc::RandomStream;
use super::seed::{Seed, SeedError};
use std::cell::Cell;
use std::sync::{Mutex, PoisonError};

static DEFAULT_STREAM: Mutex<RandomStream> = Mutex::new(RandomStream::from_seed(Seed::DEFAULT));

thread_local! {
    // Set while this thread holds the default stream
    static IN_STREAM: Cell<bool> = const { Cell::new(false) };
}

/// Clears `IN_STREAM` on drop, including during unwinding
struct ReentryGuard;

impl ReentryGuard {
    fn enter() -> Self {
        if IN_STREAM.with(|flag| flag.replace(true)) {
            panic!("default random stream is already in use on this thread");
        }
        ReentryGuard
    }
}

impl Drop for ReentryGuard {
    fn drop(&mut self) {
        IN_STREAM.with(|flag| flag.set(false));
    }
}

/// Run `f` with exclusive access to the default stream
///
/// Several draws inside one call are never interleaved with draws from other
/// threads. A panic inside `f` poisons the lock; later callers carry on with
/// the stream as it was left.
///
/// # Panics
///
/// If `f` calls back into this module (for example
/// `with_stream(|_| next_uint32())`). A plain mutex would deadlock there
/// instead; the re-entry is detected before locking.
pub fn with_stream<R>(f: impl FnOnce(&mut RandomStream) -> R) -> R {
    let _guard = ReentryGuard::enter();
    let mut stream = DEFAULT_STREAM
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    f(&mut stream)
}

/// Reseed the default stream; see [`RandomStream::set_seed`]
pub fn set_seed(w: u32, z: u32) -> Result<(), SeedError> {
    with_stream(|rng| rng.set_seed(w, z))
}

/// Current words of the default stream
pub fn get_seed() -> Seed {
    with_stream(|rng| rng.get_seed())
}

pub fn next_uint32() -> u32 {
    with_stream(|rng| rng.next_uint32())
}

pub fn next_normal() -> f64 {
    with_stream(|rng| rng.next_normal())
}

/// Put the default stream back to its program-start state
pub fn reset() {
    with_stream(|rng| rng.reseed(Seed::DEFAULT))
}
