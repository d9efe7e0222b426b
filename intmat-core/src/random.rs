//! Sources of uniformly distributed integers used to populate matrices.

/// Lower bound (inclusive) of values written by `populate_random`.
pub const RANDOM_MIN: i32 = 1;
/// Upper bound (inclusive) of values written by `populate_random`.
pub const RANDOM_MAX: i32 = 10;

/// A source of uniform integers.
///
/// Implementations must return values in `low..=high`; callers guarantee
/// `low <= high`.
pub trait RandomSource {
    fn next_in_range(&mut self, low: i32, high: i32) -> i32;
}

impl RandomSource for fastrand::Rng {
    fn next_in_range(&mut self, low: i32, high: i32) -> i32 {
        self.i32(low..=high)
    }
}

/// Handle on the calling thread's `fastrand` generator.
///
/// Each thread owns its own generator state, so populating matrices from
/// several threads needs no locking.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRng;

impl RandomSource for ThreadRng {
    fn next_in_range(&mut self, low: i32, high: i32) -> i32 {
        fastrand::i32(low..=high)
    }
}
