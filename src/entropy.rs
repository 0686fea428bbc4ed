//! Seeding and pseudo-random numbers
//!
//! [`entropy_seed`] mixes two noisy readings with the microsecond counter.
//! [`Rng`] is a small xorshift generator meant for gameplay, not for
//! anything security related.

use crate::clock::Clock;

/// Source of noisy low-level readings, such as floating ADC channels
pub trait RandomEntropySource {
    /// Take one reading
    fn sample(&mut self) -> u16;
}

impl<E: RandomEntropySource + ?Sized> RandomEntropySource for &mut E {
    fn sample(&mut self) -> u16 {
        (**self).sample()
    }
}

/// Mix two entropy samples with the elapsed-time counter into a seed
///
/// Computes `!s0 * !s1 * !micros + micros` with wrapping arithmetic, reading
/// the microsecond counter twice so the time spent multiplying adds jitter.
pub fn entropy_seed<E, C>(source: &mut E, clock: &mut C) -> u32
where
    E: RandomEntropySource + ?Sized,
    C: Clock + ?Sized,
{
    let first = !u32::from(source.sample());
    let second = !u32::from(source.sample());
    first
        .wrapping_mul(second)
        .wrapping_mul(!clock.micros())
        .wrapping_add(clock.micros())
}

const FALLBACK_SEED: u32 = 0x9E37_79B9;

/// xorshift32 generator
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rng {
    state: u32,
}

impl Rng {
    /// Create a generator from `seed`
    ///
    /// Zero is a fixed point of xorshift and is replaced by a constant.
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { FALLBACK_SEED } else { seed },
        }
    }

    /// Reseed in place
    pub fn seed(&mut self, seed: u32) {
        *self = Self::new(seed);
    }

    /// Next raw value
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Value in `0..max`, or 0 when `max` is 0
    pub fn random(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }

    /// Value in `min..max`, or `min` when the range is empty
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn random_range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = max.wrapping_sub(min) as u32;
        min.wrapping_add(self.random(span) as i32)
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(FALLBACK_SEED)
    }
}
