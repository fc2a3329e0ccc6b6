//! Where the RND instruction gets its bytes from.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of random bytes. Tests inject a fixed sequence,
/// everything else uses an [`RngSource`].
pub trait RandomSource {
    fn next_byte(&mut self) -> u8;
}

/// Adapts any `rand` generator.
pub struct RngSource<R: Rng>(R);

impl RngSource<StdRng> {

    pub fn from_entropy() -> Self {
        RngSource(StdRng::from_entropy())
    }

    /// Same seed, same bytes.
    pub fn seeded(seed: u64) -> Self {
        RngSource(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_byte(&mut self) -> u8 {
        self.0.gen()
    }
}

/// Repeats the given bytes forever.
pub struct Sequence {
    bytes: Vec<u8>,
    next: usize,
}

impl Sequence {
    pub fn new(bytes: Vec<u8>) -> Sequence {
        Sequence { bytes, next: 0 }
    }
}

impl RandomSource for Sequence {
    fn next_byte(&mut self) -> u8 {
        if self.bytes.is_empty() {
            return 0;
        }
        let byte = self.bytes[self.next];
        self.next = (self.next + 1) % self.bytes.len();
        byte
    }
}
