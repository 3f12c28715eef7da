//! Secure random source, abstracted so the pipeline can be driven
//! deterministically in tests.

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

/// Randomness consumed by the pipeline and the seed endpoint.
///
/// `below` and `index` must be uniform and are only called with positive
/// bounds. Implementations must be usable from independent pipeline
/// executions running concurrently.
pub trait EntropySource {
    /// Uniform integer in `[0, bound)`. `bound` must be positive.
    fn below(&mut self, bound: u64) -> u64;

    /// Uniform index in `[0, len)`. `len` must be positive.
    fn index(&mut self, len: usize) -> usize;

    /// Uniformly permute `items` in place.
    ///
    /// The permutation does not need a cryptographic generator; any
    /// correct uniform shuffle is acceptable.
    fn shuffle(&mut self, items: &mut [u8]);

    /// 64 fresh random bits.
    fn bits64(&mut self) -> u64;
}

/// Entropy drawn from the operating system CSPRNG.
///
/// Stateless; independent pipeline runs share nothing through it.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn below(&mut self, bound: u64) -> u64 {
        OsRng.gen_range(0..bound)
    }

    fn index(&mut self, len: usize) -> usize {
        OsRng.gen_range(0..len)
    }

    fn shuffle(&mut self, items: &mut [u8]) {
        items.shuffle(&mut rand::thread_rng());
    }

    fn bits64(&mut self) -> u64 {
        OsRng.next_u64()
    }
}
