//! Random source contract and the PCG32 implementation.
//!
//! Every draw the engine and the parameter generators make goes through a
//! caller-owned [`RandomSource`], so a sound is reproducible from its seed.
//! The noise tables consume draws during generation; a source must not be
//! shared between generations running at the same time.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Bounded, seedable integer draws.
pub trait RandomSource {
    /// Returns a uniform integer in `[0, range)`. A range of 0 yields 0.
    fn next(&mut self, range: u32) -> u32;

    /// Restarts the sequence from `seed`.
    fn seed(&mut self, seed: u32);

    /// Returns a float in `[0, range]` (both inclusive) on a 1/10000 grid.
    fn frnd(&mut self, range: f32) -> f32 {
        self.next(10001) as f32 / 10000.0 * range
    }

    /// Returns a float in `[-1, 1]` (both inclusive) on a 1/10000 grid.
    fn rnd_np1(&mut self) -> f32 {
        self.next(20001) as f32 / 10000.0 - 1.0
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next(&mut self, range: u32) -> u32 {
        (**self).next(range)
    }

    fn seed(&mut self, seed: u32) {
        (**self).seed(seed)
    }
}

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves, as required by PCG32's state initialization.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// [`RandomSource`] backed by PCG32.
#[derive(Debug, Clone)]
pub struct PcgSource {
    inner: Pcg32,
}

impl PcgSource {
    /// Creates a source seeded with `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            inner: create_rng(seed),
        }
    }

    /// Creates a source from a fresh entropy-derived seed, returning the seed
    /// so it can be stored in [`crate::ParameterSet::rand_seed`].
    pub fn from_entropy() -> (Self, u32) {
        let seed = loop {
            let s: u32 = rand::random();
            // 0 marks an unseeded parameter set
            if s != 0 {
                break s;
            }
        };
        (Self::new(seed), seed)
    }
}

impl RandomSource for PcgSource {
    fn next(&mut self, range: u32) -> u32 {
        if range == 0 {
            return 0;
        }
        self.inner.gen_range(0..range)
    }

    fn seed(&mut self, seed: u32) {
        self.inner = create_rng(seed);
    }
}

/// Derives the seed of the `index`-th variation of a base seed.
///
/// Uses BLAKE3 over the little-endian base seed and index, producing
/// independent streams for batches of generated sounds. Never returns 0.
pub fn derive_variation_seed(base_seed: u32, index: u32) -> u32 {
    let mut input = [0u8; 8];
    input[..4].copy_from_slice(&base_seed.to_le_bytes());
    input[4..].copy_from_slice(&index.to_le_bytes());

    let hash = blake3::hash(&input);
    let bytes = hash.as_bytes();
    let seed = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    seed.max(1)
}
