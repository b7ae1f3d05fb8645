//! Noise tables for the white and pink noise waveforms.
//!
//! The table holds 32 values spread across one oscillator period and is
//! redrawn every time the phase wraps, so noise "pitch" follows the period.

use crate::params::WaveType;
use crate::rng::RandomSource;

/// Entries in the per-period noise table.
pub const NOISE_TABLE_LEN: usize = 32;

/// Registers summed by the pink noise generator.
pub const PINK_REGISTERS: usize = 5;

/// Voss-style pink noise: a 5-bit counter selects which white registers are
/// redrawn on each step, so low registers change often and high ones rarely.
#[derive(Debug, Clone, Default)]
pub struct PinkNoise {
    counter: u32,
    white: [f32; PINK_REGISTERS],
}

impl PinkNoise {
    /// Zeroes the counter and draws fresh registers.
    pub fn reset<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        self.counter = 0;
        for w in &mut self.white {
            *w = rng.frnd(1.0);
        }
    }

    /// Next value in [-1, 1].
    pub fn next_value<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> f32 {
        let last = self.counter;
        let next = if last >= 0x1f { 0 } else { last + 1 };
        let changed = last ^ next;
        self.counter = next;

        let mut sum = 0.0f32;
        for (bit, w) in self.white.iter_mut().enumerate() {
            if changed & (1 << bit) != 0 {
                *w = rng.frnd(1.0);
            }
            sum += *w;
        }
        (sum / PINK_REGISTERS as f32) * 2.0 - 1.0
    }
}

/// Per-period noise lookup table.
#[derive(Debug, Clone, Default)]
pub struct NoiseTable {
    values: [f32; NOISE_TABLE_LEN],
    pink: PinkNoise,
}

impl NoiseTable {
    /// Prepares the table at the start of a generation.
    pub fn reset<R: RandomSource + ?Sized>(&mut self, wave: WaveType, rng: &mut R) {
        self.values = [0.0; NOISE_TABLE_LEN];
        if wave == WaveType::PinkNoise {
            self.pink.reset(rng);
        }
        self.refill(wave, rng);
    }

    /// Redraws the table. Does nothing for tonal waveforms.
    pub fn refill<R: RandomSource + ?Sized>(&mut self, wave: WaveType, rng: &mut R) {
        match wave {
            WaveType::Noise => {
                for v in &mut self.values {
                    *v = rng.rnd_np1();
                }
            }
            WaveType::PinkNoise => {
                for v in &mut self.values {
                    *v = self.pink.next_value(rng);
                }
            }
            _ => {}
        }
    }

    /// Value for `phase` within a `period`-sample cycle.
    #[inline]
    pub fn lookup(&self, phase: u32, period: u32) -> f32 {
        let index = (phase as u64 * NOISE_TABLE_LEN as u64 / period as u64) as usize;
        self.values[index.min(NOISE_TABLE_LEN - 1)]
    }
}
