//! Phaser: a feed-forward comb over a 1024-sample ring.

use crate::params::ParameterSet;

/// Ring length in samples.
pub const PHASER_LEN: usize = 1024;

const PHASER_MASK: usize = PHASER_LEN - 1;

/// Delay ring written once per sub-sample.
#[derive(Debug, Clone)]
pub struct PhaserRing {
    buffer: [f32; PHASER_LEN],
    write: usize,
}

impl Default for PhaserRing {
    fn default() -> Self {
        Self {
            buffer: [0.0; PHASER_LEN],
            write: 0,
        }
    }
}

impl PhaserRing {
    /// Clears the ring and rewinds the write index.
    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write = 0;
    }

    /// Stores `sample` and adds the sample `delay` slots behind it.
    #[inline]
    pub fn process(&mut self, sample: f32, delay: usize) -> f32 {
        let delay = delay.min(PHASER_MASK);
        self.buffer[self.write] = sample;
        let out = sample + self.buffer[(self.write + PHASER_LEN - delay) & PHASER_MASK];
        self.write = (self.write + 1) & PHASER_MASK;
        out
    }
}

/// Time-varying read distance of the phaser.
#[derive(Debug, Clone, Copy)]
pub struct PhaserSweep {
    offset: f32,
    delta: f32,
}

impl PhaserSweep {
    pub fn new(params: &ParameterSet) -> Self {
        Self {
            offset: signed_square(params.phaser_offset) * 1020.0,
            delta: signed_square(params.phaser_sweep),
        }
    }

    /// Advances one output sample and returns the delay in samples.
    #[inline]
    pub fn step(&mut self) -> usize {
        self.offset += self.delta;
        ((self.offset as i32).unsigned_abs() as usize).min(PHASER_MASK)
    }
}

/// `x²` carrying the sign of `x`.
fn signed_square(x: f32) -> f32 {
    let sq = x.powf(2.0);
    if x < 0.0 {
        -sq
    } else {
        sq
    }
}
