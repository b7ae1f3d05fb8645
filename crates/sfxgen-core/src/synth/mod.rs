//! Sound synthesis.
//!
//! The engine turns a [`ParameterSet`](crate::params::ParameterSet) into a
//! mono sample buffer. Each output sample runs, in order: the repeat check,
//! the arpeggio and slide, vibrato, the duty sweep, the envelope, the phaser
//! sweep and the high-pass sweep, then eight sub-samples of waveform,
//! low-pass, high-pass and phaser which are averaged and clamped.

mod context;
mod envelope;
mod filter;
mod generate;
mod noise;
mod oscillator;
mod phaser;

pub use context::{
    SampleBuffer, SampleFormat, Samples, SynthConfig, SynthContext, DEFAULT_MAX_DURATION,
    DEFAULT_SAMPLE_RATE,
};
pub use envelope::{Envelope, EnvelopeStage};
pub use generate::{generate, generate_with_report, GenerateReport, Termination, SUPERSAMPLES};
pub use noise::{NOISE_TABLE_LEN, PINK_REGISTERS};
pub use phaser::PHASER_LEN;
