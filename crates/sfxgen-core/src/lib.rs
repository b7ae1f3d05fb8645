//! sfxgen core
//!
//! sfxr-style procedural sound effects: a compact [`ParameterSet`] goes in,
//! a mono sample buffer comes out.
//!
//! # Overview
//!
//! - **Synthesis** - a per-sample pipeline of oscillator, slide, vibrato,
//!   arpeggio, duty sweep, envelope, low/high-pass filters and phaser, with
//!   8x supersampling.
//! - **Codec** - the 104-byte `rFX ` parameter file and the legacy `.sfs`
//!   settings files (versions 100 to 102).
//! - **Generators** - eight canned archetypes (coin, laser, explosion, ...),
//!   full randomization and masked mutation.
//!
//! # Determinism
//!
//! Every random draw goes through a caller-owned [`RandomSource`]. Given the
//! same parameters and seed, generation is byte-identical across runs.
//!
//! # Example
//!
//! ```
//! use sfxgen_core::{generators, PcgSource, SynthConfig, SynthContext};
//!
//! let mut rng = PcgSource::new(1234);
//! let params = generators::pickup_coin(&mut rng);
//!
//! let mut ctx = SynthContext::new(SynthConfig::default()).unwrap();
//! let frames = ctx.generate(&params, &mut rng);
//! assert!(frames <= ctx.capacity());
//! ```
//!
//! # Crate Structure
//!
//! - [`params`] - parameter model and field table
//! - [`synth`] - synthesis context and the generation loop
//! - [`codec`] - parameter file reading and writing
//! - [`generators`] - archetypes, randomize and mutate
//! - [`rng`] - random source contract and PCG32 implementation
//! - [`wav`] - deterministic WAV writer

pub mod codec;
pub mod error;
pub mod generators;
pub mod params;
pub mod rng;
pub mod synth;
pub mod wav;

// Re-export main types at crate root
pub use codec::{load_params, load_params_into, read_params, save_params, LoadedParams, ParamSource};
pub use error::{FormatVersion, SfxError, SfxResult};
pub use generators::{mutate, randomize, SoundArchetype};
pub use params::{ParamField, ParameterSet, WaveType};
pub use rng::{PcgSource, RandomSource};
pub use synth::{generate, SampleFormat, Samples, SynthConfig, SynthContext, Termination};
pub use wav::{save_wav, WavFormat, WavResult};
