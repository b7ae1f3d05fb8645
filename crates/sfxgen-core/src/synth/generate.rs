//! The per-sample synthesis loop.

use crate::params::ParameterSet;
use crate::rng::RandomSource;

use super::context::SynthContext;
use super::envelope::Envelope;
use super::filter::{HighPass, LowPass};
use super::oscillator::{repeat_limit, waveform, OscillatorState, Vibrato};
use super::phaser::PhaserSweep;

/// Sub-samples averaged into each output sample.
pub const SUPERSAMPLES: u32 = 8;

/// Scales the averaged sub-samples into [-1, 1].
const SAMPLE_COEFFICIENT: f32 = 0.2;

/// Why a generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The buffer was filled.
    Complete,
    /// The slide reached a nonzero minimum frequency.
    MinFrequency,
    /// The envelope finished its decay stage.
    Envelope,
}

/// Outcome of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateReport {
    /// Samples written to the context buffer.
    pub frames: usize,
    /// What ended the loop.
    pub termination: Termination,
}

/// Synthesizes `params` into `ctx` and returns the number of samples written.
///
/// Samples past the returned count keep whatever the previous generation
/// left there. The noise waveforms draw from `rng`; tonal waveforms never
/// touch it.
pub fn generate<R: RandomSource + ?Sized>(
    ctx: &mut SynthContext,
    params: &ParameterSet,
    rng: &mut R,
) -> usize {
    generate_with_report(ctx, params, rng).frames
}

/// Like [`generate`], also reporting why generation stopped.
pub fn generate_with_report<R: RandomSource + ?Sized>(
    ctx: &mut SynthContext,
    params: &ParameterSet,
    rng: &mut R,
) -> GenerateReport {
    let capacity = ctx.capacity();
    let wave = params.wave_type;

    let mut osc = OscillatorState::derive(params);
    let mut vibrato = Vibrato::new(params);
    let mut envelope = Envelope::new(params);
    let mut lpf = LowPass::new(params);
    let mut hpf = HighPass::new(params);
    let mut sweep = PhaserSweep::new(params);

    let buffer = &mut ctx.buffer;
    let noise = &mut ctx.noise;
    let phaser = &mut ctx.phaser;
    phaser.reset();
    noise.reset(wave, rng);

    let repeat_limit = repeat_limit(params.repeat_speed);
    let mut repeat_time = 0u32;
    let mut phase = 0u32;

    let report = 'samples: {
        for i in 0..capacity {
            repeat_time += 1;
            if repeat_limit != 0 && repeat_time >= repeat_limit {
                repeat_time = 0;
                osc = OscillatorState::derive(params);
            }

            let reached_min_freq = osc.step_pitch();
            let period = vibrato.apply(osc.period());
            osc.step_duty();

            let Some(volume) = envelope.advance() else {
                break 'samples GenerateReport {
                    frames: i,
                    termination: Termination::Envelope,
                };
            };

            let delay = sweep.step();
            hpf.sweep();

            let duty = osc.duty();
            let mut accum = 0.0f32;
            for _ in 0..SUPERSAMPLES {
                phase += 1;
                if phase >= period {
                    phase %= period;
                    noise.refill(wave, rng);
                }

                let raw = waveform(wave, phase, period, duty, noise);
                let prev = lpf.output();
                let low = lpf.process(raw);
                let high = hpf.process(low - prev);
                accum += phaser.process(high, delay) * volume;
            }

            let sample = (accum / SUPERSAMPLES as f32 * SAMPLE_COEFFICIENT).clamp(-1.0, 1.0);
            buffer.write(i, sample);

            if reached_min_freq {
                break 'samples GenerateReport {
                    frames: i + 1,
                    termination: Termination::MinFrequency,
                };
            }
        }
        GenerateReport {
            frames: capacity,
            termination: Termination::Complete,
        }
    };

    tracing::debug!(
        wave = %wave,
        frames = report.frames,
        termination = ?report.termination,
        "generated sound"
    );
    report
}
