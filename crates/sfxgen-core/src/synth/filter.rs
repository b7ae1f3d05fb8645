//! One-pole low-pass and high-pass filters with swept cutoffs.
//!
//! Both filters run once per sub-sample. The low-pass cutoff sweeps every
//! sub-sample; the high-pass cutoff sweeps once per output sample.

use crate::params::ParameterSet;

const LPF_MAX_CUTOFF: f32 = 0.1;
const LPF_MAX_DAMPING: f32 = 0.8;
const HPF_MIN_CUTOFF: f32 = 0.00001;
const HPF_MAX_CUTOFF: f32 = 0.1;

/// Resonant one-pole low-pass.
#[derive(Debug, Clone, Copy)]
pub struct LowPass {
    position: f32,
    velocity: f32,
    cutoff: f32,
    cutoff_delta: f32,
    damping: f32,
    bypass: bool,
}

impl LowPass {
    pub fn new(params: &ParameterSet) -> Self {
        let cutoff = params.lpf_cutoff.powf(3.0) * 0.1;
        let damping = 5.0 / (1.0 + params.lpf_resonance.powf(2.0) * 20.0) * (0.01 + cutoff);
        Self {
            position: 0.0,
            velocity: 0.0,
            cutoff,
            cutoff_delta: 1.0 + params.lpf_cutoff_sweep * 0.0001,
            damping: damping.min(LPF_MAX_DAMPING),
            bypass: params.lpf_cutoff == 1.0,
        }
    }

    /// Last output value.
    #[inline]
    pub fn output(&self) -> f32 {
        self.position
    }

    /// Filters one sub-sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.cutoff = (self.cutoff * self.cutoff_delta).clamp(0.0, LPF_MAX_CUTOFF);

        if self.bypass {
            self.position = input;
            self.velocity = 0.0;
        } else {
            self.velocity += (input - self.position) * self.cutoff;
            self.velocity -= self.velocity * self.damping;
        }
        self.position += self.velocity;
        self.position
    }
}

/// Leaky differentiator acting as a one-pole high-pass.
#[derive(Debug, Clone, Copy)]
pub struct HighPass {
    state: f32,
    cutoff: f32,
    cutoff_delta: f32,
}

impl HighPass {
    pub fn new(params: &ParameterSet) -> Self {
        Self {
            state: 0.0,
            cutoff: params.hpf_cutoff.powf(2.0) * 0.1,
            cutoff_delta: 1.0 + params.hpf_cutoff_sweep * 0.0003,
        }
    }

    /// Applies the cutoff sweep for one output sample.
    #[inline]
    pub fn sweep(&mut self) {
        if self.cutoff_delta != 0.0 {
            self.cutoff = (self.cutoff * self.cutoff_delta).clamp(HPF_MIN_CUTOFF, HPF_MAX_CUTOFF);
        }
    }

    /// Filters the change `delta` of the low-pass output.
    #[inline]
    pub fn process(&mut self, delta: f32) -> f32 {
        self.state += delta;
        self.state -= self.state * self.cutoff;
        self.state
    }
}
