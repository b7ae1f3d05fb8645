//! Pitch, duty and waveform shaping.
//!
//! [`OscillatorState`] holds everything that a repeat restores: the period
//! and its slide, the square duty and its sweep, and the one-shot arpeggio.
//! Vibrato and the oscillator phase are not part of it and keep running
//! across repeats.

use std::f32::consts::PI;

use crate::params::{ParameterSet, WaveType};

use super::noise::NoiseTable;

/// Shortest oscillator period in sub-samples.
pub const MIN_PERIOD: u32 = 8;

/// Period for a normalized frequency. The square is taken in `f32`.
fn period_for(frequency: f32) -> f64 {
    100.0 / ((frequency * frequency) as f64 + 0.001)
}

/// Frequency state restored at the start and on every repeat.
#[derive(Debug, Clone, Copy)]
pub struct OscillatorState {
    period: f64,
    max_period: f64,
    slide: f64,
    delta_slide: f64,
    duty: f32,
    duty_slide: f32,
    arpeggio_mod: f64,
    arpeggio_time: u32,
    arpeggio_limit: u32,
    min_freq_cutoff: bool,
}

impl OscillatorState {
    pub fn derive(params: &ParameterSet) -> Self {
        let min_freq = params.min_frequency.min(params.start_frequency);
        let slide = params.slide.max(params.delta_slide) as f64;
        let change = params.change_amount as f64;

        let arpeggio_mod = if params.change_amount >= 0.0 {
            1.0 - change.powi(2) * 0.9
        } else {
            1.0 + change.powi(2) * 10.0
        };
        let arpeggio_limit = if params.change_speed == 1.0 {
            0
        } else {
            ((1.0 - params.change_speed).powf(2.0) * 20000.0 + 32.0) as u32
        };

        Self {
            period: period_for(params.start_frequency),
            max_period: period_for(min_freq),
            slide: 1.0 - slide.powi(3) * 0.01,
            delta_slide: -(params.delta_slide as f64).powi(3) * 0.000001,
            duty: 0.5 - params.square_duty * 0.5,
            duty_slide: -params.duty_sweep * 0.00005,
            arpeggio_mod,
            arpeggio_time: 0,
            arpeggio_limit,
            min_freq_cutoff: min_freq > 0.0,
        }
    }

    /// Unmodulated period in sub-samples.
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Current duty point in [0, 0.5].
    pub fn duty(&self) -> f32 {
        self.duty
    }

    /// Advances pitch by one output sample.
    ///
    /// Returns true when the period has fallen to the minimum frequency
    /// and a nonzero minimum frequency asks for generation to stop.
    pub fn step_pitch(&mut self) -> bool {
        self.arpeggio_time += 1;
        if self.arpeggio_limit != 0 && self.arpeggio_time >= self.arpeggio_limit {
            self.arpeggio_limit = 0;
            self.period *= self.arpeggio_mod;
        }

        self.slide += self.delta_slide;
        self.period *= self.slide;

        if self.period > self.max_period {
            self.period = self.max_period;
            return self.min_freq_cutoff;
        }
        false
    }

    /// Advances the duty sweep by one output sample.
    pub fn step_duty(&mut self) {
        self.duty = (self.duty + self.duty_slide).clamp(0.0, 0.5);
    }
}

/// Sinusoidal pitch modulation.
#[derive(Debug, Clone, Copy)]
pub struct Vibrato {
    phase: f32,
    speed: f32,
    amplitude: f32,
}

impl Vibrato {
    pub fn new(params: &ParameterSet) -> Self {
        Self {
            phase: 0.0,
            speed: params.vibrato_speed.powf(2.0) * 0.01,
            amplitude: params.vibrato_depth * 0.5,
        }
    }

    /// Modulates `period` for one output sample and returns the integer
    /// period, floored at [`MIN_PERIOD`].
    pub fn apply(&mut self, period: f64) -> u32 {
        let mut modulated = period as f32;
        if self.amplitude > 0.0 {
            self.phase += self.speed;
            modulated = (period * (1.0 + (self.phase.sin() * self.amplitude) as f64)) as f32;
        }
        (modulated as i32).max(MIN_PERIOD as i32) as u32
    }
}

/// Samples after which the oscillator state is restored, or 0 for never.
pub fn repeat_limit(repeat_speed: f32) -> u32 {
    if repeat_speed == 0.0 {
        0
    } else {
        ((1.0 - repeat_speed).powf(2.0) * 20000.0 + 32.0) as u32
    }
}

/// Raw waveform value at `phase` within a `period`-sample cycle.
#[inline]
pub fn waveform(wave: WaveType, phase: u32, period: u32, duty: f32, noise: &NoiseTable) -> f32 {
    let fp = phase as f32 / period as f32;
    match wave {
        WaveType::Square => {
            if fp < duty {
                0.5
            } else {
                -0.5
            }
        }
        WaveType::Sawtooth => {
            if fp < duty {
                -1.0 + 2.0 * fp / duty
            } else {
                1.0 - 2.0 * (fp - duty) / (1.0 - duty)
            }
        }
        WaveType::Sine => (fp * 2.0 * PI).sin(),
        WaveType::Noise | WaveType::PinkNoise => noise.lookup(phase, period),
        WaveType::Triangle => {
            if fp < 0.5 {
                -1.0 + 2.0 * (fp / 0.5)
            } else {
                1.0 - 2.0 * ((fp - 0.5) / 0.5)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_period() {
        let osc = OscillatorState::derive(&ParameterSet::default());
        // 100 / (0.09 + 0.001)
        assert!((osc.period() - 1098.9).abs() < 0.1);
        assert_eq!(osc.duty(), 0.5);
    }

    #[test]
    fn test_period_squares_in_single_precision() {
        // 0.3f32 squared rounds to 0.09f32 before widening
        let expected = 100.0 / (0.09f32 as f64 + 0.001);
        assert_eq!(period_for(0.3).to_bits(), expected.to_bits());

        let widened = 100.0 / (0.3f32 as f64 * 0.3f32 as f64 + 0.001);
        assert_ne!(period_for(0.3).to_bits(), widened.to_bits());
    }

    #[test]
    fn test_slide_down_stops_at_min_frequency() {
        let params = ParameterSet {
            start_frequency: 0.5,
            min_frequency: 0.4,
            slide: -0.5,
            delta_slide: -0.5,
            ..ParameterSet::default()
        };
        let mut osc = OscillatorState::derive(&params);
        let mut steps = 0;
        while !osc.step_pitch() {
            steps += 1;
            assert!(steps < 100_000, "never reached the minimum frequency");
        }
        assert!(osc.period() <= period_for(0.4));
    }

    #[test]
    fn test_zero_min_frequency_never_stops() {
        let params = ParameterSet {
            slide: -1.0,
            delta_slide: -1.0,
            ..ParameterSet::default()
        };
        let mut osc = OscillatorState::derive(&params);
        for _ in 0..10_000 {
            assert!(!osc.step_pitch());
        }
        assert!(osc.period() <= period_for(0.0));
    }

    #[test]
    fn test_min_frequency_capped_by_start() {
        let params = ParameterSet {
            start_frequency: 0.2,
            min_frequency: 0.8,
            ..ParameterSet::default()
        };
        let osc = OscillatorState::derive(&params);
        assert_eq!(osc.max_period, osc.period);
    }

    #[test]
    fn test_arpeggio_fires_once() {
        let params = ParameterSet {
            change_amount: 0.5,
            change_speed: 0.9,
            ..ParameterSet::default()
        };
        let mut osc = OscillatorState::derive(&params);
        let start = osc.period();
        assert_eq!(osc.arpeggio_limit, 232);
        for _ in 0..231 {
            osc.step_pitch();
        }
        assert_eq!(osc.period(), start);
        osc.step_pitch();
        assert!((osc.period() - start * 0.775).abs() < 1e-9);
        for _ in 0..1000 {
            osc.step_pitch();
        }
        assert!((osc.period() - start * 0.775).abs() < 1e-9);
    }

    #[test]
    fn test_negative_slide_needs_negative_delta() {
        let params = ParameterSet {
            slide: -0.5,
            ..ParameterSet::default()
        };
        let mut osc = OscillatorState::derive(&params);
        let start = osc.period();
        osc.step_pitch();
        assert_eq!(osc.period(), start);
    }

    #[test]
    fn test_full_change_speed_disables_arpeggio() {
        let params = ParameterSet {
            change_amount: 1.0,
            change_speed: 1.0,
            ..ParameterSet::default()
        };
        assert_eq!(OscillatorState::derive(&params).arpeggio_limit, 0);
    }

    #[test]
    fn test_duty_sweep_clamped() {
        let params = ParameterSet {
            square_duty: 0.0,
            duty_sweep: -1.0,
            ..ParameterSet::default()
        };
        let mut osc = OscillatorState::derive(&params);
        for _ in 0..100 {
            osc.step_duty();
        }
        assert_eq!(osc.duty(), 0.5);

        let params = ParameterSet {
            square_duty: 0.9,
            duty_sweep: 1.0,
            ..ParameterSet::default()
        };
        let mut osc = OscillatorState::derive(&params);
        for _ in 0..10_000 {
            osc.step_duty();
        }
        assert_eq!(osc.duty(), 0.0);
    }

    #[test]
    fn test_vibrato_floor() {
        let mut vib = Vibrato::new(&ParameterSet::default());
        assert_eq!(vib.apply(2.0), MIN_PERIOD);
        assert_eq!(vib.apply(100.7), 100);
        assert_eq!(vib.phase, 0.0);
    }

    #[test]
    fn test_vibrato_modulates_period() {
        let params = ParameterSet {
            vibrato_depth: 1.0,
            vibrato_speed: 1.0,
            ..ParameterSet::default()
        };
        let mut vib = Vibrato::new(&params);
        let periods: Vec<u32> = (0..400).map(|_| vib.apply(1000.0)).collect();
        assert!(periods.iter().any(|&p| p > 1000));
        assert!(periods.iter().any(|&p| p < 1000));
    }

    #[test]
    fn test_repeat_limit() {
        assert_eq!(repeat_limit(0.0), 0);
        assert_eq!(repeat_limit(1.0), 32);
        assert_eq!(repeat_limit(0.5), 5032);
    }

    #[test]
    fn test_waveform_shapes() {
        let noise = NoiseTable::default();
        assert_eq!(waveform(WaveType::Square, 10, 100, 0.5, &noise), 0.5);
        assert_eq!(waveform(WaveType::Square, 60, 100, 0.5, &noise), -0.5);
        assert_eq!(waveform(WaveType::Sawtooth, 0, 100, 0.5, &noise), -1.0);
        assert_eq!(waveform(WaveType::Sawtooth, 50, 100, 0.5, &noise), 1.0);
        assert_eq!(waveform(WaveType::Triangle, 0, 100, 0.5, &noise), -1.0);
        assert_eq!(waveform(WaveType::Triangle, 50, 100, 0.5, &noise), 1.0);
        assert_eq!(waveform(WaveType::Sine, 0, 100, 0.5, &noise), 0.0);
        assert!((waveform(WaveType::Sine, 25, 100, 0.5, &noise) - 1.0).abs() < 1e-6);
        assert_eq!(waveform(WaveType::Noise, 5, 100, 0.5, &noise), 0.0);
    }
}
