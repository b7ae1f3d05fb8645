//! Attack/sustain/decay volume envelope.

use crate::params::ParameterSet;

/// Samples per unit of squared envelope time.
const ENVELOPE_SCALE: f32 = 100_000.0;

/// Envelope stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    /// Linear ramp from 0 to 1.
    Attack,
    /// Hold near 1 with a decaying punch boost.
    Sustain,
    /// Linear ramp from 1 to 0.
    Decay,
}

/// Three-stage piecewise-linear envelope, advanced once per output sample.
#[derive(Debug, Clone)]
pub struct Envelope {
    lengths: [u32; 3],
    stage: usize,
    time: u32,
    punch: f32,
}

impl Envelope {
    pub fn new(params: &ParameterSet) -> Self {
        let len = |t: f32| (t * t * ENVELOPE_SCALE) as u32;
        Self {
            lengths: [
                len(params.attack_time),
                len(params.sustain_time),
                len(params.decay_time),
            ],
            stage: 0,
            time: 0,
            punch: params.sustain_punch,
        }
    }

    /// Stage lengths in samples.
    pub fn lengths(&self) -> [u32; 3] {
        self.lengths
    }

    /// Total envelope length in samples.
    pub fn total_length(&self) -> u64 {
        self.lengths.iter().map(|&l| l as u64).sum()
    }

    /// Current stage.
    pub fn stage(&self) -> EnvelopeStage {
        match self.stage {
            0 => EnvelopeStage::Attack,
            1 => EnvelopeStage::Sustain,
            _ => EnvelopeStage::Decay,
        }
    }

    /// Steps one output sample and returns the volume, or `None` once the
    /// decay stage has run out.
    ///
    /// Zero-length stages are skipped.
    pub fn advance(&mut self) -> Option<f32> {
        self.time += 1;
        if self.time > self.lengths[self.stage] {
            self.time = 0;
            loop {
                self.stage += 1;
                if self.stage == self.lengths.len() {
                    return None;
                }
                if self.lengths[self.stage] != 0 {
                    break;
                }
            }
        }

        let t = self.time as f32;
        let volume = match self.stage {
            0 => t / self.lengths[0] as f32,
            1 => 1.0 + (1.0 - t / self.lengths[1] as f32) * 2.0 * self.punch,
            _ => 1.0 - t / self.lengths[2] as f32,
        };
        Some(volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(env: &mut Envelope) -> (usize, Vec<f32>) {
        let mut volumes = Vec::new();
        while let Some(v) = env.advance() {
            volumes.push(v);
        }
        (volumes.len(), volumes)
    }

    #[test]
    fn test_default_lengths() {
        let env = Envelope::new(&ParameterSet::default());
        assert_eq!(env.lengths(), [0, 9000, 16000]);
        assert_eq!(env.total_length(), 25000);
    }

    #[test]
    fn test_default_envelope_terminates() {
        let mut env = Envelope::new(&ParameterSet::default());
        let (count, volumes) = run_to_end(&mut env);
        // Sustain covers 0..=9000, decay 0..=16000.
        assert_eq!(count, 9001 + 16001);
        assert_eq!(volumes[0], 1.0);
        assert!(volumes.iter().all(|v| (0.0..=1.0).contains(v)));
        assert!(volumes.last().copied().unwrap() < 0.001);
    }

    #[test]
    fn test_attack_ramps_up() {
        let params = ParameterSet {
            attack_time: 0.1,
            ..ParameterSet::default()
        };
        let mut env = Envelope::new(&params);
        assert_eq!(env.lengths()[0], 1000);
        let first = env.advance().unwrap();
        assert_eq!(first, 1.0 / 1000.0);
        assert_eq!(env.stage(), EnvelopeStage::Attack);
        for _ in 1..1000 {
            env.advance();
        }
        let peak = env.advance();
        assert_eq!(env.stage(), EnvelopeStage::Sustain);
        assert_eq!(peak, Some(1.0));
    }

    #[test]
    fn test_punch_boosts_sustain() {
        let params = ParameterSet {
            sustain_punch: 0.5,
            ..ParameterSet::default()
        };
        let mut env = Envelope::new(&params);
        // First sample skips the empty attack stage and lands at sustain t=0.
        assert_eq!(env.advance(), Some(2.0));
    }

    #[test]
    fn test_all_zero_lengths_end_immediately() {
        let params = ParameterSet {
            attack_time: 0.0,
            sustain_time: 0.0,
            decay_time: 0.0,
            ..ParameterSet::default()
        };
        let mut env = Envelope::new(&params);
        assert_eq!(env.advance(), None);
    }
}
