//! Sound parameter model.
//!
//! A [`ParameterSet`] is the complete description of one sound: a seed, a
//! base waveform and 22 normalized float controls. The float fields have a
//! fixed declared order which is shared by the rFX record layout and by the
//! bit masks accepted by [`crate::generators::mutate`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of float controls in a [`ParameterSet`].
pub const FLOAT_FIELD_COUNT: usize = 22;

/// Mask of the float fields whose range is [-1, 1] instead of [0, 1].
///
/// slide, delta_slide, change_amount, duty_sweep, phaser_offset,
/// phaser_sweep, lpf_cutoff_sweep, hpf_cutoff_sweep.
pub const SIGNED_FIELD_MASK: u32 = 0x0025_A4C0;

/// Mask selecting every float field.
pub const ALL_FIELDS_MASK: u32 = (1 << FLOAT_FIELD_COUNT) - 1;

/// Base oscillator waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum WaveType {
    /// Square wave with adjustable duty.
    #[default]
    Square = 0,
    /// Sawtooth split at the duty point.
    Sawtooth = 1,
    /// Sine wave.
    Sine = 2,
    /// White noise.
    Noise = 3,
    /// Triangle wave.
    Triangle = 4,
    /// Pink noise.
    PinkNoise = 5,
}

impl WaveType {
    /// All wave types in on-disk order.
    pub const ALL: [WaveType; 6] = [
        WaveType::Square,
        WaveType::Sawtooth,
        WaveType::Sine,
        WaveType::Noise,
        WaveType::Triangle,
        WaveType::PinkNoise,
    ];

    /// Converts the stored integer value.
    pub fn from_i32(value: i32) -> Option<Self> {
        usize::try_from(value)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Integer value written to parameter files.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Lowercase name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            WaveType::Square => "square",
            WaveType::Sawtooth => "sawtooth",
            WaveType::Sine => "sine",
            WaveType::Noise => "noise",
            WaveType::Triangle => "triangle",
            WaveType::PinkNoise => "pink-noise",
        }
    }

    /// True for the two noise waveforms, which read from the noise table.
    pub fn is_noise(self) -> bool {
        matches!(self, WaveType::Noise | WaveType::PinkNoise)
    }
}

impl fmt::Display for WaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WaveType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|w| w.name() == lower || w.name().replace('-', "_") == lower)
            .ok_or_else(|| format!("unknown wave type: {}", s))
    }
}

/// One of the 22 float controls, in declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamField {
    AttackTime,
    SustainTime,
    SustainPunch,
    DecayTime,
    StartFrequency,
    MinFrequency,
    Slide,
    DeltaSlide,
    VibratoDepth,
    VibratoSpeed,
    ChangeAmount,
    ChangeSpeed,
    SquareDuty,
    DutySweep,
    RepeatSpeed,
    PhaserOffset,
    PhaserSweep,
    LpfCutoff,
    LpfCutoffSweep,
    LpfResonance,
    HpfCutoff,
    HpfCutoffSweep,
}

impl ParamField {
    /// All float fields in declared order.
    pub const ALL: [ParamField; FLOAT_FIELD_COUNT] = [
        ParamField::AttackTime,
        ParamField::SustainTime,
        ParamField::SustainPunch,
        ParamField::DecayTime,
        ParamField::StartFrequency,
        ParamField::MinFrequency,
        ParamField::Slide,
        ParamField::DeltaSlide,
        ParamField::VibratoDepth,
        ParamField::VibratoSpeed,
        ParamField::ChangeAmount,
        ParamField::ChangeSpeed,
        ParamField::SquareDuty,
        ParamField::DutySweep,
        ParamField::RepeatSpeed,
        ParamField::PhaserOffset,
        ParamField::PhaserSweep,
        ParamField::LpfCutoff,
        ParamField::LpfCutoffSweep,
        ParamField::LpfResonance,
        ParamField::HpfCutoff,
        ParamField::HpfCutoffSweep,
    ];

    /// Position in declared order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Mask bit for this field.
    pub fn bit(self) -> u32 {
        1 << self.index()
    }

    /// True if the field ranges over [-1, 1].
    pub fn is_signed(self) -> bool {
        SIGNED_FIELD_MASK & self.bit() != 0
    }

    /// Lower clamp bound used by mutation.
    pub fn lower_bound(self) -> f32 {
        if self.is_signed() {
            -1.0
        } else {
            0.0
        }
    }

    /// snake_case field name.
    pub fn name(self) -> &'static str {
        match self {
            ParamField::AttackTime => "attack_time",
            ParamField::SustainTime => "sustain_time",
            ParamField::SustainPunch => "sustain_punch",
            ParamField::DecayTime => "decay_time",
            ParamField::StartFrequency => "start_frequency",
            ParamField::MinFrequency => "min_frequency",
            ParamField::Slide => "slide",
            ParamField::DeltaSlide => "delta_slide",
            ParamField::VibratoDepth => "vibrato_depth",
            ParamField::VibratoSpeed => "vibrato_speed",
            ParamField::ChangeAmount => "change_amount",
            ParamField::ChangeSpeed => "change_speed",
            ParamField::SquareDuty => "square_duty",
            ParamField::DutySweep => "duty_sweep",
            ParamField::RepeatSpeed => "repeat_speed",
            ParamField::PhaserOffset => "phaser_offset",
            ParamField::PhaserSweep => "phaser_sweep",
            ParamField::LpfCutoff => "lpf_cutoff",
            ParamField::LpfCutoffSweep => "lpf_cutoff_sweep",
            ParamField::LpfResonance => "lpf_resonance",
            ParamField::HpfCutoff => "hpf_cutoff",
            ParamField::HpfCutoffSweep => "hpf_cutoff_sweep",
        }
    }
}

/// Complete description of one synthesized sound.
///
/// The default value is the reset baseline: a square wave with a short
/// sustain/decay, no modulation and the low-pass filter disabled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Seed used to produce this sound; 0 means unseeded.
    pub rand_seed: u32,
    /// Base waveform.
    pub wave_type: WaveType,

    // Envelope
    pub attack_time: f32,
    pub sustain_time: f32,
    pub sustain_punch: f32,
    pub decay_time: f32,

    // Frequency
    pub start_frequency: f32,
    pub min_frequency: f32,
    pub slide: f32,
    pub delta_slide: f32,
    pub vibrato_depth: f32,
    pub vibrato_speed: f32,

    // Tone change (arpeggio)
    pub change_amount: f32,
    pub change_speed: f32,

    // Square duty
    pub square_duty: f32,
    pub duty_sweep: f32,

    pub repeat_speed: f32,

    // Phaser
    pub phaser_offset: f32,
    pub phaser_sweep: f32,

    // Filters
    pub lpf_cutoff: f32,
    pub lpf_cutoff_sweep: f32,
    pub lpf_resonance: f32,
    pub hpf_cutoff: f32,
    pub hpf_cutoff_sweep: f32,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            rand_seed: 0,
            wave_type: WaveType::Square,
            attack_time: 0.0,
            sustain_time: 0.3,
            sustain_punch: 0.0,
            decay_time: 0.4,
            start_frequency: 0.3,
            min_frequency: 0.0,
            slide: 0.0,
            delta_slide: 0.0,
            vibrato_depth: 0.0,
            vibrato_speed: 0.0,
            change_amount: 0.0,
            change_speed: 0.0,
            square_duty: 0.0,
            duty_sweep: 0.0,
            repeat_speed: 0.0,
            phaser_offset: 0.0,
            phaser_sweep: 0.0,
            lpf_cutoff: 1.0,
            lpf_cutoff_sweep: 0.0,
            lpf_resonance: 0.0,
            hpf_cutoff: 0.0,
            hpf_cutoff_sweep: 0.0,
        }
    }
}

impl ParameterSet {
    /// Restores the reset baseline, including `rand_seed = 0`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Reads a float field.
    pub fn get(&self, field: ParamField) -> f32 {
        match field {
            ParamField::AttackTime => self.attack_time,
            ParamField::SustainTime => self.sustain_time,
            ParamField::SustainPunch => self.sustain_punch,
            ParamField::DecayTime => self.decay_time,
            ParamField::StartFrequency => self.start_frequency,
            ParamField::MinFrequency => self.min_frequency,
            ParamField::Slide => self.slide,
            ParamField::DeltaSlide => self.delta_slide,
            ParamField::VibratoDepth => self.vibrato_depth,
            ParamField::VibratoSpeed => self.vibrato_speed,
            ParamField::ChangeAmount => self.change_amount,
            ParamField::ChangeSpeed => self.change_speed,
            ParamField::SquareDuty => self.square_duty,
            ParamField::DutySweep => self.duty_sweep,
            ParamField::RepeatSpeed => self.repeat_speed,
            ParamField::PhaserOffset => self.phaser_offset,
            ParamField::PhaserSweep => self.phaser_sweep,
            ParamField::LpfCutoff => self.lpf_cutoff,
            ParamField::LpfCutoffSweep => self.lpf_cutoff_sweep,
            ParamField::LpfResonance => self.lpf_resonance,
            ParamField::HpfCutoff => self.hpf_cutoff,
            ParamField::HpfCutoffSweep => self.hpf_cutoff_sweep,
        }
    }

    /// Mutable access to a float field.
    pub fn field_mut(&mut self, field: ParamField) -> &mut f32 {
        match field {
            ParamField::AttackTime => &mut self.attack_time,
            ParamField::SustainTime => &mut self.sustain_time,
            ParamField::SustainPunch => &mut self.sustain_punch,
            ParamField::DecayTime => &mut self.decay_time,
            ParamField::StartFrequency => &mut self.start_frequency,
            ParamField::MinFrequency => &mut self.min_frequency,
            ParamField::Slide => &mut self.slide,
            ParamField::DeltaSlide => &mut self.delta_slide,
            ParamField::VibratoDepth => &mut self.vibrato_depth,
            ParamField::VibratoSpeed => &mut self.vibrato_speed,
            ParamField::ChangeAmount => &mut self.change_amount,
            ParamField::ChangeSpeed => &mut self.change_speed,
            ParamField::SquareDuty => &mut self.square_duty,
            ParamField::DutySweep => &mut self.duty_sweep,
            ParamField::RepeatSpeed => &mut self.repeat_speed,
            ParamField::PhaserOffset => &mut self.phaser_offset,
            ParamField::PhaserSweep => &mut self.phaser_sweep,
            ParamField::LpfCutoff => &mut self.lpf_cutoff,
            ParamField::LpfCutoffSweep => &mut self.lpf_cutoff_sweep,
            ParamField::LpfResonance => &mut self.lpf_resonance,
            ParamField::HpfCutoff => &mut self.hpf_cutoff,
            ParamField::HpfCutoffSweep => &mut self.hpf_cutoff_sweep,
        }
    }

    /// Sets a float field.
    pub fn set(&mut self, field: ParamField, value: f32) {
        *self.field_mut(field) = value;
    }

    /// All float fields in declared order.
    pub fn floats(&self) -> [f32; FLOAT_FIELD_COUNT] {
        ParamField::ALL.map(|f| self.get(f))
    }

    /// Iterates `(field, value)` pairs in declared order.
    pub fn fields(&self) -> impl Iterator<Item = (ParamField, f32)> + '_ {
        ParamField::ALL.iter().map(move |&f| (f, self.get(f)))
    }
}
