//! Parameter generators: canned archetypes, full randomization and mutation.
//!
//! Every generator starts from the reset baseline and draws from a
//! caller-supplied [`RandomSource`]; none of them touch `rand_seed`, which
//! the caller stamps after seeding the source.

use std::fmt;
use std::str::FromStr;

use crate::params::{ParamField, ParameterSet, WaveType};
use crate::rng::RandomSource;

/// Mutation range used by the classic "mutate" button.
pub const DEFAULT_MUTATE_RANGE: f32 = 0.1;

/// Mutation mask used by the classic "mutate" button: every float field
/// except `min_frequency`.
pub const DEFAULT_MUTATE_MASK: u32 = 0x00FF_FFDF;

/// The tuned pitches the synth archetype picks from.
const SYNTH_FREQUENCIES: [f32; 3] = [0.272_317_136_09, 0.192_556_925_61, 0.136_157_787_46];

/// Arpeggio amounts for the synth archetype; four of seven draws pick none.
const SYNTH_ARPEGGIOS: [f32; 7] = [0.0, 0.0, 0.0, 0.0, -0.3162, 0.7454, 0.7454];

/// Sound character produced by one of the canned generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundArchetype {
    PickupCoin,
    LaserShoot,
    Explosion,
    Powerup,
    HitHurt,
    Jump,
    BlipSelect,
    Synth,
}

impl SoundArchetype {
    /// All archetypes in menu order.
    pub const ALL: [SoundArchetype; 8] = [
        SoundArchetype::PickupCoin,
        SoundArchetype::LaserShoot,
        SoundArchetype::Explosion,
        SoundArchetype::Powerup,
        SoundArchetype::HitHurt,
        SoundArchetype::Jump,
        SoundArchetype::BlipSelect,
        SoundArchetype::Synth,
    ];

    /// Kebab-case name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            SoundArchetype::PickupCoin => "pickup-coin",
            SoundArchetype::LaserShoot => "laser-shoot",
            SoundArchetype::Explosion => "explosion",
            SoundArchetype::Powerup => "powerup",
            SoundArchetype::HitHurt => "hit-hurt",
            SoundArchetype::Jump => "jump",
            SoundArchetype::BlipSelect => "blip-select",
            SoundArchetype::Synth => "synth",
        }
    }

    /// Runs the generator for this archetype.
    pub fn generate<R: RandomSource + ?Sized>(self, rng: &mut R) -> ParameterSet {
        match self {
            SoundArchetype::PickupCoin => pickup_coin(rng),
            SoundArchetype::LaserShoot => laser_shoot(rng),
            SoundArchetype::Explosion => explosion(rng),
            SoundArchetype::Powerup => powerup(rng),
            SoundArchetype::HitHurt => hit_hurt(rng),
            SoundArchetype::Jump => jump(rng),
            SoundArchetype::BlipSelect => blip_select(rng),
            SoundArchetype::Synth => synth(rng),
        }
    }
}

impl fmt::Display for SoundArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SoundArchetype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase().replace('_', "-");
        let alias = match lower.as_str() {
            "coin" | "pickup" => Some(SoundArchetype::PickupCoin),
            "laser" | "shoot" => Some(SoundArchetype::LaserShoot),
            "hit" | "hurt" => Some(SoundArchetype::HitHurt),
            "blip" | "select" => Some(SoundArchetype::BlipSelect),
            _ => None,
        };
        alias
            .or_else(|| Self::ALL.iter().copied().find(|a| a.name() == lower))
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|a| a.name()).collect();
                format!("unknown archetype: {} (expected one of {})", s, names.join(", "))
            })
    }
}

/// Wave type for a draw in `0..6`.
fn wave_at(index: u32) -> WaveType {
    WaveType::ALL[index as usize % WaveType::ALL.len()]
}

/// Bright, short blip with an optional upward arpeggio.
pub fn pickup_coin<R: RandomSource + ?Sized>(rng: &mut R) -> ParameterSet {
    let mut p = ParameterSet::default();

    p.start_frequency = 0.4 + rng.frnd(0.5);
    p.attack_time = 0.0;
    p.sustain_time = rng.frnd(0.1);
    p.decay_time = 0.1 + rng.frnd(0.4);
    p.sustain_punch = 0.3 + rng.frnd(0.3);

    if rng.next(2) != 0 {
        p.change_speed = 0.5 + rng.frnd(0.2);
        p.change_amount = 0.2 + rng.frnd(0.4);
    }
    p
}

/// Falling zap.
pub fn laser_shoot<R: RandomSource + ?Sized>(rng: &mut R) -> ParameterSet {
    let mut p = ParameterSet::default();

    p.wave_type = wave_at(rng.next(3));
    if p.wave_type == WaveType::Sine && rng.next(2) != 0 {
        p.wave_type = wave_at(rng.next(2));
    }

    p.start_frequency = 0.5 + rng.frnd(0.5);
    p.min_frequency = (p.start_frequency - 0.2 - rng.frnd(0.6)).max(0.2);
    p.slide = -0.15 - rng.frnd(0.2);

    if rng.next(3) == 0 {
        p.start_frequency = 0.3 + rng.frnd(0.6);
        p.min_frequency = rng.frnd(0.1);
        p.slide = -0.35 - rng.frnd(0.3);
    }

    if rng.next(2) != 0 {
        p.square_duty = rng.frnd(0.5);
        p.duty_sweep = rng.frnd(0.2);
    } else {
        p.square_duty = 0.4 + rng.frnd(0.5);
        p.duty_sweep = -rng.frnd(0.7);
    }

    p.attack_time = 0.0;
    p.sustain_time = 0.1 + rng.frnd(0.2);
    p.decay_time = rng.frnd(0.4);

    if rng.next(2) != 0 {
        p.sustain_punch = rng.frnd(0.3);
    }
    if rng.next(3) == 0 {
        p.phaser_offset = rng.frnd(0.2);
        p.phaser_sweep = -rng.frnd(0.2);
    }
    if rng.next(2) != 0 {
        p.hpf_cutoff = rng.frnd(0.3);
    }
    p
}

/// Low noise burst.
pub fn explosion<R: RandomSource + ?Sized>(rng: &mut R) -> ParameterSet {
    let mut p = ParameterSet {
        wave_type: WaveType::Noise,
        ..ParameterSet::default()
    };

    if rng.next(2) != 0 {
        p.start_frequency = 0.1 + rng.frnd(0.4);
        p.slide = -0.1 + rng.frnd(0.4);
    } else {
        p.start_frequency = 0.2 + rng.frnd(0.7);
        p.slide = -0.2 - rng.frnd(0.2);
    }
    p.start_frequency *= p.start_frequency;

    if rng.next(5) == 0 {
        p.slide = 0.0;
    }
    if rng.next(3) == 0 {
        p.repeat_speed = 0.3 + rng.frnd(0.5);
    }

    p.attack_time = 0.0;
    p.sustain_time = 0.1 + rng.frnd(0.3);
    p.decay_time = rng.frnd(0.5);

    if rng.next(2) == 0 {
        p.phaser_offset = -0.3 + rng.frnd(0.9);
        p.phaser_sweep = -rng.frnd(0.3);
    }

    p.sustain_punch = 0.2 + rng.frnd(0.6);

    if rng.next(2) != 0 {
        p.vibrato_depth = rng.frnd(0.7);
        p.vibrato_speed = rng.frnd(0.6);
    }
    if rng.next(3) == 0 {
        p.change_speed = 0.6 + rng.frnd(0.3);
        p.change_amount = 0.8 - rng.frnd(1.6);
    }
    p
}

/// Rising sweep, sometimes repeating.
pub fn powerup<R: RandomSource + ?Sized>(rng: &mut R) -> ParameterSet {
    let mut p = ParameterSet::default();

    if rng.next(2) != 0 {
        p.wave_type = WaveType::Sawtooth;
        p.square_duty = 1.0;
    } else {
        p.square_duty = rng.frnd(0.6);
    }

    if rng.next(2) != 0 {
        p.start_frequency = 0.2 + rng.frnd(0.3);
        p.slide = 0.1 + rng.frnd(0.4);
        p.repeat_speed = 0.4 + rng.frnd(0.4);
    } else {
        p.start_frequency = 0.2 + rng.frnd(0.3);
        p.slide = 0.05 + rng.frnd(0.2);

        if rng.next(2) != 0 {
            p.vibrato_depth = rng.frnd(0.7);
            p.vibrato_speed = rng.frnd(0.6);
        }
    }

    p.attack_time = 0.0;
    p.sustain_time = rng.frnd(0.4);
    p.decay_time = 0.1 + rng.frnd(0.4);
    p
}

/// Short falling thud.
pub fn hit_hurt<R: RandomSource + ?Sized>(rng: &mut R) -> ParameterSet {
    let mut p = ParameterSet::default();

    p.wave_type = match wave_at(rng.next(3)) {
        WaveType::Sine => WaveType::Noise,
        WaveType::Square => {
            p.square_duty = rng.frnd(0.6);
            WaveType::Square
        }
        other => {
            p.square_duty = 1.0;
            other
        }
    };

    p.start_frequency = 0.2 + rng.frnd(0.6);
    p.slide = -0.3 - rng.frnd(0.4);
    p.attack_time = 0.0;
    p.sustain_time = rng.frnd(0.1);
    p.decay_time = 0.1 + rng.frnd(0.2);

    if rng.next(2) != 0 {
        p.hpf_cutoff = rng.frnd(0.3);
    }
    p
}

/// Rising square chirp.
pub fn jump<R: RandomSource + ?Sized>(rng: &mut R) -> ParameterSet {
    let mut p = ParameterSet {
        wave_type: WaveType::Square,
        ..ParameterSet::default()
    };

    p.square_duty = rng.frnd(0.6);
    p.start_frequency = 0.3 + rng.frnd(0.3);
    p.slide = 0.1 + rng.frnd(0.2);
    p.attack_time = 0.0;
    p.sustain_time = 0.1 + rng.frnd(0.3);
    p.decay_time = 0.1 + rng.frnd(0.2);

    if rng.next(2) != 0 {
        p.hpf_cutoff = rng.frnd(0.3);
    }
    if rng.next(2) != 0 {
        p.lpf_cutoff = 1.0 - rng.frnd(0.6);
    }
    p
}

/// Very short menu blip.
pub fn blip_select<R: RandomSource + ?Sized>(rng: &mut R) -> ParameterSet {
    let mut p = ParameterSet::default();

    p.wave_type = wave_at(rng.next(2));
    p.square_duty = if p.wave_type == WaveType::Square {
        rng.frnd(0.6)
    } else {
        1.0
    };
    p.start_frequency = 0.2 + rng.frnd(0.4);
    p.attack_time = 0.0;
    p.sustain_time = 0.1 + rng.frnd(0.1);
    p.decay_time = rng.frnd(0.2);
    p.hpf_cutoff = 0.1;
    p
}

/// Tonal note on one of three fixed pitches with a filtered body.
pub fn synth<R: RandomSource + ?Sized>(rng: &mut R) -> ParameterSet {
    let mut p = ParameterSet::default();

    p.wave_type = wave_at(rng.next(2));
    p.start_frequency = SYNTH_FREQUENCIES[rng.next(3) as usize];
    p.attack_time = if rng.next(5) > 3 { rng.frnd(0.5) } else { 0.0 };
    p.sustain_time = rng.frnd(1.0);
    p.sustain_punch = rng.frnd(1.0);
    p.decay_time = rng.frnd(0.9) + 0.1;
    p.change_amount = SYNTH_ARPEGGIOS[rng.next(7) as usize];
    p.change_speed = rng.frnd(0.5) + 0.4;
    p.square_duty = rng.frnd(1.0);
    p.duty_sweep = if rng.next(3) == 2 { rng.frnd(1.0) } else { 0.0 };
    p.lpf_cutoff = if rng.next(2) == 1 {
        1.0
    } else {
        0.9 * rng.frnd(1.0) * rng.frnd(1.0) + 0.1
    };
    p.lpf_cutoff_sweep = rng.rnd_np1();
    p.lpf_resonance = rng.frnd(1.0);
    p.hpf_cutoff = if rng.next(4) == 3 { rng.frnd(1.0) } else { 0.0 };
    p.hpf_cutoff_sweep = if rng.next(4) == 3 { rng.frnd(1.0) } else { 0.0 };
    p
}

/// Fully random parameters for `wave_type`.
///
/// Slide is flipped against very high or very low start frequencies, short
/// envelopes are padded, and a closed low-pass is swept open.
pub fn randomize<R: RandomSource + ?Sized>(rng: &mut R, wave_type: WaveType) -> ParameterSet {
    let mut p = ParameterSet {
        wave_type,
        ..ParameterSet::default()
    };

    p.start_frequency = rng.rnd_np1().powi(2);
    p.min_frequency = 0.0;
    p.slide = rng.rnd_np1().powi(5);

    if p.start_frequency > 0.7 && p.slide > 0.2 {
        p.slide = -p.slide;
    }
    if p.start_frequency < 0.2 && p.slide < -0.05 {
        p.slide = -p.slide;
    }

    p.delta_slide = rng.rnd_np1().powi(3);
    p.square_duty = rng.rnd_np1();
    p.duty_sweep = rng.rnd_np1().powi(3);
    p.vibrato_depth = rng.rnd_np1().powi(3);
    p.vibrato_speed = rng.rnd_np1();
    p.attack_time = rng.rnd_np1().powi(3);
    p.sustain_time = rng.rnd_np1().powi(2);
    p.decay_time = rng.rnd_np1();
    p.sustain_punch = rng.frnd(0.8).powi(2);

    if p.attack_time + p.sustain_time + p.decay_time < 0.2 {
        p.sustain_time += 0.2 + rng.frnd(0.3);
        p.decay_time += 0.2 + rng.frnd(0.3);
    }

    p.lpf_resonance = rng.rnd_np1();
    p.lpf_cutoff = 1.0 - rng.frnd(1.0).powi(3);
    p.lpf_cutoff_sweep = rng.rnd_np1().powi(3);

    if p.lpf_cutoff < 0.1 && p.lpf_cutoff_sweep < -0.05 {
        p.lpf_cutoff_sweep = -p.lpf_cutoff_sweep;
    }

    p.hpf_cutoff = rng.frnd(1.0).powi(5);
    p.hpf_cutoff_sweep = rng.rnd_np1().powi(5);
    p.phaser_offset = rng.rnd_np1().powi(3);
    p.phaser_sweep = rng.rnd_np1().powi(3);
    p.repeat_speed = rng.rnd_np1();
    p.change_speed = rng.rnd_np1();
    p.change_amount = rng.rnd_np1();
    p
}

/// Nudges a random subset of the fields selected by `mask`.
///
/// One 24-bit word is drawn; a field changes only when its bit is set in
/// both the word and `mask`. Each changed field moves by a uniform amount in
/// `[-range/2, range/2]` and is clamped to `[-1, 1]` for signed fields or
/// `[0, 1]` otherwise. An empty mask or zero range leaves `params` untouched
/// and draws nothing.
pub fn mutate<R: RandomSource + ?Sized>(
    params: &mut ParameterSet,
    range: f32,
    mask: u32,
    rng: &mut R,
) {
    if mask == 0 || range == 0.0 {
        return;
    }

    let half = range * 0.5;
    let word = 1 + rng.next(0x00FF_FFFF);
    for field in ParamField::ALL {
        if word & field.bit() & mask == 0 {
            continue;
        }
        let value = params.get(field) + rng.frnd(range) - half;
        params.set(field, value.clamp(field.lower_bound(), 1.0));
    }
}
