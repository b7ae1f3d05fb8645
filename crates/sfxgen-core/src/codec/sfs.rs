//! Legacy `.sfs` settings files (versions 100, 101 and 102).

use std::io::Read;

use byteorder::ReadBytesExt;

use crate::error::{FormatVersion, SfxError, SfxResult};
use crate::params::{ParameterSet, WaveType};

use super::{read_f32, read_i32};

/// Versions accepted by the legacy reader.
pub const SFS_VERSIONS: [i32; 3] = [100, 101, 102];

/// Output volume reported for files that do not store one.
pub const DEFAULT_SFS_VOLUME: f32 = 0.5;

/// Reads the part of a legacy file after the version word.
///
/// Returns the parameters and the stored output volume. Fields the layout
/// lacks keep their reset baseline values.
pub(super) fn read_body<R: Read>(version: i32, reader: &mut R) -> SfxResult<(ParameterSet, f32)> {
    if !SFS_VERSIONS.contains(&version) {
        return Err(SfxError::UnsupportedVersion(FormatVersion::Sfs(version)));
    }
    let extended = version >= 101;

    let wave = read_i32(reader)?;
    let mut p = ParameterSet {
        wave_type: WaveType::from_i32(wave).ok_or(SfxError::InvalidWaveType(wave))?,
        ..ParameterSet::default()
    };

    let volume = if version == 102 {
        read_f32(reader)?
    } else {
        DEFAULT_SFS_VOLUME
    };

    p.start_frequency = read_f32(reader)?;
    p.min_frequency = read_f32(reader)?;
    p.slide = read_f32(reader)?;
    p.delta_slide = if extended { read_f32(reader)? } else { 0.0 };

    p.square_duty = read_f32(reader)?;
    p.duty_sweep = read_f32(reader)?;

    p.vibrato_depth = read_f32(reader)?;
    p.vibrato_speed = read_f32(reader)?;
    let _vibrato_phase_delay = read_f32(reader)?;

    p.attack_time = read_f32(reader)?;
    p.sustain_time = read_f32(reader)?;
    p.decay_time = read_f32(reader)?;
    p.sustain_punch = read_f32(reader)?;

    let _filter_on = reader.read_u8().map_err(SfxError::FileRead)?;
    p.lpf_resonance = read_f32(reader)?;
    p.lpf_cutoff = read_f32(reader)?;
    p.lpf_cutoff_sweep = read_f32(reader)?;
    p.hpf_cutoff = read_f32(reader)?;
    p.hpf_cutoff_sweep = read_f32(reader)?;

    p.phaser_offset = read_f32(reader)?;
    p.phaser_sweep = read_f32(reader)?;
    p.repeat_speed = read_f32(reader)?;

    if extended {
        p.change_speed = read_f32(reader)?;
        p.change_amount = read_f32(reader)?;
    } else {
        p.change_speed = 0.0;
        p.change_amount = 0.0;
    }

    Ok((p, volume))
}
