//! `rFX ` container: signature, version 200, and the 96-byte record.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{FormatVersion, SfxError, SfxResult};
use crate::params::{ParamField, ParameterSet, WaveType};

use super::{read_f32, read_i32};

/// File signature.
pub const RFX_SIGNATURE: &[u8; 4] = b"rFX ";

/// The only container version read or written.
pub const RFX_VERSION: u16 = 200;

/// Record size: seed, wave type and 22 floats, 4 bytes each.
pub const RECORD_LEN: usize = 96;

impl ParameterSet {
    /// Encodes the 96-byte record: `u32` seed, `i32` wave type, then every
    /// float field in declared order.
    pub fn encode_record(&self) -> [u8; RECORD_LEN] {
        let words = [self.rand_seed.to_le_bytes(), self.wave_type.as_i32().to_le_bytes()]
            .into_iter()
            .chain(self.floats().into_iter().map(f32::to_le_bytes));

        let mut out = [0u8; RECORD_LEN];
        for (slot, word) in out.chunks_exact_mut(4).zip(words) {
            slot.copy_from_slice(&word);
        }
        out
    }

    /// Decodes a 96-byte record.
    pub fn decode_record(record: &[u8; RECORD_LEN]) -> SfxResult<Self> {
        read_record(&mut &record[..])
    }
}

fn read_record<R: Read>(reader: &mut R) -> SfxResult<ParameterSet> {
    let rand_seed = reader.read_u32::<LittleEndian>().map_err(SfxError::FileRead)?;
    let wave = read_i32(reader)?;
    let wave_type = WaveType::from_i32(wave).ok_or(SfxError::InvalidWaveType(wave))?;

    let mut params = ParameterSet {
        rand_seed,
        wave_type,
        ..ParameterSet::default()
    };
    for field in ParamField::ALL {
        params.set(field, read_f32(reader)?);
    }
    Ok(params)
}

/// Reads the part of an `rFX ` file after the signature.
pub(super) fn read_body<R: Read>(reader: &mut R) -> SfxResult<ParameterSet> {
    let version = reader.read_u16::<LittleEndian>().map_err(SfxError::FileRead)?;
    let length = reader.read_u16::<LittleEndian>().map_err(SfxError::FileRead)?;

    if version != RFX_VERSION {
        return Err(SfxError::UnsupportedVersion(FormatVersion::Rfx(version)));
    }
    if length as usize != RECORD_LEN {
        return Err(SfxError::InvalidRecordLength(length));
    }

    let mut record = [0u8; RECORD_LEN];
    reader.read_exact(&mut record).map_err(SfxError::FileRead)?;
    ParameterSet::decode_record(&record)
}

/// Writes a complete `rFX ` file to `writer`.
pub fn write_params<W: Write>(params: &ParameterSet, writer: &mut W) -> SfxResult<()> {
    write_inner(params, writer).map_err(SfxError::FileWrite)
}

fn write_inner<W: Write>(params: &ParameterSet, writer: &mut W) -> std::io::Result<()> {
    writer.write_all(RFX_SIGNATURE)?;
    writer.write_u16::<LittleEndian>(RFX_VERSION)?;
    writer.write_u16::<LittleEndian>(RECORD_LEN as u16)?;
    writer.write_all(&params.encode_record())?;
    Ok(())
}
