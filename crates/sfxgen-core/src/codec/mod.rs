//! Parameter file codec.
//!
//! Two on-disk layouts are understood:
//!
//! - `rFX ` files: a 4-byte signature, a `u16` version (200), a `u16` payload
//!   length (96) and the fixed 96-byte record. This is the only layout that is
//!   written.
//! - Legacy `.sfs` files: a leading `i32` version of 100, 101 or 102 followed
//!   by a version-gated field sequence.
//!
//! All multi-byte values are little-endian.

mod rfx;
mod sfs;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{SfxError, SfxResult};
use crate::params::ParameterSet;

pub use rfx::{write_params, RECORD_LEN, RFX_SIGNATURE, RFX_VERSION};
pub use sfs::{DEFAULT_SFS_VOLUME, SFS_VERSIONS};

/// Layout a parameter set was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
    /// Current `rFX ` container.
    Rfx,
    /// Legacy settings file.
    Sfs {
        /// Leading version word (100, 101 or 102).
        version: i32,
    },
}

/// Result of a successful load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadedParams {
    pub params: ParameterSet,
    pub source: ParamSource,
    /// Output volume of a legacy file. Files older than version 102 report
    /// the default of 0.5; `rFX ` files report `None`.
    pub sfs_volume: Option<f32>,
}

/// Reads a parameter set from `reader`, detecting the layout from its first
/// four bytes.
pub fn read_params<R: Read>(reader: &mut R) -> SfxResult<LoadedParams> {
    let mut header = [0u8; 4];
    reader.read_exact(&mut header).map_err(SfxError::FileRead)?;

    if &header == RFX_SIGNATURE {
        let params = rfx::read_body(reader)?;
        Ok(LoadedParams {
            params,
            source: ParamSource::Rfx,
            sfs_volume: None,
        })
    } else {
        let version = i32::from_le_bytes(header);
        let (params, volume) = sfs::read_body(version, reader)?;
        Ok(LoadedParams {
            params,
            source: ParamSource::Sfs { version },
            sfs_volume: Some(volume),
        })
    }
}

/// Loads a parameter file from disk.
pub fn load_params(path: impl AsRef<Path>) -> SfxResult<LoadedParams> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| SfxError::file_open(path, e))?;
    let mut reader = BufReader::new(file);

    match read_params(&mut reader) {
        Ok(loaded) => {
            tracing::debug!(path = %path.display(), source = ?loaded.source, "loaded parameters");
            Ok(loaded)
        }
        Err(e) => {
            if e.is_format_error() {
                tracing::warn!(path = %path.display(), error = %e, "rejected parameter file");
            }
            Err(e)
        }
    }
}

/// Loads a parameter file into `dest`.
///
/// `dest` is only assigned when the whole file decodes; on error it keeps its
/// previous value. Returns the legacy output volume, if any.
pub fn load_params_into(dest: &mut ParameterSet, path: impl AsRef<Path>) -> SfxResult<Option<f32>> {
    let loaded = load_params(path)?;
    *dest = loaded.params;
    Ok(loaded.sfs_volume)
}

/// Saves `params` as an `rFX ` file, replacing any existing file.
pub fn save_params(params: &ParameterSet, path: impl AsRef<Path>) -> SfxResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| SfxError::file_open(path, e))?;
    let mut writer = BufWriter::new(file);
    write_params(params, &mut writer)?;
    writer.flush().map_err(SfxError::FileWrite)?;
    tracing::debug!(path = %path.display(), "saved parameters");
    Ok(())
}

fn read_f32<R: Read>(reader: &mut R) -> SfxResult<f32> {
    reader.read_f32::<LittleEndian>().map_err(SfxError::FileRead)
}

fn read_i32<R: Read>(reader: &mut R) -> SfxResult<i32> {
    reader.read_i32::<LittleEndian>().map_err(SfxError::FileRead)
}
