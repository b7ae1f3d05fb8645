//! CLI command implementations

pub mod convert;
pub mod inspect;
pub mod mutate;
pub mod new;
pub mod random;
pub mod render;

use std::path::{Path, PathBuf};

use sfxgen_core::PcgSource;

/// Output path for a rendered parameter file: the text after the last dot of
/// the file name is replaced with `wav`, or `.wav` is appended.
pub fn default_wav_path(input: &Path) -> PathBuf {
    input.with_extension("wav")
}

/// `out.rfx` with index 3 becomes `out_003.rfx`.
pub fn numbered_path(path: &Path, index: u32) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}_{:03}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}_{:03}", stem, index),
    };
    path.with_file_name(name)
}

/// Random source for a command: the explicit seed when given, otherwise a
/// fresh entropy seed. Returns the seed actually used.
pub fn seeded_source(seed: Option<u32>) -> (PcgSource, u32) {
    match seed {
        Some(s) => (PcgSource::new(s), s),
        None => PcgSource::from_entropy(),
    }
}
