//! Process exit codes.
//!
//! Codes follow `sysexits.h`. Commands attach an [`InputError`],
//! [`OutputError`] or [`UsageError`] context to failures so `main` can pick
//! the code without inspecting messages.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use sfxgen_core::SfxError;

/// Command line usage error.
pub const EX_USAGE: u8 = 64;
/// Internal software error (the sample buffer could not be allocated).
pub const EX_SOFTWARE: u8 = 70;
/// Output file could not be written.
pub const EX_IOERR: u8 = 74;
/// Parameter file could not be loaded.
pub const EX_CONFIG: u8 = 78;

/// Context marker for a parameter file that failed to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputError {
    pub path: PathBuf,
}

impl InputError {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load {}", self.path.display())
    }
}

/// Context marker for an output file that failed to save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputError {
    pub path: PathBuf,
}

impl OutputError {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to save {}", self.path.display())
    }
}

/// Invalid combination of arguments that clap cannot express.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageError(pub String);

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for UsageError {}

/// Exit code for a failed command.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<UsageError>().is_some() {
        EX_USAGE
    } else if err.downcast_ref::<OutputError>().is_some() {
        EX_IOERR
    } else if err.downcast_ref::<InputError>().is_some() {
        EX_CONFIG
    } else if let Some(SfxError::AllocationFailure { .. }) = err.downcast_ref::<SfxError>() {
        EX_SOFTWARE
    } else {
        1
    }
}

/// Prints a failed command's error chain and returns its exit code.
pub fn report(err: &anyhow::Error) -> ExitCode {
    eprintln!("{}: {:#}", colored::Colorize::red("error"), err);
    ExitCode::from(exit_code_for(err))
}
