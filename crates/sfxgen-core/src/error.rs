//! Error types for the sfxgen core.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for sfxgen operations.
pub type SfxResult<T> = Result<T, SfxError>;

/// Version tag found in a parameter file that the codec does not accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatVersion {
    /// Version field of an `rFX ` container.
    Rfx(u16),
    /// Leading version word of a legacy `.sfs` file.
    Sfs(i32),
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatVersion::Rfx(v) => write!(f, "rFX version {}", v),
            FormatVersion::Sfs(v) => write!(f, "SFS version {}", v),
        }
    }
}

/// Errors that can occur while allocating a synth context or moving
/// parameters to and from disk.
#[derive(Debug, Error)]
pub enum SfxError {
    /// The sample buffer could not be allocated.
    #[error("failed to allocate sample buffer for {samples} samples")]
    AllocationFailure {
        /// Requested buffer length in samples.
        samples: u64,
    },

    /// A parameter file could not be opened or created.
    #[error("file open failed: {}", path.display())]
    FileOpen {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Reading a parameter stream failed or ended early.
    #[error("file read failed: {0}")]
    FileRead(#[source] io::Error),

    /// Writing a parameter or wave stream failed.
    #[error("file write failed: {0}")]
    FileWrite(#[source] io::Error),

    /// The file carries a version the codec does not support.
    #[error("{0} not supported")]
    UnsupportedVersion(FormatVersion),

    /// The rFX payload length is not 96 bytes.
    #[error("invalid rFX wave parameters size: {0}")]
    InvalidRecordLength(u16),

    /// The stored wave type is outside the known range.
    #[error("invalid wave type: {0}")]
    InvalidWaveType(i32),
}

impl SfxError {
    /// Creates a file open error for `path`.
    pub fn file_open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileOpen {
            path: path.into(),
            source,
        }
    }

    /// Stable code identifying the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            SfxError::AllocationFailure { .. } => "SFX_001",
            SfxError::FileOpen { .. } => "SFX_002",
            SfxError::FileRead(_) => "SFX_003",
            SfxError::FileWrite(_) => "SFX_004",
            SfxError::UnsupportedVersion(_) => "SFX_005",
            SfxError::InvalidRecordLength(_) => "SFX_006",
            SfxError::InvalidWaveType(_) => "SFX_007",
        }
    }

    /// Returns true for errors raised by format validation rather than I/O.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            SfxError::UnsupportedVersion(_)
                | SfxError::InvalidRecordLength(_)
                | SfxError::InvalidWaveType(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_version_message() {
        let err = SfxError::UnsupportedVersion(FormatVersion::Sfs(99));
        assert_eq!(err.to_string(), "SFS version 99 not supported");

        let err = SfxError::UnsupportedVersion(FormatVersion::Rfx(300));
        assert_eq!(err.to_string(), "rFX version 300 not supported");
    }

    #[test]
    fn test_file_open_helper() {
        let err = SfxError::file_open(
            "missing.rfx",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("missing.rfx"));
        assert_eq!(err.code(), "SFX_002");
        assert!(!err.is_format_error());
    }

    #[test]
    fn test_format_errors() {
        assert!(SfxError::InvalidRecordLength(64).is_format_error());
        assert!(SfxError::InvalidWaveType(9).is_format_error());
        assert!(!SfxError::AllocationFailure { samples: 1 }.is_format_error());
    }
}
