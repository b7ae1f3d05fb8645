//! Convert command implementation
//!
//! Rewrites a parameter file (usually a legacy `.sfs`) as an `rFX ` file.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use sfxgen_core::{load_params, save_params, ParamSource};

use crate::exit::{InputError, OutputError};

/// Run the convert command
pub fn run(input: &Path, output: &Path) -> Result<ExitCode> {
    let loaded = load_params(input).with_context(|| InputError::new(input))?;
    save_params(&loaded.params, output).with_context(|| OutputError::new(output))?;

    let from = match loaded.source {
        ParamSource::Rfx => "rFX".to_string(),
        ParamSource::Sfs { version } => format!("sfs v{}", version),
    };
    println!(
        "{} {} ({}) {}",
        "Converted".green().bold(),
        input.display(),
        from,
        format!("-> {}", output.display()).dimmed()
    );
    if let Some(volume) = loaded.sfs_volume {
        // the rFX record has no volume field
        println!("  {} legacy volume {} dropped", "!".yellow(), volume);
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit::{exit_code_for, EX_CONFIG};
    use sfxgen_core::WaveType;

    /// Version 101 file: wave, 13 floats, filter byte, 10 floats.
    fn legacy_101(wave: i32) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&101i32.to_le_bytes());
        buf.extend_from_slice(&wave.to_le_bytes());
        for i in 0..13 {
            buf.extend_from_slice(&(i as f32 * 0.05).to_le_bytes());
        }
        buf.push(0);
        for i in 0..10 {
            buf.extend_from_slice(&(i as f32 * 0.05).to_le_bytes());
        }
        buf
    }

    #[test]
    fn test_convert_legacy() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("old.sfs");
        let output = dir.path().join("new.rfx");
        std::fs::write(&input, legacy_101(2)).unwrap();

        run(&input, &output).unwrap();

        let original = load_params(&input).unwrap();
        let converted = load_params(&output).unwrap();
        assert_eq!(converted.source, ParamSource::Rfx);
        assert_eq!(converted.params.wave_type, WaveType::Sine);
        assert_eq!(converted.params.floats(), original.params.floats());
        assert_eq!(std::fs::metadata(&output).unwrap().len(), 104);
    }

    #[test]
    fn test_convert_unsupported_version() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("old.sfs");
        let mut bytes = legacy_101(0);
        bytes[0..4].copy_from_slice(&103i32.to_le_bytes());
        std::fs::write(&input, bytes).unwrap();

        let output = dir.path().join("new.rfx");
        let err = run(&input, &output).unwrap_err();
        assert_eq!(exit_code_for(&err), EX_CONFIG);
        assert!(!output.exists());
    }
}
