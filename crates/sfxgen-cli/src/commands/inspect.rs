//! Inspect command implementation
//!
//! Prints the contents of a parameter file, either as a colored field list
//! or as a JSON document.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use sfxgen_core::{load_params, LoadedParams, ParamSource, ParameterSet};

use crate::exit::InputError;

/// JSON shape printed by `inspect --json`.
#[derive(Debug, Serialize)]
pub struct InspectOutput {
    pub path: String,
    /// `rfx` or `sfs`.
    pub format: &'static str,
    pub version: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sfs_volume: Option<f32>,
    pub params: ParameterSet,
}

impl InspectOutput {
    pub fn new(path: &Path, loaded: &LoadedParams) -> Self {
        let (format, version) = match loaded.source {
            ParamSource::Rfx => ("rfx", sfxgen_core::codec::RFX_VERSION as i32),
            ParamSource::Sfs { version } => ("sfs", version),
        };
        Self {
            path: path.display().to_string(),
            format,
            version,
            sfs_volume: loaded.sfs_volume,
            params: loaded.params,
        }
    }
}

/// Run the inspect command
pub fn run(file: &Path, json: bool) -> Result<ExitCode> {
    let loaded = load_params(file).with_context(|| InputError::new(file))?;
    let output = InspectOutput::new(file, &loaded);

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_human(&output);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_human(output: &InspectOutput) {
    println!("{} {}", "Parameter file:".cyan().bold(), output.path);
    println!(
        "  {} {} version {}",
        "format:".dimmed(),
        output.format,
        output.version
    );
    if let Some(volume) = output.sfs_volume {
        println!("  {} {}", "volume:".dimmed(), volume);
    }

    let p = &output.params;
    let seed = if p.rand_seed == 0 {
        "unseeded".dimmed().to_string()
    } else {
        p.rand_seed.to_string()
    };
    println!("  {} {}", "seed:".dimmed(), seed);
    println!("  {} {}", "wave:".dimmed(), p.wave_type);

    for (field, value) in p.fields() {
        let line = format!("  {:<18} {:>9.4}", field.name(), value);
        if value != ParameterSet::default().get(field) {
            println!("{}", line.bold());
        } else {
            println!("{}", line);
        }
    }
}
