//! Mutate command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use sfxgen_core::{load_params, mutate, save_params, ParamField};

use super::seeded_source;
use crate::exit::{InputError, OutputError};

/// Run the mutate command
///
/// Loads `input`, jitters the fields selected by `mask` by up to `range`
/// and saves the result as an `rFX ` file. The input's `rand_seed` is kept
/// so noise sounds keep their texture; the mutation seed is only reported.
pub fn run(
    input: &Path,
    output: &Path,
    range: f32,
    mask: u32,
    seed: Option<u32>,
) -> Result<ExitCode> {
    let loaded = load_params(input).with_context(|| InputError::new(input))?;
    let original = loaded.params;

    let (mut rng, seed) = seeded_source(seed);
    let mut params = original;
    mutate(&mut params, range, mask, &mut rng);
    save_params(&params, output).with_context(|| OutputError::new(output))?;

    let changed: Vec<&str> = ParamField::ALL
        .iter()
        .filter(|f| original.get(**f).to_bits() != params.get(**f).to_bits())
        .map(|f| f.name())
        .collect();

    println!(
        "{} {} {} (mutation seed {})",
        "Mutated".green().bold(),
        input.display(),
        format!("-> {}", output.display()).dimmed(),
        seed
    );
    if changed.is_empty() {
        println!("  {}", "no fields changed".yellow());
    } else {
        println!("  {} {}", "changed:".dimmed(), changed.join(", "));
    }
    Ok(ExitCode::SUCCESS)
}

/// Parses a field mask given as decimal or `0x`-prefixed hex.
pub fn parse_mask(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(&hex.replace('_', ""), 16),
        None => s.replace('_', "").parse::<u32>(),
    };
    parsed.map_err(|e| format!("invalid mask {}: {}", s, e))
}
