//! Render command implementation
//!
//! Loads parameter files and writes each synthesized sound as a WAV file.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use sfxgen_core::{load_params, save_wav, PcgSource, SynthConfig, SynthContext, Termination};

use super::{default_wav_path, seeded_source};
use crate::exit::{InputError, OutputError, UsageError};

/// Run the render command
///
/// # Arguments
/// * `files` - Parameter files (`rFX ` or legacy `.sfs`)
/// * `outputs` - WAV paths, one per input in order; empty for the default
///   `<file>.wav` names
/// * `config` - Output format, rate and maximum duration
/// * `seed` - Fallback seed for files with `rand_seed == 0`
///
/// # Returns
/// Exit code: 0 success
pub fn run(
    files: &[PathBuf],
    outputs: &[PathBuf],
    config: SynthConfig,
    seed: Option<u32>,
) -> Result<ExitCode> {
    if !outputs.is_empty() && outputs.len() != files.len() {
        return Err(UsageError(format!(
            "got {} parameter files but {} -o/--output paths; give one per file or none",
            files.len(),
            outputs.len()
        ))
        .into());
    }

    let mut ctx = SynthContext::new(config).context("failed to create synth context")?;

    for (i, file) in files.iter().enumerate() {
        let out = outputs
            .get(i)
            .cloned()
            .unwrap_or_else(|| default_wav_path(file));
        render_one(&mut ctx, file, &out, seed)?;
    }

    Ok(ExitCode::SUCCESS)
}

/// Renders one parameter file into `out`, returning the written frame count.
pub fn render_one(
    ctx: &mut SynthContext,
    file: &Path,
    out: &Path,
    seed: Option<u32>,
) -> Result<usize> {
    let loaded = load_params(file).with_context(|| InputError::new(file))?;
    let params = loaded.params;

    let (mut rng, used_seed) = if params.rand_seed != 0 {
        (PcgSource::new(params.rand_seed), params.rand_seed)
    } else {
        seeded_source(seed)
    };

    let report = ctx.generate_with_report(&params, &mut rng);
    save_wav(ctx, report.frames, out).with_context(|| OutputError::new(out))?;

    tracing::info!(
        input = %file.display(),
        output = %out.display(),
        seed = used_seed,
        frames = report.frames,
        "rendered"
    );
    println!(
        "{} {} {} ({} frames, {:.2}s, {})",
        "Rendered".green().bold(),
        file.display(),
        format!("-> {}", out.display()).dimmed(),
        report.frames,
        report.frames as f64 / ctx.sample_rate() as f64,
        termination_label(report.termination)
    );
    Ok(report.frames)
}

fn termination_label(termination: Termination) -> &'static str {
    match termination {
        Termination::Complete => "buffer full",
        Termination::MinFrequency => "min frequency",
        Termination::Envelope => "envelope end",
    }
}
