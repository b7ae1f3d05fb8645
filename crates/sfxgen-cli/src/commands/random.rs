//! Random command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use sfxgen_core::{randomize, save_params, RandomSource, WaveType};

use super::seeded_source;
use crate::exit::OutputError;

/// Wave types a random sound may pick when none is given.
const CLASSIC_WAVES: [WaveType; 4] = [
    WaveType::Square,
    WaveType::Sawtooth,
    WaveType::Sine,
    WaveType::Noise,
];

/// Run the random command
///
/// Without `wave` the wave type is drawn from the same seeded source,
/// among the four classic waves (square, sawtooth, sine, noise).
pub fn run(output: &Path, wave: Option<WaveType>, seed: Option<u32>) -> Result<ExitCode> {
    let (mut rng, seed) = seeded_source(seed);
    let wave =
        wave.unwrap_or_else(|| CLASSIC_WAVES[rng.next(CLASSIC_WAVES.len() as u32) as usize]);

    let mut params = randomize(&mut rng, wave);
    params.rand_seed = seed;
    save_params(&params, output).with_context(|| OutputError::new(output))?;

    println!(
        "{} {} {} (seed {})",
        "Randomized".green().bold(),
        wave,
        output.display(),
        seed
    );
    Ok(ExitCode::SUCCESS)
}
