//! New command implementation
//!
//! Builds archetype parameters and saves them as `rFX ` files, optionally
//! rendering each one next to it.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use sfxgen_core::rng::derive_variation_seed;
use sfxgen_core::{save_params, save_wav, PcgSource, SoundArchetype, SynthConfig, SynthContext};

use super::{default_wav_path, numbered_path, seeded_source};
use crate::exit::{OutputError, UsageError};

/// Run the new command
///
/// With `count > 1` each variation gets its own seed derived from the base
/// seed and is saved as `<stem>_NNN.<ext>`.
pub fn run(
    archetype: SoundArchetype,
    output: &Path,
    seed: Option<u32>,
    count: u32,
    wav: bool,
) -> Result<ExitCode> {
    if count == 0 {
        return Err(UsageError("--count must be at least 1".into()).into());
    }

    let (_, base_seed) = seeded_source(seed);
    let mut ctx = if wav {
        Some(SynthContext::new(SynthConfig::default()).context("failed to create synth context")?)
    } else {
        None
    };

    for index in 0..count {
        let (seed, path) = if count == 1 {
            (base_seed, output.to_path_buf())
        } else {
            (derive_variation_seed(base_seed, index), numbered_path(output, index))
        };
        create_one(archetype, seed, &path, ctx.as_mut())?;
    }

    Ok(ExitCode::SUCCESS)
}

fn create_one(
    archetype: SoundArchetype,
    seed: u32,
    path: &Path,
    ctx: Option<&mut SynthContext>,
) -> Result<()> {
    let mut rng = PcgSource::new(seed);
    let mut params = archetype.generate(&mut rng);
    params.rand_seed = seed;
    save_params(&params, path).with_context(|| OutputError::new(path))?;

    println!(
        "{} {} {} (seed {})",
        "Created".green().bold(),
        archetype,
        path.display(),
        seed
    );

    if let Some(ctx) = ctx {
        let wav_path = default_wav_path(path);
        let frames = ctx.generate(&params, &mut PcgSource::new(seed));
        save_wav(ctx, frames, &wav_path).with_context(|| OutputError::new(&wav_path))?;
        println!("  {} {}", "->".dimmed(), wav_path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfxgen_core::{load_params, ParamSource};

    #[test]
    fn test_new_stamps_seed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("laser.rfx");
        run(SoundArchetype::LaserShoot, &path, Some(4242), 1, false).unwrap();

        let loaded = load_params(&path).unwrap();
        assert_eq!(loaded.source, ParamSource::Rfx);
        assert_eq!(loaded.params.rand_seed, 4242);

        let expected = SoundArchetype::LaserShoot.generate(&mut PcgSource::new(4242));
        assert_eq!(loaded.params.floats(), expected.floats());
        assert_eq!(loaded.params.wave_type, expected.wave_type);
    }

    #[test]
    fn test_new_count_derives_variations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jump.rfx");
        run(SoundArchetype::Jump, &path, Some(1), 3, false).unwrap();

        let seeds: Vec<u32> = (0..3)
            .map(|i| {
                load_params(dir.path().join(format!("jump_{:03}.rfx", i)))
                    .unwrap()
                    .params
                    .rand_seed
            })
            .collect();
        assert_eq!(seeds[0], derive_variation_seed(1, 0));
        assert_ne!(seeds[0], seeds[1]);
        assert_ne!(seeds[1], seeds[2]);
        assert!(!path.exists());
    }

    #[test]
    fn test_new_with_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blip.rfx");
        run(SoundArchetype::BlipSelect, &path, Some(8), 1, true).unwrap();

        let reader = hound::WavReader::open(dir.path().join("blip.wav")).unwrap();
        assert_eq!(reader.spec().sample_rate, 44100);
        assert!(reader.len() > 0);
    }

    #[test]
    fn test_zero_count_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(SoundArchetype::Synth, &dir.path().join("x.rfx"), None, 0, false).is_err());
    }
}
