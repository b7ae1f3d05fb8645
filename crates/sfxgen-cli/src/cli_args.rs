//! CLI argument definitions for the sfxgen command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use sfxgen_cli::commands::mutate::parse_mask;
use sfxgen_core::synth::{DEFAULT_MAX_DURATION, DEFAULT_SAMPLE_RATE};
use sfxgen_core::{SampleFormat, SoundArchetype, WaveType};

/// sfxgen - procedural retro sound effects
#[derive(Parser)]
#[command(name = "sfxgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Synthesize parameter files (rFX or legacy .sfs) to WAV
    Render {
        /// Parameter files to render
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output WAV path, repeated once per file in order (default: each
        /// input path with a .wav extension)
        #[arg(short, long)]
        output: Vec<PathBuf>,

        /// Sample format (u8, i16, f32)
        #[arg(long, default_value = "i16")]
        format: SampleFormat,

        /// Output sample rate in Hz
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE, value_parser = clap::value_parser!(u32).range(1..))]
        sample_rate: u32,

        /// Maximum sound length in seconds
        #[arg(long, default_value_t = DEFAULT_MAX_DURATION, value_parser = clap::value_parser!(u32).range(1..))]
        duration: u32,

        /// Seed for files that do not store one
        #[arg(long)]
        seed: Option<u32>,
    },

    /// Create parameters from an archetype (pickup-coin, laser-shoot, explosion,
    /// powerup, hit-hurt, jump, blip-select, synth)
    New {
        /// Sound archetype
        archetype: SoundArchetype,

        /// Output rFX path
        #[arg(short, long)]
        output: PathBuf,

        /// Base seed (default: random)
        #[arg(long)]
        seed: Option<u32>,

        /// Number of variations to create
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,

        /// Also render each file to WAV
        #[arg(long)]
        wav: bool,
    },

    /// Create fully random parameters
    Random {
        /// Output rFX path
        #[arg(short, long)]
        output: PathBuf,

        /// Wave type (square, sawtooth, sine, noise, triangle, pink-noise)
        #[arg(long)]
        wave: Option<WaveType>,

        /// Seed (default: random)
        #[arg(long)]
        seed: Option<u32>,
    },

    /// Randomly perturb an existing parameter file
    Mutate {
        /// Input parameter file
        input: PathBuf,

        /// Output rFX path
        #[arg(short, long)]
        output: PathBuf,

        /// Maximum change per field
        #[arg(long, default_value_t = sfxgen_core::generators::DEFAULT_MUTATE_RANGE)]
        range: f32,

        /// Bit mask of fields allowed to change (decimal or 0x hex)
        #[arg(long, default_value = "0x00FFFFDF", value_parser = parse_mask)]
        mask: u32,

        /// Seed (default: random)
        #[arg(long)]
        seed: Option<u32>,
    },

    /// Convert a parameter file (typically legacy .sfs) to rFX
    Convert {
        /// Input parameter file
        input: PathBuf,

        /// Output rFX path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the contents of a parameter file
    Inspect {
        /// Parameter file
        file: PathBuf,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfxgen_core::generators::DEFAULT_MUTATE_MASK;

    #[test]
    fn test_cli_parses_render_defaults() {
        let cli = Cli::try_parse_from(["sfxgen", "render", "coin.rfx"]).unwrap();
        assert_eq!(cli.verbose, 0);
        match cli.command {
            Commands::Render {
                files,
                output,
                format,
                sample_rate,
                duration,
                seed,
            } => {
                assert_eq!(files, vec![PathBuf::from("coin.rfx")]);
                assert!(output.is_empty());
                assert_eq!(format, SampleFormat::I16);
                assert_eq!(sample_rate, 44100);
                assert_eq!(duration, 10);
                assert!(seed.is_none());
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_parses_render_options() {
        let cli = Cli::try_parse_from([
            "sfxgen",
            "-vv",
            "render",
            "a.sfs",
            "-o",
            "a.wav",
            "--format",
            "f32",
            "--sample-rate",
            "22050",
            "--duration",
            "3",
            "--seed",
            "42",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Render {
                output,
                format,
                sample_rate,
                duration,
                seed,
                ..
            } => {
                assert_eq!(output, vec![PathBuf::from("a.wav")]);
                assert_eq!(format, SampleFormat::F32);
                assert_eq!(sample_rate, 22050);
                assert_eq!(duration, 3);
                assert_eq!(seed, Some(42));
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_parses_render_output_per_file() {
        let cli = Cli::try_parse_from([
            "sfxgen", "render", "a.rfx", "b.rfx", "-o", "a.wav", "-o", "b.wav",
        ])
        .unwrap();
        match cli.command {
            Commands::Render { files, output, .. } => {
                assert_eq!(files.len(), 2);
                assert_eq!(output, vec![PathBuf::from("a.wav"), PathBuf::from("b.wav")]);
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_render_requires_files() {
        assert!(Cli::try_parse_from(["sfxgen", "render"]).is_err());
    }

    #[test]
    fn test_cli_rejects_zero_duration() {
        assert!(Cli::try_parse_from(["sfxgen", "render", "a.rfx", "--duration", "0"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let err = Cli::try_parse_from(["sfxgen", "render", "a.rfx", "--format", "s24"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("s24"));
    }

    #[test]
    fn test_cli_parses_new_with_alias() {
        let cli = Cli::try_parse_from([
            "sfxgen", "new", "coin", "-o", "coin.rfx", "--count", "4", "--wav",
        ])
        .unwrap();
        match cli.command {
            Commands::New {
                archetype,
                output,
                seed,
                count,
                wav,
            } => {
                assert_eq!(archetype, SoundArchetype::PickupCoin);
                assert_eq!(output, PathBuf::from("coin.rfx"));
                assert!(seed.is_none());
                assert_eq!(count, 4);
                assert!(wav);
            }
            _ => panic!("expected new command"),
        }
    }

    #[test]
    fn test_cli_new_requires_output() {
        let err = Cli::try_parse_from(["sfxgen", "new", "jump"]).err().unwrap();
        assert!(err.to_string().contains("--output"));
    }

    #[test]
    fn test_cli_parses_random_wave() {
        let cli = Cli::try_parse_from(["sfxgen", "random", "-o", "r.rfx", "--wave", "pink-noise"])
            .unwrap();
        match cli.command {
            Commands::Random { wave, .. } => assert_eq!(wave, Some(WaveType::PinkNoise)),
            _ => panic!("expected random command"),
        }
    }

    #[test]
    fn test_cli_parses_mutate_defaults() {
        let cli = Cli::try_parse_from(["sfxgen", "mutate", "in.rfx", "-o", "out.rfx"]).unwrap();
        match cli.command {
            Commands::Mutate {
                input,
                range,
                mask,
                seed,
                ..
            } => {
                assert_eq!(input, PathBuf::from("in.rfx"));
                assert_eq!(range, 0.1);
                assert_eq!(mask, DEFAULT_MUTATE_MASK);
                assert!(seed.is_none());
            }
            _ => panic!("expected mutate command"),
        }
    }

    #[test]
    fn test_cli_parses_mutate_hex_mask() {
        let cli = Cli::try_parse_from([
            "sfxgen", "mutate", "in.rfx", "-o", "out.rfx", "--mask", "0x20000", "--range", "2",
        ])
        .unwrap();
        match cli.command {
            Commands::Mutate { mask, range, .. } => {
                assert_eq!(mask, 0x20000);
                assert_eq!(range, 2.0);
            }
            _ => panic!("expected mutate command"),
        }
    }

    #[test]
    fn test_cli_parses_convert_and_inspect() {
        let cli = Cli::try_parse_from(["sfxgen", "convert", "old.sfs", "-o", "new.rfx"]).unwrap();
        assert!(matches!(cli.command, Commands::Convert { .. }));

        let cli = Cli::try_parse_from(["sfxgen", "inspect", "new.rfx", "--json"]).unwrap();
        match cli.command {
            Commands::Inspect { file, json } => {
                assert_eq!(file, PathBuf::from("new.rfx"));
                assert!(json);
            }
            _ => panic!("expected inspect command"),
        }
    }
}
