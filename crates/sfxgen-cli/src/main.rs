//! sfxgen CLI - procedural retro sound effects
//!
//! Renders sfxr-style parameter files to WAV and creates new parameter files
//! from archetypes, randomization and mutation.

mod cli_args;

use clap::Parser;
use std::process::ExitCode;

use cli_args::{Cli, Commands};
use sfxgen_cli::exit::{self, EX_USAGE};
use sfxgen_cli::{commands, logging};
use sfxgen_core::SynthConfig;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version also arrive here
            return if e.use_stderr() {
                ExitCode::from(EX_USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            files,
            output,
            format,
            sample_rate,
            duration,
            seed,
        } => commands::render::run(
            &files,
            &output,
            SynthConfig {
                sample_format: format,
                sample_rate,
                max_duration_seconds: duration,
            },
            seed,
        ),
        Commands::New {
            archetype,
            output,
            seed,
            count,
            wav,
        } => commands::new::run(archetype, &output, seed, count, wav),
        Commands::Random { output, wave, seed } => commands::random::run(&output, wave, seed),
        Commands::Mutate {
            input,
            output,
            range,
            mask,
            seed,
        } => commands::mutate::run(&input, &output, range, mask, seed),
        Commands::Convert { input, output } => commands::convert::run(&input, &output),
        Commands::Inspect { file, json } => commands::inspect::run(&file, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => exit::report(&e),
    }
}
