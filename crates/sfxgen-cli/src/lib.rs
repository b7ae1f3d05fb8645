//! sfxgen CLI library.
//!
//! Command implementations behind the `sfxgen` binary: rendering parameter
//! files to WAV, generating archetype, random and mutated parameter files,
//! converting legacy settings and inspecting parameter files.

pub mod commands;
pub mod exit;
pub mod logging;
