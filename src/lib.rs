//! # CycleKit
//!
//! Expands G-Code canned cycles (G73, G76, G81-G89) into plain G0/G1/G4
//! moves for controllers that cannot run them, and cleans arc words for
//! Mach3-style controllers.
//!
//! ## Architecture
//!
//! CycleKit is organized as a workspace with multiple crates:
//!
//! 1. **cyclekit-core** - Conversion modes, constants, diagnostics and errors
//! 2. **cyclekit-engine** - Word scanning, modal state, cycle expansion, framing
//! 3. **cyclekit-settings** - TOML/JSON configuration
//! 4. **cyclekit** - File handling, logging and the command-line binary

pub mod file_io;

pub use cyclekit_core::{ConversionError, ConversionMode, CycleDiagnostic, Error, Result};
pub use cyclekit_engine::{
    convert, converter_for, ConversionReport, ConversionStats, ConverterOptions, CycleKind,
    ProgramConverter,
};
pub use cyclekit_settings::Config;
pub use file_io::{convert_file, read_program, write_program};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Engine defaults taken from a configuration
pub fn converter_options(config: &Config) -> ConverterOptions {
    ConverterOptions {
        default_safe_z: config.framing.default_safe_z,
        default_spindle_speed: config.framing.default_spindle_speed,
        settle_dwell_seconds: config.framing.settle_dwell_seconds,
    }
}

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, leaving stdout for converted programs
/// - RUST_LOG environment variable support
/// - `info` level by default, `debug` when `verbose` is set
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_level(true)
        .with_line_number(verbose);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
