use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use cyclekit::{
    converter_for, converter_options, init_logging, read_program, write_program, Config,
    ConversionMode,
};

#[derive(Parser, Debug)]
#[command(
    name = "cyclekit",
    version,
    about = "Expand G-code canned cycles into plain G0/G1 moves"
)]
struct Cli {
    /// G-code program to convert
    input: PathBuf,

    /// Output file (defaults to <stem><suffix>.<ext> next to the input)
    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Conversion mode: linear or mach3 (defaults to the configured mode)
    #[arg(short, long)]
    mode: Option<ConversionMode>,

    /// Path to a TOML or JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the converted program to stdout
    #[arg(long)]
    stdout: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    tracing::debug!("cyclekit {} (built {})", cyclekit::VERSION, cyclekit::BUILD_DATE);

    let config = Config::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let mode = cli.mode.unwrap_or(config.output.mode);

    let program = read_program(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;

    let converter = converter_for(mode, converter_options(&config));
    tracing::debug!("Using {} converter: {}", converter.name(), converter.description());

    let report = converter
        .convert(&program)
        .with_context(|| format!("Cannot convert {}", cli.input.display()))?;

    for diagnostic in &report.diagnostics {
        tracing::warn!("{}", diagnostic);
    }

    if cli.stdout {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(report.output.as_bytes())
            .context("Failed to write to stdout")?;
        stdout.flush()?;
    } else {
        let output = cli
            .output
            .unwrap_or_else(|| config.output.derived_path(&cli.input));
        write_program(&output, &report.output)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        tracing::info!("Saved {} ({} mode)", output.display(), mode);
    }

    tracing::info!(
        "Conversion complete: {} lines in, {} lines out, {} cycles expanded, {} skipped",
        report.stats.lines_in,
        report.stats.lines_out,
        report.stats.cycles_expanded,
        report.stats.cycles_skipped
    );

    Ok(())
}
