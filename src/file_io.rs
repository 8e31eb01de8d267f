//! Program file handling

use std::path::Path;

use cyclekit_core::{ConversionMode, Error, Result};
use cyclekit_engine::{converter_for, ConversionReport};
use cyclekit_settings::Config;

use crate::converter_options;

/// Read a program file as UTF-8 text
pub fn read_program(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    String::from_utf8(bytes)
        .map_err(|_| Error::other(format!("{} is not valid UTF-8 text", path.display())))
}

/// Write a converted program, creating parent directories as needed
pub fn write_program(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Convert `input` and write the result to `output`
pub fn convert_file(
    input: &Path,
    output: &Path,
    mode: ConversionMode,
    config: &Config,
) -> Result<ConversionReport> {
    let program = read_program(input)?;
    let converter = converter_for(mode, converter_options(config));
    let report = converter.convert(&program)?;
    write_program(output, &report.output)?;
    Ok(report)
}
