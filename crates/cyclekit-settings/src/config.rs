//! Configuration for CycleKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats, with the default file stored in the platform config
//! directory.
//!
//! Configuration is organized into two sections:
//! - Framing defaults (safe height, spindle speed, settle dwell)
//! - Output preferences (conversion mode, derived file names)

use cyclekit_core::constants::{DEFAULT_SAFE_Z, DEFAULT_SPINDLE_SPEED, SETTLE_DWELL_SECONDS};
use cyclekit_core::{ConversionMode, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Defaults applied when a program does not specify its own values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramingSettings {
    /// Safe Z height when the program has no Z-only rapid (mm)
    pub default_safe_z: f64,
    /// Spindle speed when the program has no S word (RPM)
    pub default_spindle_speed: u32,
    /// Dwell after spindle start (seconds)
    pub settle_dwell_seconds: f64,
}

impl Default for FramingSettings {
    fn default() -> Self {
        Self {
            default_safe_z: DEFAULT_SAFE_Z,
            default_spindle_speed: DEFAULT_SPINDLE_SPEED,
            settle_dwell_seconds: SETTLE_DWELL_SECONDS,
        }
    }
}

/// Output preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Mode used when none is given on the command line
    pub mode: ConversionMode,
    /// Extension of derived output files, without the dot
    pub extension: String,
    /// Appended to the input file stem for derived output names
    pub suffix: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            mode: ConversionMode::Linear,
            extension: "nc".to_string(),
            suffix: "_converted".to_string(),
        }
    }
}

impl OutputSettings {
    /// Output path derived from an input path: `<stem><suffix>.<ext>` in the
    /// input's directory
    pub fn derived_path(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "program".to_string());
        let name = format!("{}{}.{}", stem, self.suffix, self.extension);
        input.with_file_name(name)
    }
}

/// Complete CycleKit configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Framing defaults
    pub framing: FramingSettings,
    /// Output preferences
    pub output: OutputSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location, `<config_dir>/cyclekit/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cyclekit").join("config.toml"))
    }

    /// Load the given file, or the default file when no path is given
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .map_err(|e| Error::config(format!("Invalid JSON config: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)
                .map_err(|e| Error::config(format!("Invalid TOML config: {}", e)))?
        } else {
            return Err(Error::config("Config file must be .json or .toml"));
        };

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)
                .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)
                .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))?
        } else {
            return Err(Error::config("Config file must be .json or .toml"));
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.framing.default_safe_z.is_finite() {
            return Err(Error::config("Default safe Z must be a finite number"));
        }

        if self.framing.default_spindle_speed == 0 {
            return Err(Error::config("Default spindle speed must be > 0"));
        }

        if !self.framing.settle_dwell_seconds.is_finite() || self.framing.settle_dwell_seconds < 0.0
        {
            return Err(Error::config("Settle dwell must be >= 0"));
        }

        let ext = &self.output.extension;
        if ext.is_empty() || ext.starts_with('.') || ext.contains(['/', '\\']) {
            return Err(Error::config(
                "Output extension must be a bare extension such as \"nc\"",
            ));
        }

        if self.output.suffix.contains(['/', '\\']) {
            return Err(Error::config("Output suffix must not contain path separators"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.framing.default_safe_z, 15.0);
        assert_eq!(config.framing.default_spindle_speed, 1000);
        assert_eq!(config.framing.settle_dwell_seconds, 2.0);
        assert_eq!(config.output.mode, ConversionMode::Linear);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::default();
        config.framing.default_spindle_speed = 0;
        assert!(config.validate().unwrap_err().is_config_error());

        let mut config = Config::default();
        config.framing.settle_dwell_seconds = -1.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.framing.default_safe_z = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.output.extension = ".nc".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.output.suffix = "../out".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_derived_path() {
        let output = OutputSettings::default();
        assert_eq!(
            output.derived_path(Path::new("/jobs/plate.tap")),
            PathBuf::from("/jobs/plate_converted.nc")
        );
        assert_eq!(
            output.derived_path(Path::new("part")),
            PathBuf::from("part_converted.nc")
        );
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[output]\nmode = \"mach3\"\n").unwrap();
        assert_eq!(config.output.mode, ConversionMode::Mach3);
        assert_eq!(config.output.extension, "nc");
        assert_eq!(config.framing, FramingSettings::default());
    }
}
