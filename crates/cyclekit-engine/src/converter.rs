//! Whole-program converters
//!
//! A converter takes the complete text of a program and returns the framed,
//! rewritten program together with the diagnostics raised along the way.
//! Both modes share the discovery pass and the framing blocks; they differ
//! only in how body lines are rewritten.

use serde::{Deserialize, Serialize};

use cyclekit_core::constants::{DEFAULT_SAFE_Z, DEFAULT_SPINDLE_SPEED, SETTLE_DWELL_SECONDS};
use cyclekit_core::{ConversionError, ConversionMode, CycleDiagnostic};

use crate::expander::CycleExpander;
use crate::framer::ProgramFramer;
use crate::gcode::{CycleKind, Discovery, ModalState};
use crate::mach3;

/// Tunable defaults applied when a program does not specify its own
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConverterOptions {
    /// Safe height when the program has no Z-only rapid
    pub default_safe_z: f64,
    /// Spindle speed when the program has no S word (RPM)
    pub default_spindle_speed: u32,
    /// Dwell after spindle start (seconds)
    pub settle_dwell_seconds: f64,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            default_safe_z: DEFAULT_SAFE_Z,
            default_spindle_speed: DEFAULT_SPINDLE_SPEED,
            settle_dwell_seconds: SETTLE_DWELL_SECONDS,
        }
    }
}

impl ConverterOptions {
    fn discovery_defaults(&self) -> Discovery {
        Discovery {
            spindle_speed: self.default_spindle_speed,
            initial_safe_z: self.default_safe_z,
        }
    }
}

/// Line and cycle counts for one conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Lines in the input program
    pub lines_in: usize,
    /// Lines in the output program, framing included
    pub lines_out: usize,
    /// Cycles replaced by primitive moves
    pub cycles_expanded: usize,
    /// Cycles left as comments because of diagnostics
    pub cycles_skipped: usize,
}

/// Result of converting one program
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    /// Converted program, newline-terminated
    pub output: String,
    /// Per-cycle problems, in line order
    pub diagnostics: Vec<CycleDiagnostic>,
    /// Summary counts
    pub stats: ConversionStats,
}

impl ConversionReport {
    /// Check if every cycle in the program was expanded
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// A whole-program conversion mode
pub trait ProgramConverter: Send + Sync {
    /// Get the name/identifier of this converter
    fn name(&self) -> &str;

    /// Get a description of what this converter does
    fn description(&self) -> &str;

    /// Convert a complete program
    fn convert(&self, program: &str) -> Result<ConversionReport, ConversionError>;
}

/// Split a program into lines, refusing empty input
fn program_lines(program: &str) -> Result<Vec<&str>, ConversionError> {
    if program.trim().is_empty() {
        return Err(ConversionError::EmptyProgram);
    }
    Ok(program.lines().collect())
}

/// Expands canned cycles into linear moves
#[derive(Debug, Clone, Default)]
pub struct CycleLinearizer {
    options: ConverterOptions,
    expander: CycleExpander,
}

impl CycleLinearizer {
    /// Create a linearizer with the given defaults
    pub fn new(options: ConverterOptions) -> Self {
        Self {
            options,
            expander: CycleExpander::new(),
        }
    }

    /// Defaults in use
    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }
}

impl ProgramConverter for CycleLinearizer {
    fn name(&self) -> &str {
        "cycle-linearizer"
    }

    fn description(&self) -> &str {
        "Expands canned drilling, tapping and boring cycles into G0/G1/G4 moves"
    }

    fn convert(&self, program: &str) -> Result<ConversionReport, ConversionError> {
        let lines = program_lines(program)?;
        let found = Discovery::scan(lines.iter().copied(), self.options.discovery_defaults());

        // The sequential pass starts from the configured safe height, not the
        // discovered one: a cycle only sees Z-only rapids that precede it.
        let mut state = ModalState::new(self.options.default_safe_z, found.spindle_speed);
        let mut body = Vec::with_capacity(lines.len());
        let mut diagnostics = Vec::new();
        let mut stats = ConversionStats {
            lines_in: lines.len(),
            ..Default::default()
        };

        for (index, line) in lines.iter().enumerate() {
            state.observe(line);
            let kind = CycleKind::classify(line);
            let expansion = self.expander.expand(kind, line, index + 1, &state);

            if kind.is_motion_cycle() {
                if expansion.is_skipped() {
                    stats.cycles_skipped += 1;
                } else {
                    stats.cycles_expanded += 1;
                }
            }

            body.extend(expansion.lines);
            diagnostics.extend(expansion.diagnostics);
        }

        let framer = ProgramFramer::new("Startup Routine", self.options.settle_dwell_seconds);
        let output = framer.frame(state.spindle_speed, found.initial_safe_z, &body);
        stats.lines_out = output.lines().count();

        tracing::info!(
            "Converted {} lines into {} ({} cycles expanded, {} skipped)",
            stats.lines_in,
            stats.lines_out,
            stats.cycles_expanded,
            stats.cycles_skipped
        );

        Ok(ConversionReport {
            output,
            diagnostics,
            stats,
        })
    }
}

/// Cleans arc words for Mach3 without expanding cycles
#[derive(Debug, Clone, Default)]
pub struct Mach3Converter {
    options: ConverterOptions,
}

impl Mach3Converter {
    /// Create a Mach3 converter with the given defaults
    pub fn new(options: ConverterOptions) -> Self {
        Self { options }
    }
}

impl ProgramConverter for Mach3Converter {
    fn name(&self) -> &str {
        "mach3"
    }

    fn description(&self) -> &str {
        "Removes K words from G2/G3 arcs and drops blank lines for Mach3"
    }

    fn convert(&self, program: &str) -> Result<ConversionReport, ConversionError> {
        let lines = program_lines(program)?;
        let found = Discovery::scan(lines.iter().copied(), self.options.discovery_defaults());

        let body: Vec<String> = lines
            .iter()
            .filter_map(|line| mach3::rewrite_line(line))
            .collect();

        let framer = ProgramFramer::new("Mach3 Startup Routine", self.options.settle_dwell_seconds);
        let output = framer.frame(found.spindle_speed, found.initial_safe_z, &body);
        let stats = ConversionStats {
            lines_in: lines.len(),
            lines_out: output.lines().count(),
            ..Default::default()
        };

        tracing::info!(
            "Converted {} lines into {} for Mach3",
            stats.lines_in,
            stats.lines_out
        );

        Ok(ConversionReport {
            output,
            diagnostics: Vec::new(),
            stats,
        })
    }
}

/// Build the converter for a mode
pub fn converter_for(mode: ConversionMode, options: ConverterOptions) -> Box<dyn ProgramConverter> {
    match mode {
        ConversionMode::Linear => Box::new(CycleLinearizer::new(options)),
        ConversionMode::Mach3 => Box::new(Mach3Converter::new(options)),
    }
}

/// Expand the canned cycles of a program using default settings
pub fn convert(program: &str) -> Result<ConversionReport, ConversionError> {
    CycleLinearizer::default().convert(program)
}
