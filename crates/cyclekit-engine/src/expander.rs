//! Canned cycle expansion
//!
//! Turns one classified cycle line into primitive moves: `G0` rapids, `G1`
//! feeds and `G4` dwells. Spindle actions a controller cannot safely
//! sequence on its own (direction reversal for tapping, oriented stops for
//! boring) are written as inert comments for the operator to review.
//!
//! Coordinates and feeds are written with six decimals, dwell times with
//! three. Positions are emitted in whatever unit and distance mode the
//! program is already in.

use cyclekit_core::constants::{
    COORDINATE_PRECISION, DWELL_PRECISION, HIGH_SPEED_PECK_CLEARANCE, MAX_PECKS_PER_CYCLE,
};
use cyclekit_core::CycleDiagnostic;

use crate::gcode::{CycleKind, ModalState, ParameterSet};

/// Resolved numeric parameters of one cycle line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleParameters {
    /// Hole position X
    pub x: f64,
    /// Hole position Y
    pub y: f64,
    /// Final depth
    pub z: f64,
    /// Reference (R) plane
    pub r: f64,
    /// Feed rate
    pub f: f64,
    /// Peck increment (G73/G83) or lateral shift (G76/G87)
    pub q: f64,
    /// Dwell in seconds
    pub p: f64,
}

impl CycleParameters {
    /// Resolve the parameters of a cycle line, applying documented defaults
    ///
    /// Returns every problem found rather than stopping at the first one.
    pub fn resolve(
        kind: CycleKind,
        params: &ParameterSet,
        line_number: usize,
    ) -> Result<Self, Vec<CycleDiagnostic>> {
        let mut diagnostics: Vec<CycleDiagnostic> = kind
            .required_parameters()
            .iter()
            .filter(|letter| !params.contains(**letter))
            .map(|letter| CycleDiagnostic::MissingParameter {
                cycle: kind.code().to_string(),
                parameter: *letter,
                line_number,
            })
            .collect();

        let invalid = |parameter: char, reason: String| CycleDiagnostic::InvalidParameter {
            cycle: kind.code().to_string(),
            parameter,
            line_number,
            reason,
        };

        // Digit runs too long for f64 scan as infinity
        for letter in ['X', 'Y', 'Z', 'R', 'F', 'Q', 'P'] {
            if params.get(letter).is_some_and(|v| !v.is_finite()) {
                diagnostics.push(invalid(letter, "value is out of range".to_string()));
            }
        }

        let q = params.get('Q').or(kind.default_q()).unwrap_or(0.0);
        if kind.is_peck_cycle() && params.contains('Q') && q <= 0.0 {
            diagnostics.push(invalid(
                'Q',
                "peck increment must be greater than zero".to_string(),
            ));
        }

        if !diagnostics.is_empty() {
            return Err(diagnostics);
        }

        let value = |letter: char| params.get(letter).unwrap_or_default();
        let resolved = Self {
            x: value('X'),
            y: value('Y'),
            z: value('Z'),
            r: value('R'),
            f: value('F'),
            q,
            p: value('P'),
        };

        if kind.is_peck_cycle() && resolved.r > resolved.z {
            let pecks = ((resolved.r - resolved.z) / resolved.q).ceil();
            if pecks > MAX_PECKS_PER_CYCLE as f64 {
                return Err(vec![invalid(
                    'Q',
                    format!(
                        "{:.0} pecks needed, at most {} are allowed",
                        pecks, MAX_PECKS_PER_CYCLE
                    ),
                )]);
            }
        }

        Ok(resolved)
    }
}

/// Depths reached by successive pecks from `r` down to `z`
///
/// The last depth is always exactly `z`. When `q` is below the float
/// resolution at the current depth the next peck goes straight to `z`.
fn peck_depths(r: f64, z: f64, q: f64) -> Vec<f64> {
    let mut depths = Vec::new();
    let mut depth = r;
    while depth > z {
        let next = (depth - q).max(z);
        let next = if next < depth { next } else { z };
        depths.push(next);
        depth = next;
    }
    depths
}

/// Output of expanding one line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expansion {
    /// Output lines in emission order
    pub lines: Vec<String>,
    /// Problems that prevented the cycle from being expanded
    pub diagnostics: Vec<CycleDiagnostic>,
}

impl Expansion {
    /// An expansion that copies the input line unchanged
    pub fn passthrough(line: &str) -> Self {
        Self {
            lines: vec![line.to_string()],
            diagnostics: Vec::new(),
        }
    }

    /// Check if the cycle was skipped because of diagnostics
    pub fn is_skipped(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Collects formatted output lines for one cycle
#[derive(Debug, Default)]
struct MoveWriter {
    lines: Vec<String>,
}

impl MoveWriter {
    fn comment(&mut self, text: &str) {
        self.lines.push(format!("; {}", text));
    }

    /// A spindle command the operator must run by hand, kept as a comment
    fn inert(&mut self, code: &str, note: &str) {
        self.lines.push(format!("; {} ; {}", code, note));
    }

    fn rapid_xy(&mut self, x: f64, y: f64) {
        self.lines.push(format!(
            "G0 X{:.*} Y{:.*}",
            COORDINATE_PRECISION, x, COORDINATE_PRECISION, y
        ));
    }

    fn rapid_z(&mut self, z: f64) {
        self.lines
            .push(format!("G0 Z{:.*}", COORDINATE_PRECISION, z));
    }

    fn feed_z(&mut self, z: f64, f: f64) {
        self.lines.push(format!(
            "G1 Z{:.*} F{:.*}",
            COORDINATE_PRECISION, z, COORDINATE_PRECISION, f
        ));
    }

    fn dwell(&mut self, seconds: f64) {
        self.lines
            .push(format!("G4 P{:.*}", DWELL_PRECISION, seconds));
    }

    fn dwell_with_note(&mut self, seconds: f64) {
        self.lines.push(format!(
            "G4 P{:.*} ; Dwell {}s",
            DWELL_PRECISION, seconds, seconds
        ));
    }

    fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// Expands canned cycles into primitive moves
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleExpander;

impl CycleExpander {
    /// Create a new cycle expander
    pub fn new() -> Self {
        Self
    }

    /// Expand one line of a program
    ///
    /// `line_number` is 1-based and only used for diagnostics. `state` must be
    /// the modal state after observing this line, so retract-mode words on
    /// the cycle line itself already apply.
    pub fn expand(
        &self,
        kind: CycleKind,
        line: &str,
        line_number: usize,
        state: &ModalState,
    ) -> Expansion {
        match kind {
            CycleKind::Other => Expansion::passthrough(line),
            CycleKind::G80 => Expansion {
                lines: vec!["; G80 ignored (canned cycle cancelled)".to_string()],
                diagnostics: Vec::new(),
            },
            _ => self.expand_motion_cycle(kind, line, line_number, state),
        }
    }

    fn expand_motion_cycle(
        &self,
        kind: CycleKind,
        line: &str,
        line_number: usize,
        state: &ModalState,
    ) -> Expansion {
        let params = ParameterSet::from_line(line);
        let p = match CycleParameters::resolve(kind, &params, line_number) {
            Ok(p) => p,
            Err(diagnostics) => return Self::skipped(line, diagnostics),
        };

        let retract_z = state.retract_height(p.r);
        let mut w = MoveWriter::default();
        w.comment(&format!("--- {} expansion for X{} Y{} ---", kind, p.x, p.y));
        w.rapid_xy(p.x, p.y);

        match kind {
            CycleKind::G73 => {
                let mut previous = p.r;
                for depth in peck_depths(p.r, p.z, p.q) {
                    w.rapid_z(previous + HIGH_SPEED_PECK_CLEARANCE);
                    w.feed_z(depth, p.f);
                    previous = depth;
                }
                w.rapid_z(retract_z);
            }
            CycleKind::G76 => {
                w.rapid_z(p.r);
                w.feed_z(p.z, p.f);
                w.inert("M5", "Oriented spindle stop");
                w.rapid_xy(p.x + p.q, p.y);
                w.rapid_z(retract_z);
                w.rapid_xy(p.x, p.y);
                w.inert("M3", "Restart spindle");
            }
            CycleKind::G81 => {
                w.rapid_z(p.r);
                w.feed_z(p.z, p.f);
                w.rapid_z(retract_z);
            }
            CycleKind::G82 => {
                w.rapid_z(p.r);
                w.feed_z(p.z, p.f);
                if p.p > 0.0 {
                    w.dwell_with_note(p.p);
                }
                w.rapid_z(retract_z);
            }
            CycleKind::G83 => {
                for depth in peck_depths(p.r, p.z, p.q) {
                    w.rapid_z(p.r);
                    w.feed_z(depth, p.f);
                }
                w.rapid_z(retract_z);
            }
            CycleKind::G84 => {
                w.rapid_z(p.r);
                w.inert("M3", "Spindle clockwise");
                w.feed_z(p.z, p.f);
                w.inert("M4", "Spindle counter-clockwise to back the tap out");
                w.feed_z(p.r, p.f);
                w.inert("M3", "Spindle clockwise again");
                w.rapid_z(retract_z);
            }
            CycleKind::G85 => {
                w.rapid_z(p.r);
                w.feed_z(p.z, p.f);
                w.feed_z(p.r, p.f);
                w.rapid_z(retract_z);
            }
            CycleKind::G86 => {
                w.rapid_z(p.r);
                w.feed_z(p.z, p.f);
                w.inert("M5", "Stop spindle");
                w.rapid_z(retract_z);
                w.inert("M3", "Restart spindle");
            }
            CycleKind::G87 => {
                w.rapid_z(p.r);
                w.inert("M4", "Spindle counter-clockwise");
                w.feed_z(p.z, p.f);
                w.inert("M5", "Stop spindle");
                w.rapid_xy(p.x + p.q, p.y);
                w.rapid_z(p.r);
                w.rapid_xy(p.x, p.y);
                w.inert("M3", "Spindle clockwise");
                w.rapid_z(retract_z);
            }
            CycleKind::G88 => {
                w.rapid_z(p.r);
                w.feed_z(p.z, p.f);
                if p.p > 0.0 {
                    w.dwell(p.p);
                }
                w.inert("M0", "Program stop, retract the tool manually");
                w.rapid_z(retract_z);
            }
            CycleKind::G89 => {
                w.rapid_z(p.r);
                w.feed_z(p.z, p.f);
                if p.p > 0.0 {
                    w.dwell(p.p);
                }
                w.feed_z(p.r, p.f);
                w.rapid_z(retract_z);
            }
            CycleKind::G80 | CycleKind::Other => return Expansion::passthrough(line),
        }

        w.comment(&format!("--- end of {} expansion ---", kind));

        let lines = w.into_lines();
        tracing::debug!(
            "Expanded {} at line {} into {} lines (retract to {})",
            kind,
            line_number,
            lines.len(),
            retract_z
        );

        Expansion {
            lines,
            diagnostics: Vec::new(),
        }
    }

    /// Carry a cycle that cannot be expanded into the output as comments
    fn skipped(line: &str, diagnostics: Vec<CycleDiagnostic>) -> Expansion {
        let mut w = MoveWriter::default();
        for diagnostic in &diagnostics {
            tracing::debug!("Cycle not expanded: {}", diagnostic);
            w.comment(&format!("not expanded: {}", diagnostic));
        }
        w.comment(line.trim());

        Expansion {
            lines: w.into_lines(),
            diagnostics,
        }
    }
}
