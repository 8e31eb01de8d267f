//! Program preamble and postamble
//!
//! Every converted program is wrapped in a fixed startup block (unit and
//! positioning modes, spindle start, settle dwell) and a safe return block
//! that lifts Z before moving home.

use cyclekit_core::constants::{COORDINATE_PRECISION, DWELL_PRECISION, SEPARATOR};

/// Settle dwell value: one decimal when that is exact, else dwell precision
fn settle_dwell_word(seconds: f64) -> String {
    if (seconds * 10.0).fract() == 0.0 {
        format!("{:.1}", seconds)
    } else {
        format!("{:.*}", DWELL_PRECISION, seconds)
    }
}

/// Writes the framing blocks around a converted program body
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramFramer {
    /// Title of the startup block
    pub title: String,
    /// Seconds to wait after starting the spindle
    pub settle_dwell_seconds: f64,
}

impl Default for ProgramFramer {
    fn default() -> Self {
        Self {
            title: "Startup Routine".to_string(),
            settle_dwell_seconds: cyclekit_core::constants::SETTLE_DWELL_SECONDS,
        }
    }
}

impl ProgramFramer {
    /// Create a framer with a custom startup title
    pub fn new(title: impl Into<String>, settle_dwell_seconds: f64) -> Self {
        Self {
            title: title.into(),
            settle_dwell_seconds,
        }
    }

    /// Startup block, ending with a blank line
    pub fn preamble(&self, spindle_speed: u32) -> Vec<String> {
        vec![
            SEPARATOR.to_string(),
            format!("; {}", self.title),
            SEPARATOR.to_string(),
            "G21 ; Metric units (mm)".to_string(),
            "G90 ; Absolute positioning".to_string(),
            "G94 ; Feed rate in units per minute".to_string(),
            "G17 ; XY plane".to_string(),
            format!("M3 S{} ; Spindle on at {} RPM", spindle_speed, spindle_speed),
            format!(
                "G4 P{} ; Let spindle settle for {} seconds",
                settle_dwell_word(self.settle_dwell_seconds),
                self.settle_dwell_seconds
            ),
            SEPARATOR.to_string(),
            String::new(),
        ]
    }

    /// Safe return block
    ///
    /// Z is raised to `safe_z` before any XY motion and never lowered again.
    pub fn postamble(&self, safe_z: f64) -> Vec<String> {
        vec![
            String::new(),
            SEPARATOR.to_string(),
            "; Safe Return Home Routine".to_string(),
            SEPARATOR.to_string(),
            format!(
                "G0 Z{:.*} ; Raise Z to safe height",
                COORDINATE_PRECISION, safe_z
            ),
            format!(
                "G0 X{:.*} Y{:.*} ; Move to home position",
                COORDINATE_PRECISION, 0.0, COORDINATE_PRECISION, 0.0
            ),
            "; Z stays at safe height to avoid collisions".to_string(),
            "M5 ; Spindle off".to_string(),
            "M30 ; End of program".to_string(),
            SEPARATOR.to_string(),
        ]
    }

    /// Join preamble, body and postamble into one newline-terminated string
    pub fn frame(&self, spindle_speed: u32, safe_z: f64, body: &[String]) -> String {
        let preamble = self.preamble(spindle_speed);
        let postamble = self.postamble(safe_z);

        let mut output = preamble
            .iter()
            .chain(body)
            .chain(postamble.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n");
        output.push('\n');
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble_layout() {
        let preamble = ProgramFramer::default().preamble(1200);
        assert_eq!(preamble.len(), 11);
        assert_eq!(preamble[0], SEPARATOR);
        assert_eq!(preamble[1], "; Startup Routine");
        assert_eq!(preamble[3], "G21 ; Metric units (mm)");
        assert_eq!(preamble[7], "M3 S1200 ; Spindle on at 1200 RPM");
        assert_eq!(preamble[8], "G4 P2.0 ; Let spindle settle for 2 seconds");
        assert_eq!(preamble[10], "");
    }

    #[test]
    fn test_postamble_raises_z_first() {
        let postamble = ProgramFramer::default().postamble(22.5);
        let raise = postamble
            .iter()
            .position(|l| l.starts_with("G0 Z"))
            .unwrap();
        let home = postamble
            .iter()
            .position(|l| l.starts_with("G0 X"))
            .unwrap();
        assert!(raise < home);
        assert_eq!(postamble[raise], "G0 Z22.500000 ; Raise Z to safe height");
        assert_eq!(
            postamble[home],
            "G0 X0.000000 Y0.000000 ; Move to home position"
        );
        assert_eq!(postamble.last().map(String::as_str), Some(SEPARATOR));
    }

    #[test]
    fn test_frame_ends_with_newline() {
        let framer = ProgramFramer::new("Mach3 Startup Routine", 1.5);
        let out = framer.frame(800, 10.0, &["G0 X1 Y1".to_string()]);
        assert!(out.starts_with(&format!("{}\n; Mach3 Startup Routine\n", SEPARATOR)));
        assert!(out.contains("\n\nG0 X1 Y1\n\n"));
        assert!(out.contains("G4 P1.5 ; Let spindle settle for 1.5 seconds"));
        assert!(out.ends_with(&format!("{}\n", SEPARATOR)));
    }

    #[test]
    fn test_fractional_settle_dwell_keeps_precision() {
        let preamble = ProgramFramer::new("Startup Routine", 2.25).preamble(1000);
        assert_eq!(preamble[8], "G4 P2.250 ; Let spindle settle for 2.25 seconds");

        let preamble = ProgramFramer::new("Startup Routine", 0.0).preamble(1000);
        assert_eq!(preamble[8], "G4 P0.0 ; Let spindle settle for 0 seconds");
    }
}
