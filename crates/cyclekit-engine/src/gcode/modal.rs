//! Modal state tracking across a program
//!
//! Two passes read the program. The discovery pass looks ahead for the
//! spindle speed and the initial safe height used to frame the output. The
//! sequential pass threads a [`ModalState`] through the lines in order so
//! each cycle sees exactly the retract convention and safe height in force
//! at its own position.

use serde::{Deserialize, Serialize};

use cyclekit_core::constants::{DEFAULT_SAFE_Z, DEFAULT_SPINDLE_SPEED};

use super::{scan_words, z_only_rapid, ParameterSet};

/// Where the tool goes after a canned cycle finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetractConvention {
    /// Return to the program's safe height (G98)
    InitialPlane,
    /// Return to the cycle's R plane (G99)
    RPlane,
}

impl Default for RetractConvention {
    fn default() -> Self {
        Self::InitialPlane
    }
}

impl std::fmt::Display for RetractConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InitialPlane => write!(f, "G98 (initial plane)"),
            Self::RPlane => write!(f, "G99 (R plane)"),
        }
    }
}

/// Modal state carried through the sequential pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModalState {
    /// Active retract convention
    pub retract_convention: RetractConvention,
    /// Most recent Z-only rapid height
    pub initial_safe_z: f64,
    /// Spindle speed fixed by the discovery pass (RPM)
    pub spindle_speed: u32,
}

impl Default for ModalState {
    fn default() -> Self {
        Self {
            retract_convention: RetractConvention::InitialPlane,
            initial_safe_z: DEFAULT_SAFE_Z,
            spindle_speed: DEFAULT_SPINDLE_SPEED,
        }
    }
}

impl ModalState {
    /// Create a state with explicit starting values
    pub fn new(initial_safe_z: f64, spindle_speed: u32) -> Self {
        Self {
            retract_convention: RetractConvention::InitialPlane,
            initial_safe_z,
            spindle_speed,
        }
    }

    /// Update the state from one program line
    ///
    /// `G98`/`G99` words switch the retract convention (the last one on the
    /// line wins) and a Z-only rapid records a new safe height. Changes apply
    /// to cycles on this line and after it, never to earlier ones.
    pub fn observe(&mut self, line: &str) {
        // Words apply in line order, so `G98 G99` ends in R-plane mode
        for word in scan_words(line) {
            if word.is('G', 98.0) {
                self.retract_convention = RetractConvention::InitialPlane;
            } else if word.is('G', 99.0) {
                self.retract_convention = RetractConvention::RPlane;
            }
        }

        if let Some(z) = z_only_rapid(line) {
            self.initial_safe_z = z;
        }
    }

    /// Height a cycle with the given R plane retracts to at the end
    pub fn retract_height(&self, r_plane: f64) -> f64 {
        match self.retract_convention {
            RetractConvention::InitialPlane => self.initial_safe_z,
            RetractConvention::RPlane => r_plane,
        }
    }
}

/// Values found by the discovery pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Discovery {
    /// First S value in the program, truncated to whole RPM
    pub spindle_speed: u32,
    /// First Z-only rapid height in the program
    pub initial_safe_z: f64,
}

impl Default for Discovery {
    fn default() -> Self {
        Self {
            spindle_speed: DEFAULT_SPINDLE_SPEED,
            initial_safe_z: DEFAULT_SAFE_Z,
        }
    }
}

impl Discovery {
    /// Scan a program for its spindle speed and initial safe height
    ///
    /// Values the program never specifies keep the given defaults. Each
    /// search stops at its first match.
    pub fn scan<'a, I>(lines: I, defaults: Discovery) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut found = defaults;
        let mut spindle_found = false;
        let mut height_found = false;

        for line in lines {
            if !spindle_found {
                if let Some(speed) = ParameterSet::from_line(line).get('S') {
                    // Truncates toward zero; negative speeds clamp to 0
                    found.spindle_speed = speed as u32;
                    spindle_found = true;
                }
            }

            if !height_found {
                if let Some(z) = z_only_rapid(line) {
                    found.initial_safe_z = z;
                    height_found = true;
                }
            }

            if spindle_found && height_found {
                break;
            }
        }

        tracing::debug!(
            "Discovered spindle speed {} RPM and safe height {}",
            found.spindle_speed,
            found.initial_safe_z
        );

        found
    }
}
