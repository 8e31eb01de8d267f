//! Canned cycle classification
//!
//! Every input line is classified by its leading command word into one of a
//! closed set of cycle kinds. Sequence numbers (`N`) and retract-mode words
//! (`G98`/`G99`) in front of the command are skipped, so `N40 G99 G81 ...`
//! classifies as `G81`.

use serde::{Deserialize, Serialize};

use super::{leading_words, ParameterSet, Word};

/// Canned cycle kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CycleKind {
    /// High-speed peck drilling (short retract between pecks)
    G73,
    /// Fine boring with oriented spindle stop and shift
    G76,
    /// Simple drilling
    G81,
    /// Drilling with dwell at the bottom
    G82,
    /// Peck drilling with full retract to R between pecks
    G83,
    /// Tapping
    G84,
    /// Boring, feed out
    G85,
    /// Boring with spindle stop, rapid out
    G86,
    /// Back boring
    G87,
    /// Boring with manual stop
    G88,
    /// Boring with dwell, feed out
    G89,
    /// Canned cycle cancel
    G80,
    /// Any line that is not a canned cycle
    Other,
}

impl CycleKind {
    /// All kinds in dispatch priority order
    pub const ALL: [CycleKind; 13] = [
        Self::G73,
        Self::G76,
        Self::G81,
        Self::G82,
        Self::G83,
        Self::G84,
        Self::G85,
        Self::G86,
        Self::G87,
        Self::G88,
        Self::G89,
        Self::G80,
        Self::Other,
    ];

    /// Map a G number to its cycle kind
    pub fn from_g_number(number: f64) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.g_number() == Some(number))
            .unwrap_or(Self::Other)
    }

    /// Classify a line by its leading command word
    pub fn classify(line: &str) -> Self {
        match command_word(line) {
            Some(word) if word.letter == 'G' => Self::from_g_number(word.value),
            _ => Self::Other,
        }
    }

    /// The G number of this kind, `None` for [`CycleKind::Other`]
    pub fn g_number(&self) -> Option<f64> {
        let number = match self {
            Self::G73 => 73.0,
            Self::G76 => 76.0,
            Self::G81 => 81.0,
            Self::G82 => 82.0,
            Self::G83 => 83.0,
            Self::G84 => 84.0,
            Self::G85 => 85.0,
            Self::G86 => 86.0,
            Self::G87 => 87.0,
            Self::G88 => 88.0,
            Self::G89 => 89.0,
            Self::G80 => 80.0,
            Self::Other => return None,
        };
        Some(number)
    }

    /// Code as written in a program, e.g. "G81"
    pub fn code(&self) -> &'static str {
        match self {
            Self::G73 => "G73",
            Self::G76 => "G76",
            Self::G81 => "G81",
            Self::G82 => "G82",
            Self::G83 => "G83",
            Self::G84 => "G84",
            Self::G85 => "G85",
            Self::G86 => "G86",
            Self::G87 => "G87",
            Self::G88 => "G88",
            Self::G89 => "G89",
            Self::G80 => "G80",
            Self::Other => "other",
        }
    }

    /// Check whether this kind produces motion when expanded
    pub fn is_motion_cycle(&self) -> bool {
        !matches!(self, Self::G80 | Self::Other)
    }

    /// Check whether this kind drills in repeated pecks
    pub fn is_peck_cycle(&self) -> bool {
        matches!(self, Self::G73 | Self::G83)
    }

    /// Parameters the cycle cannot be expanded without
    pub fn required_parameters(&self) -> &'static [char] {
        match self {
            Self::G83 => &['X', 'Y', 'Z', 'R', 'F', 'Q'],
            Self::G80 | Self::Other => &[],
            _ => &['X', 'Y', 'Z', 'R', 'F'],
        }
    }

    /// Q value applied when the line omits Q
    ///
    /// For G73 this is the peck increment, for G76/G87 the lateral shift.
    /// G83 has no default and requires Q.
    pub fn default_q(&self) -> Option<f64> {
        use cyclekit_core::constants::{DEFAULT_BORING_SHIFT, DEFAULT_HIGH_SPEED_PECK};

        match self {
            Self::G73 => Some(DEFAULT_HIGH_SPEED_PECK),
            Self::G76 | Self::G87 => Some(DEFAULT_BORING_SHIFT),
            _ => None,
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::G73 => "High-speed peck drilling",
            Self::G76 => "Fine boring",
            Self::G81 => "Drilling",
            Self::G82 => "Drilling with dwell",
            Self::G83 => "Peck drilling",
            Self::G84 => "Tapping",
            Self::G85 => "Boring, feed out",
            Self::G86 => "Boring with spindle stop",
            Self::G87 => "Back boring",
            Self::G88 => "Boring with manual stop",
            Self::G89 => "Boring with dwell, feed out",
            Self::G80 => "Cancel canned cycle",
            Self::Other => "Not a canned cycle",
        }
    }
}

impl std::fmt::Display for CycleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Check whether a word is a retract-mode word (G98/G99)
fn is_retract_mode_word(word: &Word) -> bool {
    word.is('G', 98.0) || word.is('G', 99.0)
}

/// The command word of a line
///
/// The first leading word that is neither a sequence number nor a
/// retract-mode word. `None` for comments, blank lines and lines that
/// consist only of skipped words.
pub fn command_word(line: &str) -> Option<Word> {
    leading_words(line)
        .into_iter()
        .find(|word| word.letter != 'N' && !is_retract_mode_word(word))
}

/// Z target of a Z-only rapid move (`G0 Z..` with no X or Y)
pub fn z_only_rapid(line: &str) -> Option<f64> {
    let command = command_word(line)?;
    if !command.is('G', 0.0) {
        return None;
    }

    let params = ParameterSet::from_line(line);
    if params.contains('X') || params.contains('Y') {
        return None;
    }
    params.get('Z')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_cycles() {
        assert_eq!(CycleKind::classify("G81 X10 Y20 Z-5 R2 F100"), CycleKind::G81);
        assert_eq!(CycleKind::classify("g83 x0 y0 z-10 r1 q2 f50"), CycleKind::G83);
        assert_eq!(CycleKind::classify("G73X0Y0Z-10R0Q2F50"), CycleKind::G73);
        assert_eq!(CycleKind::classify("G80"), CycleKind::G80);
        assert_eq!(CycleKind::classify("  G89 X1 Y1 Z-1 R1 F10  "), CycleKind::G89);
    }

    #[test]
    fn test_classify_skips_sequence_and_retract_words() {
        assert_eq!(CycleKind::classify("N100 G81 X1 Y1 Z-1 R1 F10"), CycleKind::G81);
        assert_eq!(CycleKind::classify("G99 G82 X1 Y1 Z-1 R1 P1 F10"), CycleKind::G82);
        assert_eq!(CycleKind::classify("G98"), CycleKind::Other);
    }

    #[test]
    fn test_classify_other_lines() {
        assert_eq!(CycleKind::classify("G0 X10 Y10"), CycleKind::Other);
        assert_eq!(CycleKind::classify("(G81 X1 Y1)"), CycleKind::Other);
        assert_eq!(CycleKind::classify("; G83 in a comment"), CycleKind::Other);
        assert_eq!(CycleKind::classify("G81.1 X1"), CycleKind::Other);
        assert_eq!(CycleKind::classify("M3 S1000"), CycleKind::Other);
        assert_eq!(CycleKind::classify(""), CycleKind::Other);
    }

    #[test]
    fn test_leading_zero_codes() {
        assert_eq!(CycleKind::classify("G081 X1 Y1 Z-1 R1 F10"), CycleKind::G81);
        assert_eq!(z_only_rapid("G00 Z5"), Some(5.0));
    }

    #[test]
    fn test_required_parameters() {
        assert_eq!(CycleKind::G81.required_parameters(), &['X', 'Y', 'Z', 'R', 'F']);
        assert!(CycleKind::G83.required_parameters().contains(&'Q'));
        assert!(!CycleKind::G73.required_parameters().contains(&'Q'));
        assert!(CycleKind::Other.required_parameters().is_empty());
    }

    #[test]
    fn test_default_q() {
        assert_eq!(CycleKind::G73.default_q(), Some(1.0));
        assert_eq!(CycleKind::G76.default_q(), Some(0.5));
        assert_eq!(CycleKind::G87.default_q(), Some(0.5));
        assert_eq!(CycleKind::G83.default_q(), None);
    }

    #[test]
    fn test_kind_round_trip_through_g_number() {
        for kind in CycleKind::ALL {
            match kind.g_number() {
                Some(number) => assert_eq!(CycleKind::from_g_number(number), kind),
                None => assert_eq!(kind, CycleKind::Other),
            }
        }
    }

    #[test]
    fn test_z_only_rapid() {
        assert_eq!(z_only_rapid("G0 Z25"), Some(25.0));
        assert_eq!(z_only_rapid("N5 G0 Z-1.5 ; clearance"), Some(-1.5));
        assert_eq!(z_only_rapid("G0 X1 Z25"), None);
        assert_eq!(z_only_rapid("G0 Y1 Z25"), None);
        assert_eq!(z_only_rapid("G01 Z25 F100"), None);
        assert_eq!(z_only_rapid("G0 X10"), None);
        assert_eq!(z_only_rapid("(G0 Z5)"), None);
    }
}
