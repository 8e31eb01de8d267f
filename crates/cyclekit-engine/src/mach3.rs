//! Arc cleanup for Mach3-style controllers
//!
//! Mach3 rejects `K` words on XY-plane arcs. This pass removes them from
//! `G2`/`G3` lines and drops blank lines, leaving everything else untouched.

use regex::Regex;
use std::sync::OnceLock;

use crate::gcode::scan_words;

fn k_word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\s+K[+-]?(\d+\.?\d*|\.\d+)").expect("invalid regex pattern"))
}

/// Check whether a line is a whole-line comment
pub fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with(';') || trimmed.starts_with('(')
}

/// Check whether a line carries a circular interpolation word (G2/G3)
pub fn is_arc_line(line: &str) -> bool {
    scan_words(line)
        .iter()
        .any(|w| w.is('G', 2.0) || w.is('G', 3.0))
}

/// Remove every `K` word (with its leading whitespace) from a line
pub fn strip_k_words(line: &str) -> String {
    k_word_regex().replace_all(line, "").into_owned()
}

/// Rewrite one program line for Mach3
///
/// Returns `None` for lines that should be dropped.
pub fn rewrite_line(line: &str) -> Option<String> {
    if line.trim().is_empty() {
        return None;
    }
    if is_comment_line(line) {
        return Some(line.to_string());
    }
    if is_arc_line(line) {
        let stripped = strip_k_words(line.trim());
        if stripped.len() != line.trim().len() {
            tracing::trace!("Removed K words from arc: {}", line.trim());
        }
        return Some(stripped);
    }
    Some(line.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_k_words() {
        assert_eq!(strip_k_words("G2 X10 Y0 I5 J0 K0"), "G2 X10 Y0 I5 J0");
        assert_eq!(strip_k_words("G3 X1 K-2.5 Y2 k.5"), "G3 X1 Y2");
        assert_eq!(strip_k_words("G2 X1 Y1 I1"), "G2 X1 Y1 I1");
    }

    #[test]
    fn test_arc_detection() {
        assert!(is_arc_line("G2 X1 Y1 I1 J0"));
        assert!(is_arc_line("g03 x1 y1 i1 j0"));
        assert!(is_arc_line("N10 G3 X1 Y1 R5"));
        assert!(!is_arc_line("G20"));
        assert!(!is_arc_line("G1 X2 Y2"));
    }

    #[test]
    fn test_rewrite_line() {
        assert_eq!(rewrite_line(""), None);
        assert_eq!(rewrite_line("   "), None);
        assert_eq!(
            rewrite_line("  G2 X10 Y0 I5 J0 K0  ").as_deref(),
            Some("G2 X10 Y0 I5 J0")
        );
        assert_eq!(
            rewrite_line("(G2 X1 K3)").as_deref(),
            Some("(G2 X1 K3)")
        );
        assert_eq!(
            rewrite_line("G1 X1 K3").as_deref(),
            Some("G1 X1 K3")
        );
        assert_eq!(
            rewrite_line("G81 X1 Y1 Z-1 R1 F10").as_deref(),
            Some("G81 X1 Y1 Z-1 R1 F10")
        );
    }
}
