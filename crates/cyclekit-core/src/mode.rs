//! Conversion mode selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which transformation to apply to a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionMode {
    /// Expand G73-G89 canned cycles into G0/G1/G4 moves
    Linear,
    /// Strip K words from arc moves for Mach3-style controllers
    Mach3,
}

impl Default for ConversionMode {
    fn default() -> Self {
        Self::Linear
    }
}

impl fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Mach3 => write!(f, "mach3"),
        }
    }
}

impl FromStr for ConversionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" | "linearize" | "cycles" => Ok(Self::Linear),
            "mach3" => Ok(Self::Mach3),
            _ => Err(format!("Unknown conversion mode: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_round_trip_through_display() {
        for mode in [ConversionMode::Linear, ConversionMode::Mach3] {
            assert_eq!(mode.to_string().parse::<ConversionMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_mode_parsing_is_case_insensitive() {
        assert_eq!("MACH3".parse::<ConversionMode>(), Ok(ConversionMode::Mach3));
        assert_eq!(" Linear ".parse::<ConversionMode>(), Ok(ConversionMode::Linear));
        assert!("grbl".parse::<ConversionMode>().is_err());
    }

    #[test]
    fn test_default_mode_is_linear() {
        assert_eq!(ConversionMode::default(), ConversionMode::Linear);
    }
}
