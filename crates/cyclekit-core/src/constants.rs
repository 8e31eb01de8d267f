//! Fixed machining defaults and output formatting constants

/// Safe Z height used when the program never commands a Z-only rapid (mm)
pub const DEFAULT_SAFE_Z: f64 = 15.0;

/// Spindle speed used when the program never specifies an S word (RPM)
pub const DEFAULT_SPINDLE_SPEED: u32 = 1000;

/// Dwell after spindle start before any motion (seconds)
pub const SETTLE_DWELL_SECONDS: f64 = 2.0;

/// Rapid clearance above the last peck depth for G73 chip breaking
pub const HIGH_SPEED_PECK_CLEARANCE: f64 = 1.0;

/// Peck increment for G73 when Q is omitted
pub const DEFAULT_HIGH_SPEED_PECK: f64 = 1.0;

/// Lateral tool shift for G76/G87 when Q is omitted
pub const DEFAULT_BORING_SHIFT: f64 = 0.5;

/// Decimal places for coordinates and feed rates
pub const COORDINATE_PRECISION: usize = 6;

/// Decimal places for dwell times
pub const DWELL_PRECISION: usize = 3;

/// Separator comment framing the preamble and postamble blocks
pub const SEPARATOR: &str = "; ========================================";

/// Upper bound on pecks in one G73/G83 cycle
pub const MAX_PECKS_PER_CYCLE: usize = 10_000;
