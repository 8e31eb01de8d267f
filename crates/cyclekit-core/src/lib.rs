//! # CycleKit Core
//!
//! Core types, constants, and error definitions shared by the CycleKit crates.
//! Provides the conversion mode selector and the diagnostic types the
//! cycle-expansion engine reports back to its callers.

pub mod constants;
pub mod error;
pub mod mode;

pub use error::{ConversionError, CycleDiagnostic, Error, Result};
pub use mode::ConversionMode;
