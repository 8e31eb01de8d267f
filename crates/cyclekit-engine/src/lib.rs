//! # CycleKit Engine
//!
//! Converts G-Code programs that use canned cycles (G73, G76, G81-G89) into
//! programs built only from primitive moves, for controllers that cannot
//! run the cycles themselves.
//!
//! ## Pipeline
//!
//! 1. **Discovery**: look ahead for the spindle speed and initial safe height
//! 2. **Sequential pass**: track retract mode and safe height line by line,
//!    expanding each cycle with the state in force at that line
//! 3. **Framing**: wrap the body in a startup block and a safe return block
//!
//! A second mode cleans arc words for Mach3 without expanding cycles.
//!
//! ```
//! let report = cyclekit_engine::convert("G81 X10 Y20 Z-5 R2 F100").unwrap();
//! assert!(report.output.contains("G1 Z-5.000000 F100.000000"));
//! ```

pub mod converter;
pub mod expander;
pub mod framer;
pub mod gcode;
pub mod mach3;

pub use converter::{
    convert, converter_for, ConversionReport, ConversionStats, ConverterOptions,
    CycleLinearizer, Mach3Converter, ProgramConverter,
};
pub use expander::{CycleExpander, CycleParameters, Expansion};
pub use framer::ProgramFramer;
pub use gcode::{CycleKind, Discovery, ModalState, ParameterSet, RetractConvention, Word};
