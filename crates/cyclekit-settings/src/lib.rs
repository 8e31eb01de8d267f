//! CycleKit Settings Crate
//!
//! Handles configuration of the converter's machining defaults and output
//! naming, persisted as TOML or JSON.

pub mod config;

pub use config::{Config, FramingSettings, OutputSettings};
