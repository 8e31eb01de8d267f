//! G-Code word scanning and modal state
//!
//! This module provides:
//! - Letter/number word extraction from free-form lines
//! - Canned cycle classification
//! - Modal state tracking across a program

pub mod command;
pub mod modal;
pub mod words;

pub use command::*;
pub use modal::*;
pub use words::*;
