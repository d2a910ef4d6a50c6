//! Command implementations.
//!
//! Commands orchestrate the capture, snapshot and render components.

pub mod print;

// Re-export main command types
pub use print::{exclude_self, Printer};
