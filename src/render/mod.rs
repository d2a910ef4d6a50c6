//! Terminal rendering of snapshots.
//!
//! Rendering happens in two stages:
//! - `Layout` measures column widths over everything that will be printed
//! - `Palette` formats headers and call lines using those widths

pub mod ansi;
pub mod layout;
pub mod lines;
pub mod palette;
pub mod path;

// Re-export main types
pub use ansi::color_code;
pub use layout::Layout;
pub use palette::{default_palette, Palette};
pub use path::PathFormat;
