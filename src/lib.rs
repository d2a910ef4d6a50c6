//! ppstack
//!
//! Colorized, column-aligned rendering of goroutine stack dumps.
//!
//! Goroutines with equivalent stacks are printed once per bucket with a
//! member count. When the dump comes from the race detector every goroutine
//! is listed on its own, with the racing address in its header.
//!
//! ```ignore
//! let source = StaticDump::from_file("dump.json")?;
//! let engine = JsonEngine::new();
//! Printer::new(&source, &engine).render(&mut std::io::stderr(), true)?;
//! ```

pub mod capture;
pub mod commands;
pub mod render;
pub mod snapshot;
pub mod utils;

pub use capture::{capture_dump, DumpSource, StaticDump};
pub use commands::Printer;
pub use render::{default_palette, Layout, Palette, PathFormat};
pub use snapshot::{JsonEngine, Similarity, Snapshot, SnapshotEngine};
pub use utils::error::RenderError;
