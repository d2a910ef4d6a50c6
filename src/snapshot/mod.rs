//! Snapshot data model and the engine boundary.
//!
//! This module holds:
//! - The structured goroutine/bucket/call types
//! - The `SnapshotEngine` trait used by the printer
//! - A JSON document engine

pub mod engine;
pub mod json;
pub mod model;

// Re-export main types
pub use engine::{Scanned, Similarity, SnapshotEngine};
pub use json::JsonEngine;
pub use model::{Arg, Args, Bucket, Call, Func, Goroutine, Location, Signature, Snapshot, Stack};
