//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs.

use thiserror::Error;

/// Errors reported by a snapshot engine while scanning a raw dump
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("invalid snapshot document: {0}")]
    Json(#[from] serde_json::Error),

    /// Input ended cleanly. Not a failure for the renderer.
    #[error("end of input")]
    EndOfInput,

    #[error("I/O error while scanning: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// True when the engine simply ran out of input
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, ScanError::EndOfInput)
    }
}

/// Errors that abort a render before anything is written
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to scan stack dump: {0}")]
    Scan(#[from] ScanError),

    #[error("no snapshot obtained from stack dump")]
    NoSnapshot,
}

/// Errors that can occur while loading a dump from disk
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("failed to read dump {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
