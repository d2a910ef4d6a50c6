//! Boundary with the snapshot engine that turns raw dumps into snapshots.

use super::model::{Bucket, Snapshot};
use crate::utils::error::ScanError;
use std::io::Write;

/// How loosely two signatures may differ and still share a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Similarity {
    /// Same calls, same argument values, same flags
    ExactFlags,
    /// Same calls and argument values
    ExactLines,
    /// Possibly the same root call, pointer values ignored
    AnyPointer,
    /// Same calls, any argument value
    AnyValue,
}

/// Result of scanning a raw dump.
///
/// An engine may produce a snapshot and still report an error, the same way
/// a reader returns data alongside end of input.
#[derive(Debug, Default)]
pub struct Scanned {
    pub snapshot: Option<Snapshot>,
    pub error: Option<ScanError>,
}

impl Scanned {
    pub fn complete(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            error: None,
        }
    }

    pub fn failed(error: ScanError) -> Self {
        Self {
            snapshot: None,
            error: Some(error),
        }
    }
}

/// Parses dumps and groups goroutines.
pub trait SnapshotEngine {
    /// Scan `raw` into a snapshot. Engine-internal chatter goes to
    /// `diagnostics`.
    fn scan(&self, raw: &[u8], diagnostics: &mut dyn Write) -> Scanned;

    /// Group the snapshot's goroutines under `similarity`, in display order.
    fn aggregate(&self, snapshot: &Snapshot, similarity: Similarity) -> Vec<Bucket>;
}
