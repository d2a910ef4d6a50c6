//! Printing a snapshot of goroutine stacks.
//!
//! A print:
//! 1. Captures the raw dump
//! 2. Scans it into a snapshot
//! 3. Hides the printer's own frames
//! 4. Measures column widths
//! 5. Writes one header and one stack per bucket, or per goroutine when
//!    the dump reports a data race

use crate::capture::{capture_dump, DumpSource};
use crate::render::{default_palette, Layout, Palette, PathFormat};
use crate::snapshot::{Scanned, Similarity, Snapshot, SnapshotEngine};
use crate::utils::config::{DEFAULT_PATH_FORMAT, DEFAULT_SIMILARITY};
use crate::utils::error::RenderError;
use log::debug;
use std::io::{self, Write};

/// Renders dumps from `source`, scanned by `engine`
pub struct Printer<'a> {
    source: &'a dyn DumpSource,
    engine: &'a dyn SnapshotEngine,
    palette: &'a Palette,
    path_format: PathFormat,
    similarity: Similarity,
}

impl<'a> Printer<'a> {
    /// Printer with the default palette, relative paths and pointer-agnostic
    /// grouping
    pub fn new(source: &'a dyn DumpSource, engine: &'a dyn SnapshotEngine) -> Self {
        Self {
            source,
            engine,
            palette: default_palette(),
            path_format: DEFAULT_PATH_FORMAT,
            similarity: DEFAULT_SIMILARITY,
        }
    }

    pub fn with_palette(mut self, palette: &'a Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_path_format(mut self, path_format: PathFormat) -> Self {
        self.path_format = path_format;
        self
    }

    pub fn with_similarity(mut self, similarity: Similarity) -> Self {
        self.similarity = similarity;
        self
    }

    /// Capture, scan and print the stacks of all goroutines (`all`) or only
    /// the calling one.
    ///
    /// # Errors
    /// * `RenderError::Scan` - the engine rejected the dump
    /// * `RenderError::NoSnapshot` - the engine produced nothing
    ///
    /// Errors writing to `sink` are ignored.
    pub fn render(&self, sink: &mut dyn Write, all: bool) -> Result<(), RenderError> {
        let raw = capture_dump(self.source, all);

        let Scanned { snapshot, error } = self.engine.scan(&raw, &mut io::sink());
        if let Some(err) = error {
            if !err.is_end_of_input() {
                return Err(err.into());
            }
        }
        let snapshot = snapshot.ok_or(RenderError::NoSnapshot)?;

        self.render_snapshot(sink, snapshot);
        Ok(())
    }

    /// Print an already scanned snapshot
    pub fn render_snapshot(&self, sink: &mut dyn Write, mut snapshot: Snapshot) {
        let dropped = exclude_self(&mut snapshot);
        if dropped > 0 {
            debug!("Hid {} frames belonging to the printer", dropped);
        }

        let pf = self.path_format;
        let palette = self.palette;

        if !snapshot.is_race() {
            let buckets = self.engine.aggregate(&snapshot, self.similarity);
            debug!(
                "Bucketed mode: {} goroutines in {} buckets, {} paths",
                snapshot.goroutines.len(),
                buckets.len(),
                pf
            );
            let layout = Layout::for_buckets(&buckets, pf);
            let multiple = buckets.len() > 1;
            for bucket in &buckets {
                let header = palette.bucket_header(bucket, pf, multiple);
                let _ = sink.write_all(header.as_bytes());
                let _ = sink.write_all(palette.stack_lines(&bucket.signature, &layout, pf).as_bytes());
            }
            return;
        }

        debug!(
            "Race detected: listing {} goroutines, {} paths",
            snapshot.goroutines.len(),
            pf
        );
        let layout = Layout::for_goroutines(&snapshot.goroutines, pf);
        let multiple = snapshot.goroutines.len() > 1;
        for g in &snapshot.goroutines {
            let header = palette.goroutine_header(g, pf, multiple);
            let _ = sink.write_all(header.as_bytes());
            let _ = sink.write_all(palette.stack_lines(&g.signature, &layout, pf).as_bytes());
        }
    }
}

/// Drop the leading frames of the requesting goroutine that share the
/// source file of its innermost frame. Returns how many were dropped.
///
/// Only frames up to the first one from another file are removed, so user
/// code further down the stack survives unless it lives in that same file.
pub fn exclude_self(snapshot: &mut Snapshot) -> usize {
    let calls = match snapshot.goroutines.first_mut() {
        Some(g) if g.current => &mut g.signature.stack.calls,
        _ => return 0,
    };
    let path = match calls.first() {
        Some(call) => call.remote_src_path.clone(),
        None => return 0,
    };
    let own = calls
        .iter()
        .take_while(|call| call.remote_src_path == path)
        .count();
    calls.drain(..own);
    own
}
