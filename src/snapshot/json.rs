//! Engine over pre-parsed JSON snapshot documents.
//!
//! Stack-trace text is parsed elsewhere; this engine loads the resulting
//! document and groups goroutines whose calls match under the requested
//! similarity.

use super::engine::{Scanned, Similarity, SnapshotEngine};
use super::model::{Args, Bucket, Call, Goroutine, Signature, Snapshot, Stack};
use crate::utils::error::ScanError;
use log::{debug, warn};
use serde_json::Deserializer;
use std::io::Write;

/// Snapshot engine reading one JSON [`Snapshot`] document
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEngine;

impl JsonEngine {
    pub fn new() -> Self {
        Self
    }
}

impl SnapshotEngine for JsonEngine {
    fn scan(&self, raw: &[u8], diagnostics: &mut dyn Write) -> Scanned {
        if raw.iter().all(u8::is_ascii_whitespace) {
            debug!("Dump is empty ({} bytes of whitespace)", raw.len());
            return Scanned::failed(ScanError::EndOfInput);
        }

        let mut stream = Deserializer::from_slice(raw).into_iter::<Snapshot>();
        let snapshot = match stream.next() {
            Some(Ok(snapshot)) => snapshot,
            Some(Err(e)) => return Scanned::failed(ScanError::Json(e)),
            None => return Scanned::failed(ScanError::EndOfInput),
        };

        let consumed = stream.byte_offset();
        let trailing = &raw[consumed..];
        if !trailing.iter().all(u8::is_ascii_whitespace) {
            warn!("Ignoring {} trailing bytes after snapshot", trailing.len());
            let _ = writeln!(
                diagnostics,
                "ignored {} bytes after snapshot document",
                trailing.len()
            );
        }

        debug!(
            "Scanned snapshot: {} goroutines, race={}",
            snapshot.goroutines.len(),
            snapshot.race
        );
        Scanned::complete(snapshot)
    }

    fn aggregate(&self, snapshot: &Snapshot, similarity: Similarity) -> Vec<Bucket> {
        debug!(
            "Grouping {} goroutines ({:?})",
            snapshot.goroutines.len(),
            similarity
        );
        group(&snapshot.goroutines, similarity)
    }
}

/// Group goroutines with equivalent signatures, in first-appearance order.
///
/// Sleep ranges are merged. Arguments that differ between members are
/// shown as `*`.
fn group(goroutines: &[Goroutine], similarity: Similarity) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = Vec::new();

    for g in goroutines {
        let existing = buckets
            .iter_mut()
            .find(|b| similar(&b.signature, &g.signature, similarity));
        match existing {
            Some(bucket) => {
                bucket.ids.push(g.id);
                bucket.first |= g.first;
                merge(&mut bucket.signature, &g.signature);
            }
            None => buckets.push(Bucket {
                ids: vec![g.id],
                first: g.first,
                signature: g.signature.clone(),
            }),
        }
    }

    buckets
}

/// The lock flag only matters for `ExactFlags`
fn similar(a: &Signature, b: &Signature, similarity: Similarity) -> bool {
    if a.state != b.state {
        return false;
    }
    if similarity == Similarity::ExactFlags && a.locked != b.locked {
        return false;
    }
    stacks_similar(&a.stack, &b.stack, similarity)
        && stacks_similar(&a.created_by, &b.created_by, similarity)
}

fn stacks_similar(a: &Stack, b: &Stack, similarity: Similarity) -> bool {
    a.elided == b.elided
        && a.calls.len() == b.calls.len()
        && a.calls
            .iter()
            .zip(&b.calls)
            .all(|(x, y)| calls_similar(x, y, similarity))
}

fn calls_similar(a: &Call, b: &Call, similarity: Similarity) -> bool {
    a.func == b.func
        && a.location == b.location
        && a.line == b.line
        && a.remote_src_path == b.remote_src_path
        && args_similar(&a.args, &b.args, similarity)
}

fn args_similar(a: &Args, b: &Args, similarity: Similarity) -> bool {
    if a.elided != b.elided || a.values.len() != b.values.len() {
        return false;
    }
    a.values.iter().zip(&b.values).all(|(x, y)| match similarity {
        Similarity::AnyValue => true,
        Similarity::AnyPointer => x == y || (x.is_ptr && y.is_ptr),
        Similarity::ExactFlags | Similarity::ExactLines => x == y,
    })
}

fn merge(into: &mut Signature, other: &Signature) {
    into.sleep_min = into.sleep_min.min(other.sleep_min);
    into.sleep_max = into.sleep_max.max(other.sleep_max);
    into.locked |= other.locked;
    merge_args(&mut into.stack, &other.stack);
    merge_args(&mut into.created_by, &other.created_by);
}

fn merge_args(into: &mut Stack, other: &Stack) {
    for (call, other_call) in into.calls.iter_mut().zip(&other.calls) {
        for (arg, other_arg) in call.args.values.iter_mut().zip(&other_call.args.values) {
            if arg != other_arg {
                arg.name = "*".to_string();
            }
        }
    }
}
