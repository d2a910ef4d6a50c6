//! Column widths shared by every call line of a render.

use super::path::PathFormat;
use crate::snapshot::{Bucket, Goroutine, Signature};

/// Minimum widths of the package and source columns.
///
/// Widths are counted in characters and only used for padding; longer
/// values are never cut.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Layout {
    pub src_width: usize,
    pub pkg_width: usize,
}

impl Layout {
    /// Widest source location and package name across all stacks
    pub fn measure<'a, I>(signatures: I, pf: PathFormat) -> Self
    where
        I: IntoIterator<Item = &'a Signature>,
    {
        let mut layout = Layout::default();
        for signature in signatures {
            for call in &signature.stack.calls {
                let src = pf.format_call(call).chars().count();
                let pkg = call.func.dir_name.chars().count();
                layout.src_width = layout.src_width.max(src);
                layout.pkg_width = layout.pkg_width.max(pkg);
            }
        }
        layout
    }

    pub fn for_buckets(buckets: &[Bucket], pf: PathFormat) -> Self {
        Self::measure(buckets.iter().map(|b| &b.signature), pf)
    }

    pub fn for_goroutines(goroutines: &[Goroutine], pf: PathFormat) -> Self {
        Self::measure(goroutines.iter().map(|g| &g.signature), pf)
    }
}
