//! Acquiring raw stack dumps.
//!
//! A [`DumpSource`] behaves like the runtime's stack facility: it copies as
//! much of the dump as fits into the caller's buffer and reports how many
//! bytes it wrote. A completely filled buffer means the dump may have been
//! cut short, so [`capture_dump`] retries with a buffer twice as large.

pub mod source;

pub use source::StaticDump;

use crate::utils::config::INITIAL_DUMP_BUFFER;
use log::debug;

/// Something that can write a stack dump into a buffer
pub trait DumpSource {
    /// Write the dump of all goroutines (`all`) or only the calling one
    /// into `buf`, returning the number of bytes written.
    fn stack(&self, buf: &mut [u8], all: bool) -> usize;
}

/// Capture a complete dump, growing the buffer until it fits.
///
/// **Public** - first step of every print
///
/// # Arguments
/// * `source` - Where the dump comes from
/// * `all` - Dump every goroutine instead of only the caller
///
/// # Returns
/// The dump bytes, exactly as long as the source reported
pub fn capture_dump(source: &dyn DumpSource, all: bool) -> Vec<u8> {
    let mut buf = vec![0u8; INITIAL_DUMP_BUFFER];
    loop {
        let n = source.stack(&mut buf, all);
        if n < buf.len() {
            buf.truncate(n);
            debug!("Captured {} byte dump (all={})", n, all);
            return buf;
        }
        debug!("Dump filled {} byte buffer, doubling", buf.len());
        buf = vec![0u8; buf.len() * 2];
    }
}
